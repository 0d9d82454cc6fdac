//! D'Hondt (highest averages) allocation per district.
//!
//! Divisors are 1, 2, 3, ..., `seats`. Ties resolve to the lower divisor,
//! then the lower committee index (see `divisor`).

use super::divisor::allocate_highest_averages;

/// D'Hondt divisor for the `round`-th seat claim (1-based).
#[inline]
pub fn dhondt_divisor(round: u32) -> f64 {
    round as f64
}

/// Allocate `seats` seats over `support` using D'Hondt.
///
/// Returns a vector aligned with `support`. If `seats == 0` or all support is
/// zero, every entry is 0.
pub fn allocate_dhondt(seats: u32, support: &[f64]) -> Vec<u32> {
    allocate_highest_averages(seats, support, dhondt_divisor)
}
