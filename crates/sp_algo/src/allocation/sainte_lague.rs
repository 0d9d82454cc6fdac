//! Sainte-Laguë (highest averages with odd divisors) allocation per district.
//!
//! Divisors are 1, 3, 5, ..., `2 * seats - 1`. Tie handling is shared with
//! D'Hondt: lower divisor first, then lower committee index.

use super::divisor::allocate_highest_averages;

/// Sainte-Laguë divisor for the `round`-th seat claim (1-based).
#[inline]
pub fn sainte_lague_divisor(round: u32) -> f64 {
    (2 * round as u64 - 1) as f64
}

/// Allocate `seats` seats over `support` using Sainte-Laguë.
pub fn allocate_sainte_lague(seats: u32, support: &[f64]) -> Vec<u32> {
    allocate_highest_averages(seats, support, sainte_lague_divisor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_divisors() {
        assert_eq!(sainte_lague_divisor(1), 1.0);
        assert_eq!(sainte_lague_divisor(2), 3.0);
        assert_eq!(sainte_lague_divisor(5), 9.0);
    }

    #[test]
    fn sixty_forty_over_ten_seats() {
        // 60: 60, 20, 12, 8.57, 6.67, 5.45 | 40: 40, 13.3, 8, 5.71
        assert_eq!(allocate_sainte_lague(10, &[60.0, 40.0]), vec![6, 4]);
    }

    #[test]
    fn kinder_to_small_lists_than_dhondt() {
        let support = [100.0, 80.0, 30.0, 20.0];
        assert_eq!(allocate_sainte_lague(8, &support), vec![3, 3, 1, 1]);
        assert_eq!(super::super::allocate_dhondt(8, &support), vec![4, 3, 1, 0]);
    }

    #[test]
    fn degenerate_inputs() {
        assert_eq!(allocate_sainte_lague(3, &[0.0, 0.0]), vec![0, 0]);
        assert_eq!(allocate_sainte_lague(1, &[50.0, 50.0]), vec![1, 0]);
    }
}
