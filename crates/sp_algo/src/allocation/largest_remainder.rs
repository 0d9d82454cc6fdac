//! Largest Remainder (Hare-Niemeyer) allocation per district.
//!
//! Contract:
//! - Quota `Q = Σsupport / seats`.
//! - Provisional seats are `floor(support[i] / Q)` for every committee with
//!   positive support.
//! - Leftover seats go one each by fractional remainder, descending; equal
//!   remainders keep committee order. Committees with zero support never enter
//!   the ranking.
//! - If rounding noise makes the floors overshoot, seats are taken back from
//!   the smallest remainders first.
//! - `Σsupport == 0` or `seats == 0` yields all zeros (no division by zero).

use core::cmp::Ordering;

use sp_core::determinism::cmp_desc;

/// Allocate `seats` seats over `support` using the Hare quota and largest remainders.
pub fn allocate_hare_niemeyer(seats: u32, support: &[f64]) -> Vec<u32> {
    let mut alloc = vec![0u32; support.len()];
    let total: f64 = support.iter().filter(|&&s| s > 0.0).sum();
    if seats == 0 || total <= 0.0 {
        return alloc;
    }

    let quota = total / seats as f64;
    let mut remainders: Vec<(usize, f64)> = Vec::new();
    for (i, &s) in support.iter().enumerate() {
        if s > 0.0 {
            let exact = s / quota;
            let floor = exact.floor();
            alloc[i] = floor as u32;
            remainders.push((i, exact - floor));
        }
    }

    let assigned: u64 = alloc.iter().map(|&s| s as u64).sum();
    match assigned.cmp(&(seats as u64)) {
        Ordering::Less => distribute_leftovers((seats as u64 - assigned) as u32, &mut alloc, &mut remainders),
        Ordering::Greater => trim_over_allocation(seats, &mut alloc, &mut remainders),
        Ordering::Equal => {}
    }

    debug_assert_eq!(alloc.iter().map(|&s| s as u64).sum::<u64>(), seats as u64);
    alloc
}

/// Hand out `extra` seats by remainder, descending (stable).
fn distribute_leftovers(extra: u32, alloc: &mut [u32], remainders: &mut [(usize, f64)]) {
    if remainders.is_empty() {
        return;
    }
    remainders.sort_by(|a, b| cmp_desc(a.1, b.1));

    // Cycle if floating-point noise left more seats than candidates.
    for k in 0..extra as usize {
        let (idx, _) = remainders[k % remainders.len()];
        alloc[idx] += 1;
    }
}

/// Remove seats until the total equals `target`, smallest remainder first.
fn trim_over_allocation(target: u32, alloc: &mut [u32], remainders: &mut [(usize, f64)]) {
    remainders.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut total: u64 = alloc.iter().map(|&s| s as u64).sum();
    let mut k = 0usize;
    while total > target as u64 {
        let (idx, _) = remainders[k % remainders.len()];
        if alloc[idx] > 0 {
            alloc[idx] -= 1;
            total -= 1;
        }
        k += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_quota_needs_no_remainders() {
        assert_eq!(allocate_hare_niemeyer(10, &[60.0, 40.0]), vec![6, 4]);
    }

    #[test]
    fn leftovers_follow_largest_remainder() {
        // Q = 100 / 7 ≈ 14.29 → exact 3.29 / 2.31 / 1.40 → floors 3/2/1, one seat left
        // remainders .29/.31/.40 → third committee takes it.
        assert_eq!(allocate_hare_niemeyer(7, &[47.0, 33.0, 20.0]), vec![3, 2, 2]);
    }

    #[test]
    fn equal_remainders_keep_committee_order() {
        // Q = 3 / 2 → 0.667 each, one seat per first two.
        assert_eq!(allocate_hare_niemeyer(2, &[1.0, 1.0, 1.0]), vec![1, 1, 0]);
    }

    #[test]
    fn zero_support_never_wins_a_remainder_seat() {
        // Q = 10 / 3 → 3.0 exact for the single positive committee.
        assert_eq!(allocate_hare_niemeyer(3, &[0.0, 10.0, 0.0]), vec![0, 3, 0]);
    }

    #[test]
    fn all_zero_support_yields_all_zero_seats() {
        assert_eq!(allocate_hare_niemeyer(5, &[0.0, 0.0, 0.0]), vec![0, 0, 0]);
        assert_eq!(allocate_hare_niemeyer(0, &[10.0, 5.0]), vec![0, 0]);
    }

    #[test]
    fn trim_takes_from_smallest_remainder() {
        let mut alloc = vec![3, 2, 1];
        let mut rems = vec![(0, 0.9), (1, 0.1), (2, 0.5)];
        trim_over_allocation(5, &mut alloc, &mut rems);
        assert_eq!(alloc, vec![3, 1, 1]);
    }
}
