//! Highest-averages machinery shared by D'Hondt and Sainte-Laguë.
//!
//! Contract:
//! - Build the full quotient table `support[i] / divisor(r)` for rounds
//!   `r = 1..=seats`, rounds outermost and committees innermost.
//! - Stable-sort it by quotient, descending, and award one seat per entry of
//!   the first `seats` rows.
//! - Equal quotients keep generation order: the lower round wins, then the
//!   lower committee index.
//! - All-zero support (or `seats == 0`) awards nothing.

use sp_core::determinism::cmp_desc;

/// One claim to a seat.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quotient {
    pub value: f64,
    pub committee: usize,
    pub divisor: f64,
}

/// Ranked quotient table (best claim first). Empty when there is nothing to award.
pub fn quotient_table<F>(seats: u32, support: &[f64], divisor: F) -> Vec<Quotient>
where
    F: Fn(u32) -> f64,
{
    if seats == 0 || !support.iter().any(|&s| s > 0.0) {
        return Vec::new();
    }

    let mut table = Vec::with_capacity(seats as usize * support.len());
    for round in 1..=seats {
        let d = divisor(round);
        for (committee, &s) in support.iter().enumerate() {
            table.push(Quotient { value: s / d, committee, divisor: d });
        }
    }
    table.sort_by(|a, b| cmp_desc(a.value, b.value));
    table
}

/// Award `seats` seats to the top quotients of the table.
pub(crate) fn allocate_highest_averages<F>(seats: u32, support: &[f64], divisor: F) -> Vec<u32>
where
    F: Fn(u32) -> f64,
{
    let mut alloc = vec![0u32; support.len()];
    for q in quotient_table(seats, support, divisor).iter().take(seats as usize) {
        alloc[q.committee] += 1;
    }
    alloc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_round_major_on_ties() {
        // 50/1 (A), 50/1 (B), 25/2 (A), 25/2 (B)
        let t = quotient_table(2, &[50.0, 50.0], |r| r as f64);
        let order: Vec<(usize, f64)> = t.iter().map(|q| (q.committee, q.divisor)).collect();
        assert_eq!(order, vec![(0, 1.0), (1, 1.0), (0, 2.0), (1, 2.0)]);
    }

    #[test]
    fn empty_table_for_zero_seats_or_zero_support() {
        assert!(quotient_table(0, &[10.0], |r| r as f64).is_empty());
        assert!(quotient_table(5, &[0.0, 0.0], |r| r as f64).is_empty());
        assert_eq!(allocate_highest_averages(5, &[0.0, 0.0], |r| r as f64), vec![0, 0]);
    }
}
