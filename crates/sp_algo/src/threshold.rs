//! Threshold Filter.
//!
//! The test uses *national* support against each committee's threshold, but
//! zeroes the *local* value: national viability gates local representation.

use sp_core::entities::Committee;

/// True if `national` support meets the committee's threshold (inclusive).
#[inline]
pub fn clears_threshold(national: f64, committee: &Committee) -> bool {
    national >= committee.threshold
}

/// `filtered[i] = 0` when `national[i] < committees[i].threshold`, else `local[i]`.
///
/// Entries without a matching national value or committee are zeroed.
pub fn apply_threshold(local: &[f64], national: &[f64], committees: &[Committee]) -> Vec<f64> {
    local
        .iter()
        .enumerate()
        .map(|(i, &v)| match (national.get(i), committees.get(i)) {
            (Some(&n), Some(c)) if clears_threshold(n, c) => v,
            _ => 0.0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sp_core::ids::CommitteeId;

    fn committee(id: &str, threshold: f64) -> Committee {
        Committee::new(id.parse::<CommitteeId>().unwrap(), id, threshold).unwrap()
    }

    #[test]
    fn national_support_gates_local_value() {
        let cs = vec![committee("a", 5.0), committee("b", 5.0), committee("c", 8.0)];
        // b is locally strong but nationally below 5%; c clears exactly at 8%.
        let out = apply_threshold(&[2.0, 30.0, 9.0], &[6.0, 4.99, 8.0], &cs);
        assert_eq!(out, vec![2.0, 0.0, 9.0]);
    }

    #[test]
    fn residual_list_with_full_threshold_never_passes() {
        let cs = vec![committee("poz", 100.0)];
        assert_eq!(apply_threshold(&[12.0], &[99.9], &cs), vec![0.0]);
    }

    #[test]
    fn filtering_twice_changes_nothing() {
        let cs = vec![committee("a", 5.0), committee("b", 5.0)];
        let national = [3.0, 40.0];
        let once = apply_threshold(&[10.0, 50.0], &national, &cs);
        let twice = apply_threshold(&once, &national, &cs);
        assert_eq!(once, twice);
    }
}
