//! Stable ordering helpers for float keys.
//!
//! All rankings in the engine are stable sorts over vectors generated in
//! canonical order, so equal keys keep their generation order. These helpers
//! only fix the comparison itself (`f64::total_cmp`, never `partial_cmp`).

use core::cmp::Ordering;

/// Descending comparison of two float keys.
#[inline]
pub fn cmp_desc(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

/// Index of the largest value; the lowest index wins ties. `None` on empty input.
pub fn argmax_first(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v.total_cmp(&b) != Ordering::Greater => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_desc_sort_keeps_first_of_equals() {
        let mut v = vec![(1.0, 'a'), (3.0, 'b'), (1.0, 'c'), (3.0, 'd')];
        v.sort_by(|x, y| cmp_desc(x.0, y.0));
        let order: String = v.iter().map(|p| p.1).collect();
        assert_eq!(order, "bdac");
    }

    #[test]
    fn argmax_prefers_lowest_index() {
        assert_eq!(argmax_first(&[1.0, 5.0, 5.0, 2.0]), Some(1));
        assert_eq!(argmax_first(&[0.0, 0.0]), Some(0));
        assert_eq!(argmax_first(&[]), None);
    }
}
