//! Historical Baseline Builder: seats-weighted national average of historical
//! district support, per committee.

use sp_core::entities::{Committee, District};
use sp_core::ids::CommitteeId;

/// National historical support per committee, aligned with the committee list
/// it was built from.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoricalBaseline {
    ids: Vec<CommitteeId>,
    values: Vec<f64>,
    total_seats: u64,
}

impl HistoricalBaseline {
    /// `Σ(historical[c] × seats) / Σ(seats)` over all districts, per committee.
    ///
    /// With zero total seats (no districts) every value is 0, which in turn
    /// makes every deviation 0 downstream; see [`HistoricalBaseline::is_degenerate`].
    pub fn build(districts: &[District], committees: &[Committee]) -> Self {
        let total_seats: u64 = districts.iter().map(|d| d.seats as u64).sum();
        let ids: Vec<CommitteeId> = committees.iter().map(|c| c.id.clone()).collect();

        let values = ids
            .iter()
            .map(|id| {
                if total_seats == 0 {
                    return 0.0;
                }
                let weighted: f64 = districts
                    .iter()
                    .map(|d| d.historical(id) * d.seats as f64)
                    .sum();
                weighted / total_seats as f64
            })
            .collect();

        Self { ids, values, total_seats }
    }

    pub fn get(&self, id: &CommitteeId) -> Option<f64> {
        self.ids.iter().position(|x| x == id).map(|i| self.values[i])
    }

    /// Values in canonical committee order.
    pub fn values(&self) -> &[f64] { &self.values }

    pub fn committee_ids(&self) -> &[CommitteeId] { &self.ids }

    pub fn total_seats(&self) -> u64 { self.total_seats }

    /// True when built from districts with no seats at all.
    pub fn is_degenerate(&self) -> bool { self.total_seats == 0 }

    /// Ratio of a district's historical support to the national baseline,
    /// per committee. A zero baseline yields a deviation of 0.
    pub fn deviation(&self, district: &District) -> Vec<f64> {
        self.ids
            .iter()
            .zip(&self.values)
            .map(|(id, &base)| if base != 0.0 { district.historical(id) / base } else { 0.0 })
            .collect()
    }
}

/// Shorthand for [`HistoricalBaseline::build`].
pub fn build_baseline(districts: &[District], committees: &[Committee]) -> HistoricalBaseline {
    HistoricalBaseline::build(districts, committees)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sp_core::ids::DistrictNumber;

    fn cid(s: &str) -> CommitteeId {
        s.parse().unwrap()
    }

    fn committees() -> Vec<Committee> {
        vec![
            Committee::new(cid("a"), "A", 5.0).unwrap(),
            Committee::new(cid("b"), "B", 5.0).unwrap(),
        ]
    }

    fn district(n: u32, seats: u32, a: f64, b: f64) -> District {
        let hist = [(cid("a"), a), (cid("b"), b)].into_iter().collect();
        District::new(DistrictNumber(n), seats, hist).unwrap()
    }

    #[test]
    fn weights_by_seat_count() {
        // a: (30*10 + 60*30) / 40 = 52.5 ; b: (70*10 + 40*30) / 40 = 47.5
        let ds = vec![district(1, 10, 30.0, 70.0), district(2, 30, 60.0, 40.0)];
        let bl = HistoricalBaseline::build(&ds, &committees());
        assert_eq!(bl.values(), &[52.5, 47.5]);
        assert_eq!(bl.get(&cid("b")), Some(47.5));
        assert_eq!(bl.get(&cid("zz")), None);
        assert_eq!(bl.total_seats(), 40);
    }

    #[test]
    fn no_districts_is_degenerate_but_finite() {
        let bl = HistoricalBaseline::build(&[], &committees());
        assert!(bl.is_degenerate());
        assert_eq!(bl.values(), &[0.0, 0.0]);
        let d = district(1, 5, 50.0, 50.0);
        assert_eq!(bl.deviation(&d), vec![0.0, 0.0]);
    }

    #[test]
    fn deviation_is_local_over_national() {
        let ds = vec![district(1, 10, 30.0, 70.0), district(2, 30, 60.0, 40.0)];
        let bl = HistoricalBaseline::build(&ds, &committees());
        let dev = bl.deviation(&ds[0]);
        assert!((dev[0] - 30.0 / 52.5).abs() < 1e-12);
        assert!((dev[1] - 70.0 / 47.5).abs() < 1e-12);
    }
}
