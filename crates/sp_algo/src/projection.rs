//! Local Support Projector: national support → district support.
//!
//! For committee `i` in district `d`:
//! 1. `dev[i] = d.historical[i] / baseline[i]` (0 when the baseline is 0)
//! 2. `local[i] = 100` if national support is exactly 100, else `support[i] × dev[i]`
//! 3. district overrides (e.g. cap at `factor × support[i]`)
//! 4. clamp each entry to ≤ 100
//! 5. if the sum exceeds 100, rescale the whole vector to sum to 100

use core::fmt;

use sp_core::entities::{committee_index, Committee, District};
use sp_core::ids::{CommitteeId, DistrictNumber};
use sp_core::variables::{DistrictOverride, OverrideRule};

use crate::baseline::HistoricalBaseline;

#[derive(Clone, Debug, PartialEq)]
pub enum ProjectionError {
    /// An override names a committee that is not in the committee list.
    UnknownOverrideCommittee { district: DistrictNumber, committee: CommitteeId },
}

impl fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionError::UnknownOverrideCommittee { district, committee } => write!(
                f,
                "override for district {district} names unknown committee {committee}"
            ),
        }
    }
}

impl std::error::Error for ProjectionError {}

/// Override with its committee resolved to a canonical index.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedOverride {
    pub district: DistrictNumber,
    pub committee: usize,
    pub rule: OverrideRule,
}

impl ResolvedOverride {
    fn apply(&self, support: &[f64], local: &mut [f64]) {
        let i = self.committee;
        let (Some(&national), Some(value)) = (support.get(i), local.get_mut(i)) else {
            return;
        };
        match self.rule {
            OverrideRule::CapAtNationalMultiple { factor } => {
                let cap = factor * national;
                if *value > cap {
                    *value = cap;
                }
            }
        }
    }
}

/// Projector bound to one committee list and district set.
#[derive(Clone, Debug)]
pub struct LocalSupportProjector {
    baseline: HistoricalBaseline,
    overrides: Vec<ResolvedOverride>,
}

impl LocalSupportProjector {
    pub fn new(
        committees: &[Committee],
        districts: &[District],
        overrides: &[DistrictOverride],
    ) -> Result<Self, ProjectionError> {
        Self::with_baseline(HistoricalBaseline::build(districts, committees), committees, overrides)
    }

    /// Projector over an already built baseline (aligned with `committees`).
    pub fn with_baseline(
        baseline: HistoricalBaseline,
        committees: &[Committee],
        overrides: &[DistrictOverride],
    ) -> Result<Self, ProjectionError> {
        let overrides = overrides
            .iter()
            .map(|o| {
                committee_index(committees, &o.committee)
                    .map(|committee| ResolvedOverride { district: o.district, committee, rule: o.rule })
                    .ok_or_else(|| ProjectionError::UnknownOverrideCommittee {
                        district: o.district,
                        committee: o.committee.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { baseline, overrides })
    }

    pub fn baseline(&self) -> &HistoricalBaseline { &self.baseline }

    pub fn overrides(&self) -> &[ResolvedOverride] { &self.overrides }

    /// Project `support` (national, canonical order) onto `district`.
    /// The result has the same length as `support`; it never contains a value
    /// above 100 and never sums above 100 (up to rounding).
    pub fn project(&self, support: &[f64], district: &District) -> Vec<f64> {
        let dev = self.baseline.deviation(district);

        let mut local: Vec<f64> = support
            .iter()
            .enumerate()
            .map(|(i, &s)| {
                if s == 100.0 {
                    100.0
                } else {
                    s * dev.get(i).copied().unwrap_or(0.0)
                }
            })
            .collect();

        for o in self.overrides.iter().filter(|o| o.district == district.number) {
            o.apply(support, &mut local);
        }

        for v in local.iter_mut() {
            *v = v.min(100.0);
        }

        let total: f64 = local.iter().sum();
        if total > 100.0 {
            for v in local.iter_mut() {
                *v = *v / total * 100.0;
            }
        }
        local
    }
}
