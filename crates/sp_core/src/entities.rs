//! Domain entities: committees, districts, and the national support vector.

use std::collections::{BTreeMap, BTreeSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::ids::{CommitteeId, DistrictNumber};

/// Percent values must be finite and within `0..=100`.
fn check_pct(v: f64, what: &'static str) -> Result<f64, CoreError> {
    if v.is_finite() && (0.0..=100.0).contains(&v) {
        Ok(v)
    } else {
        Err(CoreError::DomainOutOfRange(what))
    }
}

/// A registered electoral list competing for seats.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Committee {
    pub id: CommitteeId,
    pub name: String,
    /// Abbreviation used in coalition labels ("PiS", "KO", ...).
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub short_name: Option<String>,
    /// Minimum national support (percent) required to receive any seat.
    pub threshold: f64,
}

impl Committee {
    pub fn new(id: CommitteeId, name: impl Into<String>, threshold: f64) -> Result<Self, CoreError> {
        Ok(Self {
            id,
            name: name.into(),
            short_name: None,
            threshold: check_pct(threshold, "committee.threshold")?,
        })
    }

    pub fn with_short_name(mut self, short: impl Into<String>) -> Self {
        self.short_name = Some(short.into());
        self
    }

    /// Short label for listings; falls back to the id.
    pub fn label(&self) -> &str {
        self.short_name.as_deref().unwrap_or(self.id.as_str())
    }

    pub fn set_threshold(&mut self, pct: f64) -> Result<(), CoreError> {
        self.threshold = check_pct(pct, "committee.threshold")?;
        Ok(())
    }
}

/// Position of `id` in the canonical committee list.
pub fn committee_index(committees: &[Committee], id: &CommitteeId) -> Option<usize> {
    committees.iter().position(|c| &c.id == id)
}

/// A fixed-seat constituency with its historical voting pattern.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct District {
    pub number: DistrictNumber,
    pub seats: u32,
    /// Historical support per committee, in percent.
    pub historical_support: BTreeMap<CommitteeId, f64>,
}

impl District {
    pub fn new(
        number: DistrictNumber,
        seats: u32,
        historical_support: BTreeMap<CommitteeId, f64>,
    ) -> Result<Self, CoreError> {
        if seats == 0 {
            return Err(CoreError::ZeroSeats(number.get()));
        }
        for v in historical_support.values() {
            check_pct(*v, "district.historical_support")?;
        }
        Ok(Self { number, seats, historical_support })
    }

    /// Historical support for `id`; absent entries read as 0.
    pub fn historical(&self, id: &CommitteeId) -> f64 {
        self.historical_support.get(id).copied().unwrap_or(0.0)
    }
}

/// Check that a committee list and a district set form a consistent registry:
/// unique committee ids, unique district numbers, at least one seat per
/// district, and historical support covering every committee.
pub fn validate_registry(committees: &[Committee], districts: &[District]) -> Result<(), CoreError> {
    let mut ids = BTreeSet::new();
    for c in committees {
        if !ids.insert(&c.id) {
            return Err(CoreError::DuplicateCommittee(c.id.to_string()));
        }
        check_pct(c.threshold, "committee.threshold")?;
    }

    let mut numbers = BTreeSet::new();
    for d in districts {
        if !numbers.insert(d.number) {
            return Err(CoreError::DuplicateDistrict(d.number.get()));
        }
        if d.seats == 0 {
            return Err(CoreError::ZeroSeats(d.number.get()));
        }
        for c in committees {
            match d.historical_support.get(&c.id) {
                Some(v) => {
                    check_pct(*v, "district.historical_support")?;
                }
                None => {
                    return Err(CoreError::MissingHistoricalSupport {
                        district: d.number.get(),
                        committee: c.id.to_string(),
                    })
                }
            }
        }
    }
    Ok(())
}

/// National support vector: one percent per committee, in canonical order.
///
/// Construction rejects non-finite values and values outside `0..=100`.
/// The sum is deliberately not checked; see [`SupportVector::rebalance_pinned`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SupportVector(Vec<f64>);

impl SupportVector {
    pub fn new(values: Vec<f64>) -> Result<Self, CoreError> {
        for v in &values {
            check_pct(*v, "support")?;
        }
        Ok(Self(values))
    }

    /// Like [`SupportVector::new`], and also checks alignment with the committee list.
    pub fn for_committees(values: Vec<f64>, committees: &[Committee]) -> Result<Self, CoreError> {
        if values.len() != committees.len() {
            return Err(CoreError::LengthMismatch { expected: committees.len(), got: values.len() });
        }
        Self::new(values)
    }

    pub fn as_slice(&self) -> &[f64] { &self.0 }
    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
    pub fn total(&self) -> f64 { self.0.iter().sum() }
    pub fn into_inner(self) -> Vec<f64> { self.0 }

    /// Bring an over-full vector back to 100 while keeping entry `pinned`
    /// (the one the user last edited) untouched: every other entry is scaled
    /// by `(100 - pinned) / others`. No-op when the total is at most 100, when
    /// `pinned` is out of range, or when all other entries are zero.
    ///
    /// Returns `true` if any entry changed.
    pub fn rebalance_pinned(&mut self, pinned: usize) -> bool {
        let total = self.total();
        if total <= 100.0 || pinned >= self.0.len() {
            return false;
        }
        let fixed = self.0[pinned];
        let others = total - fixed;
        if others <= 0.0 {
            return false;
        }
        let factor = (100.0 - fixed) / others;
        for (i, v) in self.0.iter_mut().enumerate() {
            if i != pinned {
                *v *= factor;
            }
        }
        true
    }
}

impl AsRef<[f64]> for SupportVector {
    fn as_ref(&self) -> &[f64] { &self.0 }
}
