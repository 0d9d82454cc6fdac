//! Engine parameters: allocation method, coalition rules, historical-data
//! overrides, and the `Params` bundle with safe defaults.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::ids::{CommitteeId, DistrictNumber};

/// Seat apportionment method applied inside every district.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AllocationMethod {
    /// Highest averages, divisors 1, 2, 3, ...
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "dhondt", alias = "dHondt"))]
    DHondt,
    /// Highest averages, divisors 1, 3, 5, ...
    #[cfg_attr(feature = "serde", serde(rename = "sainte_lague", alias = "SainteLague"))]
    SainteLague,
    /// Largest remainder with the Hare quota.
    #[cfg_attr(feature = "serde", serde(rename = "hare_niemeyer", alias = "HareNiemeyer"))]
    HareNiemeyer,
}

impl AllocationMethod {
    pub const ALL: [AllocationMethod; 3] =
        [AllocationMethod::DHondt, AllocationMethod::SainteLague, AllocationMethod::HareNiemeyer];

    /// Wire token (snake_case).
    pub fn as_str(self) -> &'static str {
        match self {
            AllocationMethod::DHondt => "dhondt",
            AllocationMethod::SainteLague => "sainte_lague",
            AllocationMethod::HareNiemeyer => "hare_niemeyer",
        }
    }
}

impl fmt::Display for AllocationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AllocationMethod {
    type Err = CoreError;

    /// Accepts the wire tokens as well as the legacy selector names
    /// (`dHondt`, `SainteLague`, `HareNiemeyer`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | '\'' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match norm.as_str() {
            "dhondt" => Ok(AllocationMethod::DHondt),
            "saintelague" => Ok(AllocationMethod::SainteLague),
            "hareniemeyer" | "hare" => Ok(AllocationMethod::HareNiemeyer),
            _ => Err(CoreError::UnknownMethod(s.to_string())),
        }
    }
}

/// Correction applied to one committee's projected local support in one district.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum OverrideRule {
    /// Local value may not exceed `factor × national support` of the committee.
    CapAtNationalMultiple { factor: f64 },
}

/// A `(district, committee, rule)` historical-data correction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DistrictOverride {
    pub district: DistrictNumber,
    pub committee: CommitteeId,
    pub rule: OverrideRule,
}

/// Exclusion rules for the coalition search.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoalitionRules {
    /// Pairs of committees that cannot govern together.
    #[cfg_attr(feature = "serde", serde(default))]
    pub forbidden_pairs: Vec<(CommitteeId, CommitteeId)>,
    /// Committees that may not be part of any coalition (e.g. the residual "others" list).
    #[cfg_attr(feature = "serde", serde(default))]
    pub excluded: Vec<CommitteeId>,
}

/// Parameter snapshot for one projection run.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Params {
    pub method: AllocationMethod,
    /// Seats needed to govern. `None` means a simple majority of all seats.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub majority_seats: Option<u32>,
    pub coalition_rules: CoalitionRules,
    pub overrides: Vec<DistrictOverride>,
}

impl Params {
    /// Majority line for a chamber of `total_seats`.
    pub fn majority_for(&self, total_seats: u32) -> u32 {
        self.majority_seats.unwrap_or(total_seats / 2 + 1)
    }
}
