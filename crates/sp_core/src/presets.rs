//! Built-in configuration for the 2023 Sejm election (460 seats, 41 districts).
//!
//! Only committees and parameters live here; district data is loaded by
//! `sp_io` from a scenario file.

use crate::entities::Committee;
use crate::ids::{CommitteeId, DistrictNumber};
use crate::variables::{AllocationMethod, CoalitionRules, DistrictOverride, OverrideRule, Params};

/// Committees in canonical order, with their national thresholds.
/// The residual "others" list has a 100% threshold so it never wins seats.
pub fn sejm_2023_committees() -> Vec<Committee> {
    [
        ("td", "Trzecia Droga", "TD", 5.0),
        ("nl", "Lewica", "NL", 5.0),
        ("pis", "Prawo i Sprawiedliwość", "PiS", 5.0),
        ("konf", "Konfederacja", "KONF", 5.0),
        ("ko", "Koalicja Obywatelska", "KO", 5.0),
        ("rz", "Razem", "RZ", 5.0),
        ("poz", "Pozostałe", "POZ", 100.0),
    ]
    .into_iter()
    .map(|(id, name, short, threshold)| Committee {
        id: token(id),
        name: name.to_string(),
        short_name: Some(short.to_string()),
        threshold,
    })
    .collect()
}

/// Parameters: D'Hondt, majority 231, six incompatible pairs, residual list
/// excluded, and the district-32 cap on "nl" at 1.8× its national support.
pub fn sejm_2023_params() -> Params {
    let pairs = [("pis", "ko"), ("nl", "konf"), ("nl", "pis"), ("rz", "konf"), ("rz", "pis"), ("rz", "ko")];
    Params {
        method: AllocationMethod::DHondt,
        majority_seats: Some(231),
        coalition_rules: CoalitionRules {
            forbidden_pairs: pairs.iter().map(|(a, b)| (token(a), token(b))).collect(),
            excluded: vec![token("poz")],
        },
        overrides: vec![DistrictOverride {
            district: DistrictNumber(32),
            committee: token("nl"),
            rule: OverrideRule::CapAtNationalMultiple { factor: 1.8 },
        }],
    }
}

fn token(s: &str) -> CommitteeId {
    s.parse().unwrap_or_else(|_| unreachable!("preset token {s:?} is a valid committee id"))
}
