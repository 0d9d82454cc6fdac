//! crates/sp_pipeline/src/validate.rs
//! Structural & semantic validation before any computation.
//!
//! Errors block a run; warnings describe inputs that are legal but produce
//! degenerate output (a committee that can never win a seat, a majority no
//! coalition can reach, ...).

use sp_algo::{build_baseline, HistoricalBaseline, MAX_COALITION_COMMITTEES};
use sp_core::{
    entities::{committee_index, validate_registry, Committee, District, SupportVector},
    ids::{CommitteeId, DistrictNumber},
    variables::{OverrideRule, Params},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

/// Where the issue occurred.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntityRef {
    Root,
    Param(&'static str),
    Committee(CommitteeId),
    District(DistrictNumber),
    Support,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub code: &'static str,
    pub message: String,
    pub where_: EntityRef,
}

/// pass = no Error; issues sorted by (code, where, message).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub pass: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }
}

/// Validate a scenario. `support` is optional: a session may be set up before
/// any national vector is entered.
pub fn validate(
    committees: &[Committee],
    districts: &[District],
    params: &Params,
    support: Option<&SupportVector>,
) -> ValidationReport {
    let baseline = build_baseline(districts, committees);
    validate_with_baseline(committees, districts, params, support, &baseline)
}

/// [`validate`] over a baseline the caller already built from the same
/// committees and districts.
pub fn validate_with_baseline(
    committees: &[Committee],
    districts: &[District],
    params: &Params,
    support: Option<&SupportVector>,
    baseline: &HistoricalBaseline,
) -> ValidationReport {
    let mut issues = Vec::new();

    if let Err(e) = validate_registry(committees, districts) {
        issues.push(error("Registry.Invalid", e.to_string(), EntityRef::Root));
    }
    if districts.is_empty() {
        issues.push(error("Registry.NoDistricts", "no districts loaded".into(), EntityRef::Root));
    }
    if committees.len() > MAX_COALITION_COMMITTEES {
        issues.push(warning(
            "Coalition.TooManyCommittees",
            format!(
                "{} committees; mandates are computed but coalition search supports at most {MAX_COALITION_COMMITTEES}",
                committees.len()
            ),
            EntityRef::Root,
        ));
    }

    issues.extend(check_overrides(committees, districts, params));
    issues.extend(check_coalition_rules(committees, params));
    issues.extend(check_majority(districts, params));
    issues.extend(check_baseline(committees, districts, baseline));
    if let Some(sv) = support {
        issues.extend(check_support(committees, sv));
    }

    issues.sort_by(|a, b| {
        a.code.cmp(b.code).then_with(|| a.where_.cmp(&b.where_)).then_with(|| a.message.cmp(&b.message))
    });

    ValidationReport { pass: !issues.iter().any(|i| i.severity == Severity::Error), issues }
}

fn error(code: &'static str, message: String, where_: EntityRef) -> ValidationIssue {
    ValidationIssue { severity: Severity::Error, code, message, where_ }
}

fn warning(code: &'static str, message: String, where_: EntityRef) -> ValidationIssue {
    ValidationIssue { severity: Severity::Warning, code, message, where_ }
}

fn check_overrides(committees: &[Committee], districts: &[District], params: &Params) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for o in &params.overrides {
        if committee_index(committees, &o.committee).is_none() {
            issues.push(error(
                "Override.UnknownCommittee",
                format!("override names unknown committee {}", o.committee),
                EntityRef::District(o.district),
            ));
        }
        if !districts.iter().any(|d| d.number == o.district) {
            issues.push(warning(
                "Override.UnknownDistrict",
                format!("override for district {} has no effect", o.district),
                EntityRef::District(o.district),
            ));
        }
        match o.rule {
            OverrideRule::CapAtNationalMultiple { factor } if !(factor.is_finite() && factor >= 0.0) => {
                issues.push(error(
                    "Override.BadFactor",
                    format!("cap factor must be finite and non-negative, got {factor}"),
                    EntityRef::District(o.district),
                ));
            }
            OverrideRule::CapAtNationalMultiple { .. } => {}
        }
    }
    issues
}

fn check_coalition_rules(committees: &[Committee], params: &Params) -> Vec<ValidationIssue> {
    let rules = &params.coalition_rules;
    rules
        .forbidden_pairs
        .iter()
        .flat_map(|(a, b)| [a, b])
        .chain(rules.excluded.iter())
        .filter(|id| committee_index(committees, id).is_none())
        .map(|id| {
            error(
                "Coalition.UnknownCommittee",
                format!("coalition rule names unknown committee {id}"),
                EntityRef::Committee(id.clone()),
            )
        })
        .collect()
}

fn check_majority(districts: &[District], params: &Params) -> Vec<ValidationIssue> {
    let total: u32 = districts.iter().map(|d| d.seats).sum();
    match params.majority_seats {
        Some(0) => vec![error("Params.Majority", "majority must be at least 1 seat".into(), EntityRef::Param("majority_seats"))],
        Some(m) if m > total => vec![warning(
            "Params.Majority",
            format!("majority {m} exceeds the {total} seats available; no coalition can form"),
            EntityRef::Param("majority_seats"),
        )],
        _ => Vec::new(),
    }
}

/// A zero baseline makes every deviation 0: the committee never wins a seat.
fn check_baseline(committees: &[Committee], districts: &[District], baseline: &HistoricalBaseline) -> Vec<ValidationIssue> {
    if districts.is_empty() {
        return Vec::new();
    }
    committees
        .iter()
        .zip(baseline.values())
        .filter(|&(_, &v)| v == 0.0)
        .map(|(c, _)| {
            warning(
                "Baseline.Zero",
                format!("committee {} has no historical support; it projects to 0 everywhere", c.id),
                EntityRef::Committee(c.id.clone()),
            )
        })
        .collect()
}

fn check_support(committees: &[Committee], sv: &SupportVector) -> Vec<ValidationIssue> {
    if sv.len() != committees.len() {
        return vec![error(
            "Support.Length",
            format!("expected {} support values, got {}", committees.len(), sv.len()),
            EntityRef::Support,
        )];
    }
    let total = sv.total();
    if total > 100.0 + 1e-9 {
        vec![warning("Support.Overfull", format!("national support sums to {total:.2} > 100"), EntityRef::Support)]
    } else {
        Vec::new()
    }
}
