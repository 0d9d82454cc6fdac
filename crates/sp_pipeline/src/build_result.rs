//! build_result.rs
//! Assemble the serializable result document, hash its idless canonical form,
//! and stamp it with `RES:<sha256>`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sp_algo::{Coalition, Committee, CommitteeId, DistrictNumber};
use sp_core::variables::AllocationMethod;
use sp_io::hasher;

use crate::{aggregate::ProjectionOutcome, PipelineError};

/// Engine version token echoed in every result.
pub const ENGINE_VERSION: &str = concat!("SP-ENGINE v", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NationalRow {
    pub committee: CommitteeId,
    pub label: String,
    pub support: f64,
    pub threshold: f64,
    pub seats: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictRow {
    pub number: DistrictNumber,
    pub seats: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leader: Option<CommitteeId>,
    pub local_support: BTreeMap<CommitteeId, f64>,
    pub mandates: BTreeMap<CommitteeId, u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultDoc {
    pub id: String, // "RES:<hex64>"
    #[serde(flatten)]
    pub body: ResultBody,
}

/// Everything in the result except its id; this is what gets hashed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultBody {
    pub engine_version: String,
    pub method: AllocationMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_sha256: Option<String>,
    pub total_seats: u32,
    pub majority: u32,
    pub national: Vec<NationalRow>,
    pub districts: Vec<DistrictRow>,
    /// Coalition descriptions, best first; empty when none reaches the majority.
    pub coalitions: Vec<String>,
}

/// Caller-provided pieces of a result.
#[derive(Debug, Clone, Copy)]
pub struct ResultInputs<'a> {
    pub committees: &'a [Committee],
    pub support: &'a [f64],
    pub outcome: &'a ProjectionOutcome,
    pub coalitions: &'a [Coalition],
    pub majority: u32,
    pub input_sha256: Option<&'a str>,
}

pub fn build_result(inp: ResultInputs<'_>) -> Result<ResultDoc, PipelineError> {
    let ids: Vec<&CommitteeId> = inp.committees.iter().map(|c| &c.id).collect();
    if inp.support.len() != ids.len() || inp.outcome.national_seats.len() != ids.len() {
        return Err(PipelineError::Validate(format!(
            "result inputs misaligned: {} committees, {} support values, {} seat totals",
            ids.len(),
            inp.support.len(),
            inp.outcome.national_seats.len()
        )));
    }

    let national = inp
        .committees
        .iter()
        .zip(inp.support)
        .zip(&inp.outcome.national_seats)
        .map(|((c, &support), &seats)| NationalRow {
            committee: c.id.clone(),
            label: c.label().to_string(),
            support,
            threshold: c.threshold,
            seats,
        })
        .collect();

    let districts = inp
        .outcome
        .districts
        .iter()
        .map(|d| DistrictRow {
            number: d.number,
            seats: d.seats,
            leader: d.leader().and_then(|i| ids.get(i)).map(|id| (*id).clone()),
            local_support: ids.iter().map(|id| (*id).clone()).zip(d.local_support.iter().copied()).collect(),
            mandates: ids.iter().map(|id| (*id).clone()).zip(d.mandates.iter().copied()).collect(),
        })
        .collect();

    let body = ResultBody {
        engine_version: ENGINE_VERSION.to_string(),
        method: inp.outcome.method,
        input_sha256: inp.input_sha256.map(str::to_string),
        total_seats: inp.outcome.total_seats(),
        majority: inp.majority,
        national,
        districts,
        coalitions: inp.coalitions.iter().map(Coalition::describe).collect(),
    };

    let id = hasher::res_id_from_canonical(&body)?;
    Ok(ResultDoc { id, body })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::DistrictResult;
    use assert_json_diff::assert_json_include;
    use serde_json::json;

    fn fixture() -> (Vec<Committee>, ProjectionOutcome) {
        let cs = vec![
            Committee::new("a".parse().unwrap(), "Alpha", 5.0).unwrap().with_short_name("A"),
            Committee::new("b".parse().unwrap(), "Beta", 5.0).unwrap(),
        ];
        let outcome = ProjectionOutcome {
            method: AllocationMethod::DHondt,
            national_seats: vec![6, 4],
            districts: vec![DistrictResult {
                number: DistrictNumber(1),
                seats: 10,
                local_support: vec![60.0, 40.0],
                mandates: vec![6, 4],
            }],
        };
        (cs, outcome)
    }

    #[test]
    fn result_shape_and_id() {
        let (cs, outcome) = fixture();
        let doc = build_result(ResultInputs {
            committees: &cs,
            support: &[60.0, 40.0],
            outcome: &outcome,
            coalitions: &[],
            majority: 6,
            input_sha256: Some("abc"),
        })
        .unwrap();

        assert!(doc.id.starts_with("RES:"));
        let v = serde_json::to_value(&doc).unwrap();
        assert_json_include!(
            actual: v,
            expected: json!({
                "method": "dhondt",
                "total_seats": 10,
                "majority": 6,
                "input_sha256": "abc",
                "national": [
                    { "committee": "a", "label": "A", "seats": 6 },
                    { "committee": "b", "label": "b", "seats": 4 }
                ],
                "districts": [
                    { "number": 1, "leader": "a", "mandates": { "a": 6, "b": 4 } }
                ],
                "coalitions": []
            })
        );
    }

    #[test]
    fn id_depends_on_content_only() {
        let (cs, outcome) = fixture();
        let inputs = ResultInputs {
            committees: &cs,
            support: &[60.0, 40.0],
            outcome: &outcome,
            coalitions: &[],
            majority: 6,
            input_sha256: None,
        };
        let a = build_result(inputs).unwrap();
        let b = build_result(inputs).unwrap();
        assert_eq!(a.id, b.id);

        let c = build_result(ResultInputs { majority: 7, ..inputs }).unwrap();
        assert_ne!(a.id, c.id);
    }

    #[test]
    fn misaligned_inputs_are_rejected() {
        let (cs, outcome) = fixture();
        let err = build_result(ResultInputs {
            committees: &cs,
            support: &[100.0],
            outcome: &outcome,
            coalitions: &[],
            majority: 6,
            input_sha256: None,
        })
        .unwrap_err();
        assert!(matches!(err, PipelineError::Validate(_)));
    }
}
