//! Loader: read a local scenario JSON (committees, districts, optional national
//! support and parameters), validate it, normalize district order, and return
//! a typed `Scenario` for the pipeline. No network I/O.
//!
//! Wire shape:
//! ```json
//! {
//!   "committees": [{ "id": "pis", "name": "...", "short_name": "PiS", "threshold": 5 }],
//!   "districts":  [{ "number": 1, "seats": 12, "historical_support": { "pis": 30.1 } }],
//!   "support":    [14.4, 8.6, 35.4, 7.2, 30.7, 0.0, 3.7],
//!   "params":     { "method": "dhondt", "majority_seats": 231 }
//! }
//! ```
//! `committees` falls back to the 2023 Sejm preset; `params` then falls back to
//! the preset parameters too.

#![forbid(unsafe_code)]

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use sp_core::{
    entities::{validate_registry, Committee, District, SupportVector},
    presets,
    variables::Params,
};

use crate::{hasher, IoError, IoResult};

/// Where the committee list and parameters came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScenarioSource {
    /// Committees (and parameters, if any) given in the file.
    File,
    /// Committees taken from the built-in 2023 Sejm preset.
    Sejm2023Preset,
}

/// Loaded, validated, normalized scenario.
#[derive(Clone, Debug)]
pub struct Scenario {
    pub committees: Vec<Committee>,
    /// Sorted ascending by district number.
    pub districts: Vec<District>,
    pub support: Option<SupportVector>,
    pub params: Params,
    pub source: ScenarioSource,
    /// SHA-256 of the canonical JSON of the file as read.
    pub input_sha256: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawScenario {
    #[serde(default)]
    committees: Option<Vec<Committee>>,
    districts: Vec<District>,
    #[serde(default)]
    support: Option<Vec<f64>>,
    #[serde(default)]
    params: Option<Params>,
}

/// Read and validate a scenario file.
pub fn load_scenario(path: &Path) -> IoResult<Scenario> {
    let bytes = std::fs::read(path)
        .map_err(|e| IoError::Read { path: path.display().to_string(), msg: e.to_string() })?;
    let scenario = parse_scenario(&bytes)?;
    tracing::debug!(
        path = %path.display(),
        committees = scenario.committees.len(),
        districts = scenario.districts.len(),
        digest = %scenario.input_sha256,
        "scenario loaded"
    );
    Ok(scenario)
}

/// Parse and validate scenario bytes.
pub fn parse_scenario(bytes: &[u8]) -> IoResult<Scenario> {
    let value: Value = serde_json::from_slice(bytes)?;
    let input_sha256 = hasher::sha256_canonical_value(&value)?;
    let raw: RawScenario = serde_json::from_value(value)?;

    let (committees, params, source) = match (raw.committees, raw.params) {
        (Some(cs), params) => (cs, params.unwrap_or_default(), ScenarioSource::File),
        (None, params) => {
            tracing::info!("no committees in scenario; using the 2023 Sejm preset");
            let params = params.unwrap_or_else(presets::sejm_2023_params);
            (presets::sejm_2023_committees(), params, ScenarioSource::Sejm2023Preset)
        }
    };

    let mut districts = raw.districts;
    districts.sort_by_key(|d| d.number);
    validate_registry(&committees, &districts).map_err(|e| IoError::Invalid(format!("registry: {e}")))?;
    if districts.is_empty() {
        return Err(IoError::Json { pointer: "/districts".into(), msg: "at least one district is required".into() });
    }

    let support = match raw.support {
        Some(v) => Some(
            SupportVector::for_committees(v, &committees)
                .map_err(|e| IoError::Json { pointer: "/support".into(), msg: e.to_string() })?,
        ),
        None => None,
    };

    Ok(Scenario { committees, districts, support, params, source, input_sha256 })
}
