//! sp_pipeline: engine surface (validate → project → filter → allocate → aggregate → coalitions → result).
//! Delegates file/JSON/hashing to `sp_io` and all math to `sp_algo`; this crate
//! owns orchestration, session state (thresholds), and logging.

use std::fmt;

use sp_algo::{
    search_coalitions, Coalition, CoalitionError, Committee, CommitteeId, District,
    HistoricalBaseline, LocalSupportProjector, ProjectionError,
};
use sp_core::{
    entities::{committee_index, SupportVector},
    variables::{AllocationMethod, Params},
    CoreError,
};
use sp_io::loader::Scenario;

pub mod aggregate;
pub mod build_result;
pub mod validate;

pub use aggregate::{compute_mandates, DistrictResult, ProjectionOutcome, SupportExtent};
pub use build_result::{build_result, ResultDoc, ResultInputs, ENGINE_VERSION};
pub use validate::{validate, validate_with_baseline, EntityRef, Severity, ValidationIssue, ValidationReport};

/// Single error surface for the pipeline orchestration.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    Io(String),
    Validate(String),
    Coalition(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Io(m) => write!(f, "io: {m}"),
            PipelineError::Validate(m) => write!(f, "validation: {m}"),
            PipelineError::Coalition(m) => write!(f, "coalition: {m}"),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<sp_io::IoError> for PipelineError {
    fn from(e: sp_io::IoError) -> Self {
        use sp_io::IoError as E;
        match e {
            E::Json { .. } | E::Invalid(_) => PipelineError::Validate(e.to_string()),
            E::Read { .. } | E::Path(_) | E::Hash(_) => PipelineError::Io(e.to_string()),
        }
    }
}

impl From<CoreError> for PipelineError {
    fn from(e: CoreError) -> Self {
        PipelineError::Validate(e.to_string())
    }
}

impl From<ProjectionError> for PipelineError {
    fn from(e: ProjectionError) -> Self {
        PipelineError::Validate(e.to_string())
    }
}

impl From<CoalitionError> for PipelineError {
    fn from(e: CoalitionError) -> Self {
        PipelineError::Coalition(e.to_string())
    }
}

/// Mandates plus the coalitions they allow.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineRun {
    pub outcome: ProjectionOutcome,
    pub coalitions: Vec<Coalition>,
}

/// A projection session over one committee list and district set.
///
/// The historical baseline is built once here. Thresholds are the only
/// committee field that may change afterwards.
#[derive(Debug, Clone)]
pub struct ElectionEngine {
    committees: Vec<Committee>,
    districts: Vec<District>,
    params: Params,
    projector: LocalSupportProjector,
}

impl ElectionEngine {
    pub fn new(committees: Vec<Committee>, districts: Vec<District>, params: Params) -> Result<Self, PipelineError> {
        let baseline = HistoricalBaseline::build(&districts, &committees);
        let report = validate_with_baseline(&committees, &districts, &params, None, &baseline);
        for w in report.warnings() {
            tracing::warn!(code = w.code, "{}", w.message);
        }
        if !report.pass {
            let msg = report.errors().map(|e| format!("{}: {}", e.code, e.message)).collect::<Vec<_>>().join("; ");
            return Err(PipelineError::Validate(msg));
        }

        let projector = LocalSupportProjector::with_baseline(baseline, &committees, &params.overrides)?;
        tracing::debug!(
            committees = committees.len(),
            districts = districts.len(),
            seats = projector.baseline().total_seats(),
            "engine ready"
        );
        Ok(Self { committees, districts, params, projector })
    }

    pub fn from_scenario(s: Scenario) -> Result<Self, PipelineError> {
        Self::new(s.committees, s.districts, s.params)
    }

    pub fn committees(&self) -> &[Committee] { &self.committees }

    pub fn districts(&self) -> &[District] { &self.districts }

    pub fn params(&self) -> &Params { &self.params }

    pub fn baseline(&self) -> &HistoricalBaseline { self.projector.baseline() }

    pub fn total_seats(&self) -> u32 {
        self.districts.iter().map(|d| d.seats).sum()
    }

    /// Configured majority, or half the house plus one.
    pub fn majority(&self) -> u32 {
        self.params.majority_for(self.total_seats())
    }

    pub fn committee_index(&self, id: &CommitteeId) -> Option<usize> {
        committee_index(&self.committees, id)
    }

    pub fn set_threshold(&mut self, id: &CommitteeId, pct: f64) -> Result<(), PipelineError> {
        let i = self
            .committee_index(id)
            .ok_or_else(|| PipelineError::Validate(CoreError::UnknownCommittee(id.to_string()).to_string()))?;
        self.committees[i].set_threshold(pct)?;
        tracing::debug!(committee = %id, threshold = pct, "threshold updated");
        Ok(())
    }

    fn check_support(&self, support: &SupportVector) -> Result<(), PipelineError> {
        if support.len() != self.committees.len() {
            return Err(CoreError::LengthMismatch { expected: self.committees.len(), got: support.len() }.into());
        }
        Ok(())
    }

    /// Project, filter and allocate every district under `method`.
    pub fn compute_mandates(
        &self,
        support: &SupportVector,
        method: AllocationMethod,
    ) -> Result<ProjectionOutcome, PipelineError> {
        self.check_support(support)?;
        Ok(compute_mandates(&self.projector, &self.committees, &self.districts, support.as_slice(), method))
    }

    /// Majority coalitions for an outcome computed from `support`.
    pub fn coalitions(
        &self,
        outcome: &ProjectionOutcome,
        support: &SupportVector,
    ) -> Result<Vec<Coalition>, PipelineError> {
        self.check_support(support)?;
        let found = search_coalitions(
            &outcome.national_seats,
            support.as_slice(),
            &self.committees,
            &self.params.coalition_rules,
            self.majority(),
        )?;
        tracing::debug!(count = found.len(), majority = self.majority(), "coalitions found");
        Ok(found)
    }

    /// Mandates and coalitions in one go.
    pub fn run(&self, support: &SupportVector, method: AllocationMethod) -> Result<EngineRun, PipelineError> {
        let outcome = self.compute_mandates(support, method)?;
        let coalitions = self.coalitions(&outcome, support)?;
        Ok(EngineRun { outcome, coalitions })
    }

    /// Result document for a finished run.
    pub fn result_doc(
        &self,
        support: &SupportVector,
        run: &EngineRun,
        input_sha256: Option<&str>,
    ) -> Result<ResultDoc, PipelineError> {
        build_result(ResultInputs {
            committees: &self.committees,
            support: support.as_slice(),
            outcome: &run.outcome,
            coalitions: &run.coalitions,
            majority: self.majority(),
            input_sha256,
        })
    }
}
