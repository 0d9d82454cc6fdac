// crates/sp_cli/src/args.rs
//
// Offline CLI argument parsing surface: types, value parsers, path checks.
//
// Rules:
// - Inputs are local files only (reject any scheme:// path)
// - --support takes either positional percents or `id=pct` pairs, not both
// - --threshold may repeat; each is `id=pct`
// - --validate-only loads and checks the scenario without running the engine

use clap::{Parser, ValueEnum};
use std::{
    fs,
    path::{Path, PathBuf},
};

use sp_core::{
    entities::{committee_index, Committee, SupportVector},
    ids::CommitteeId,
    variables::AllocationMethod,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// National support as given on the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum SupportArg {
    /// One percent per committee, in scenario order.
    Positional(Vec<f64>),
    /// `id=pct` pairs; committees not named keep the scenario value (or 0).
    Named(Vec<(CommitteeId, f64)>),
}

/// Parsed CLI arguments (raw).
#[derive(Debug, Parser, Clone)]
#[command(
    name = "sp",
    disable_help_subcommand = true,
    about = "Project national support onto district seats and list majority coalitions"
)]
pub struct Args {
    /// Scenario JSON: committees, districts, optional support and params.
    #[arg(long)]
    pub scenario: PathBuf,

    /// Allocation method: dhondt | sainte_lague | hare_niemeyer (default: scenario params).
    #[arg(long, value_parser = parse_method)]
    pub method: Option<AllocationMethod>,

    /// National support, `14.4,8.6,...` in committee order or `pis=35.4,ko=30.7`.
    #[arg(long, value_parser = parse_support)]
    pub support: Option<SupportArg>,

    /// Threshold override `id=pct` (repeatable).
    #[arg(long = "threshold", value_parser = parse_threshold)]
    pub thresholds: Vec<(CommitteeId, f64)>,

    /// Keep this committee's support fixed and scale the others down when the total exceeds 100.
    #[arg(long)]
    pub pin: Option<CommitteeId>,

    /// Seats needed for a governing majority (default: scenario params, else half plus one).
    #[arg(long)]
    pub majority: Option<u32>,

    /// Output format for stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the result document as canonical JSON to this file.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Validate the scenario only, do not run the engine.
    #[arg(long)]
    pub validate_only: bool,

    /// Suppress non-essential stderr output.
    #[arg(long, short)]
    pub quiet: bool,

    /// Debug-level logging (overridden by RUST_LOG).
    #[arg(long, short, conflicts_with = "quiet")]
    pub verbose: bool,
}

/// Errors surfaced by argument parsing/validation.
#[derive(Debug, PartialEq)]
pub enum CliError {
    NonLocalPath(String),
    NotFound(String),
    UnknownCommittee(String),
    BadSupport(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use CliError::*;
        match self {
            NonLocalPath(p) => write!(f, "path must be local file (no scheme): {p}"),
            NotFound(p) => write!(f, "file not found: {p}"),
            UnknownCommittee(id) => write!(f, "unknown committee: {id}"),
            BadSupport(s) => write!(f, "invalid support: {s}"),
        }
    }
}
impl std::error::Error for CliError {}

pub fn parse_method(s: &str) -> Result<AllocationMethod, String> {
    s.parse::<AllocationMethod>().map_err(|e| e.to_string())
}

fn parse_pct(s: &str) -> Result<f64, String> {
    let v: f64 = s.trim().parse().map_err(|_| format!("not a number: {s:?}"))?;
    if !(v.is_finite() && (0.0..=100.0).contains(&v)) {
        return Err(format!("percent out of range 0..=100: {s}"));
    }
    Ok(v)
}

fn parse_pair(s: &str) -> Result<(CommitteeId, f64), String> {
    let (id, pct) = s.split_once('=').ok_or_else(|| format!("expected id=pct, got {s:?}"))?;
    let id: CommitteeId = id.trim().parse().map_err(|e: sp_core::CoreError| e.to_string())?;
    Ok((id, parse_pct(pct)?))
}

/// `id=pct`
pub fn parse_threshold(s: &str) -> Result<(CommitteeId, f64), String> {
    parse_pair(s)
}

/// `a,b,c` (percents) or `id=pct,id=pct`.
pub fn parse_support(s: &str) -> Result<SupportArg, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).filter(|p| !p.is_empty()).collect();
    if parts.is_empty() {
        return Err("empty support list".into());
    }
    let named = parts.iter().filter(|p| p.contains('=')).count();
    match named {
        0 => parts.iter().map(|p| parse_pct(p)).collect::<Result<_, _>>().map(SupportArg::Positional),
        n if n == parts.len() => {
            parts.iter().map(|p| parse_pair(p)).collect::<Result<_, _>>().map(SupportArg::Named)
        }
        _ => Err("mix of positional and id=pct entries".into()),
    }
}

impl SupportArg {
    /// Resolve against the committee list, starting from `base` for named entries.
    pub fn resolve(&self, committees: &[Committee], base: Option<&SupportVector>) -> Result<Vec<f64>, CliError> {
        match self {
            SupportArg::Positional(v) => {
                if v.len() != committees.len() {
                    return Err(CliError::BadSupport(format!(
                        "expected {} values, got {}",
                        committees.len(),
                        v.len()
                    )));
                }
                Ok(v.clone())
            }
            SupportArg::Named(pairs) => {
                let mut out = base.map(|b| b.as_slice().to_vec()).unwrap_or_else(|| vec![0.0; committees.len()]);
                for (id, pct) in pairs {
                    let i = committee_index(committees, id).ok_or_else(|| CliError::UnknownCommittee(id.to_string()))?;
                    out[i] = *pct;
                }
                Ok(out)
            }
        }
    }
}

/// Reject any explicit URI scheme (e.g., http://, https://, file://).
#[inline]
fn has_scheme(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    lower.contains("://") || lower.starts_with("http:") || lower.starts_with("https:") || lower.starts_with("file:")
}

#[inline]
fn ensure_local_path(p: &Path) -> Result<(), CliError> {
    match p.to_str() {
        Some(s) if has_scheme(s) => Err(CliError::NonLocalPath(s.to_string())),
        _ => Ok(()),
    }
}

/// Ensure a path is local and exists as a regular file.
fn ensure_local_exists(p: &Path, label: &'static str) -> Result<(), CliError> {
    ensure_local_path(p)?;
    match fs::metadata(p) {
        Ok(meta) if meta.is_file() => Ok(()),
        _ => Err(CliError::NotFound(format!("{label} {}", p.display()))),
    }
}

/// Path checks shared by `parse_and_validate` and tests.
pub fn validate_args(args: &Args) -> Result<(), CliError> {
    ensure_local_exists(&args.scenario, "--scenario")?;
    if let Some(out) = &args.out {
        ensure_local_path(out)?;
    }
    Ok(())
}

/// Entry point used by main.rs
pub fn parse_and_validate() -> Result<Args, CliError> {
    let args = Args::parse();
    validate_args(&args)?;
    Ok(args)
}
