// crates/sp_cli/src/main.rs
//
// Wires up exit codes, typed error mapping, CLI parsing, logging, the
// validate-only short-circuit, and the full run path
// (load → overrides → engine → result → stdout / --out).

mod args;

mod exitcodes {
    pub const OK: i32 = 0;
    pub const VALIDATION: i32 = 2;
    pub const IO: i32 = 4;
}

use std::process::ExitCode;

use args::{parse_and_validate as parse_cli, Args, CliError, OutputFormat, SupportArg};
use tracing_subscriber::EnvFilter;

use sp_algo::describe_all;
use sp_core::entities::{committee_index, SupportVector};
use sp_io::{canonical_json, loader};
use sp_pipeline::{validate, ElectionEngine, EngineRun, PipelineError, ResultDoc, Severity};

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    /// Scenario shape, registry, parameter or support problems
    Validation(String),
    /// Read/write/path errors
    Io(String),
}

impl std::fmt::Display for MainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MainError::Validation(m) | MainError::Io(m) => f.write_str(m),
        }
    }
}

fn main() -> ExitCode {
    let args = match parse_cli() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("sp: error: {e}");
            let rc = match e {
                CliError::NotFound(_) => exitcodes::IO,
                _ => exitcodes::VALIDATION,
            };
            return ExitCode::from(rc as u8);
        }
    };

    init_tracing(&args);

    let outcome = if args.validate_only { validate_only(&args) } else { run_once(&args) };
    let rc = match outcome {
        Ok(()) => exitcodes::OK,
        Err(e) => {
            eprintln!("sp: error: {e}");
            map_error(&e)
        }
    };
    ExitCode::from(rc as u8)
}

/// stderr subscriber; RUST_LOG wins over the flags.
fn init_tracing(args: &Args) {
    let default = if args.verbose {
        "debug"
    } else if args.quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn map_error(e: &MainError) -> i32 {
    match e {
        MainError::Validation(_) => exitcodes::VALIDATION,
        MainError::Io(_) => exitcodes::IO,
    }
}

fn map_pipeline_err(e: PipelineError) -> MainError {
    match e {
        PipelineError::Validate(m) | PipelineError::Coalition(m) => MainError::Validation(m),
        PipelineError::Io(m) => MainError::Io(m),
    }
}

fn map_io_err(e: sp_io::IoError) -> MainError {
    map_pipeline_err(PipelineError::from(e))
}

/// Load the scenario and apply the file-level overrides (majority, thresholds).
fn load(args: &Args) -> Result<loader::Scenario, MainError> {
    let mut scenario = loader::load_scenario(&args.scenario).map_err(map_io_err)?;
    if let Some(m) = args.majority {
        scenario.params.majority_seats = Some(m);
    }
    if let Some(m) = args.method {
        scenario.params.method = m;
    }
    for (id, pct) in &args.thresholds {
        let i = committee_index(&scenario.committees, id)
            .ok_or_else(|| MainError::Validation(CliError::UnknownCommittee(id.to_string()).to_string()))?;
        scenario.committees[i]
            .set_threshold(*pct)
            .map_err(|e| MainError::Validation(e.to_string()))?;
    }
    Ok(scenario)
}

/// Validate-only path (no engine run, no output file).
/// Exit codes: 0 when no error-level issue, 2 otherwise, 4 on I/O.
fn validate_only(args: &Args) -> Result<(), MainError> {
    let scenario = load(args)?;
    let support = match &args.support {
        Some(s) => Some(resolve_support(s, &scenario)?),
        None => scenario.support.clone(),
    };
    let report = validate(&scenario.committees, &scenario.districts, &scenario.params, support.as_ref());

    if !args.quiet {
        for issue in &report.issues {
            let sev = match issue.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };
            eprintln!("{sev}: {} {:?}: {}", issue.code, issue.where_, issue.message);
        }
    }
    if report.pass {
        if !args.quiet {
            eprintln!("validate-only: scenario OK");
        }
        Ok(())
    } else {
        Err(MainError::Validation(format!("{} validation error(s)", report.errors().count())))
    }
}

fn resolve_support(arg: &SupportArg, scenario: &loader::Scenario) -> Result<SupportVector, MainError> {
    let values = arg
        .resolve(&scenario.committees, scenario.support.as_ref())
        .map_err(|e| MainError::Validation(e.to_string()))?;
    SupportVector::for_committees(values, &scenario.committees).map_err(|e| MainError::Validation(e.to_string()))
}

/// Full run: engine → mandates → coalitions → result document.
fn run_once(args: &Args) -> Result<(), MainError> {
    let scenario = load(args)?;
    let method = scenario.params.method;
    let input_sha256 = scenario.input_sha256.clone();

    let mut support = match &args.support {
        Some(s) => resolve_support(s, &scenario)?,
        None => scenario.support.clone().ok_or_else(|| {
            MainError::Validation("no national support: pass --support or add `support` to the scenario".into())
        })?,
    };

    let engine = ElectionEngine::from_scenario(scenario).map_err(map_pipeline_err)?;

    if let Some(pin) = &args.pin {
        let i = engine
            .committee_index(pin)
            .ok_or_else(|| MainError::Validation(CliError::UnknownCommittee(pin.to_string()).to_string()))?;
        if support.rebalance_pinned(i) {
            tracing::info!(pinned = %pin, total = support.total(), "support rebalanced");
        }
    }
    if support.total() > 100.0 + 1e-9 {
        tracing::warn!(total = support.total(), "national support sums above 100");
    }

    let run = engine.run(&support, method).map_err(map_pipeline_err)?;
    let doc = engine.result_doc(&support, &run, Some(&input_sha256)).map_err(map_pipeline_err)?;

    if let Some(out) = &args.out {
        canonical_json::write_canonical_file(out, &doc).map_err(map_io_err)?;
        if !args.quiet {
            eprintln!("wrote {}", out.display());
        }
    }

    match args.format {
        OutputFormat::Json => {
            let s = serde_json::to_string_pretty(&doc).map_err(|e| MainError::Io(format!("stdout json: {e}")))?;
            println!("{s}");
        }
        OutputFormat::Text => print!("{}", render_text(&engine, &run, &doc)),
    }
    Ok(())
}

fn render_text(engine: &ElectionEngine, run: &EngineRun, doc: &ResultDoc) -> String {
    use std::fmt::Write as _;

    let body = &doc.body;
    let mut s = String::new();
    let _ = writeln!(s, "method: {}  seats: {}  majority: {}", body.method, body.total_seats, body.majority);
    let _ = writeln!(s, "{:<8} {:>8} {:>10} {:>6}", "list", "support", "threshold", "seats");
    for row in &body.national {
        let _ = writeln!(s, "{:<8} {:>8.2} {:>10.2} {:>6}", row.label, row.support, row.threshold, row.seats);
    }

    let committees = engine.committees();
    for d in &run.outcome.districts {
        let parts: Vec<String> = d
            .breakdown()
            .into_iter()
            .map(|(i, seats)| format!("{} {seats}", committees[i].label()))
            .collect();
        let _ = writeln!(s, "district {} ({} seats): {}", d.number, d.seats, parts.join(", "));
    }

    let _ = writeln!(s, "{}", describe_all(&run.coalitions));
    let _ = writeln!(s, "id: {}", doc.id);
    s
}
