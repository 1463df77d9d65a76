//! CLI command implementations.

use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use crate::case::{CaseFile, discover_cases};
use crate::report::aggregate;
use crate::run::run_case;

/// List all available cases.
pub fn list_cases(repo_root: &Path) -> Result<()> {
    let cases_dir = repo_root.join("arena").join("cases");
    let cases = discover_cases(&cases_dir)?;
    for case in cases {
        if case.case.description.is_empty() {
            println!("{}", case.case.id);
        } else {
            println!("{}\t{}", case.case.id, case.case.description);
        }
    }
    Ok(())
}

/// Run a case by id (optionally multiple times).
pub fn run_case_by_id(repo_root: &Path, case_id: &str, runs: u32) -> Result<()> {
    let cases_dir = repo_root.join("arena").join("cases");
    let case_path = cases_dir.join(format!("{case_id}.toml"));
    if !case_path.exists() {
        bail!("case {} not found at {}", case_id, case_path.display());
    }
    let case = CaseFile::load(&case_path).context("load case")?;
    debug!(case_id, runs, "case loaded");

    let results_base = repo_root.join("arena").join("results");
    info!(case_id, runs, "starting runs");
    for run_num in 1..=runs {
        debug!(case_id, run_num, runs, "starting run");
        let outcome = run_case(&results_base, &case_path, &case, run_num).context("run case")?;
        println!(
            "run: case={} run_id={} outcome={:?} held={} turns={} cuts={} results={}",
            case_id,
            outcome.run_id,
            outcome.outcome,
            outcome.outcome.is_success(),
            outcome.turns,
            outcome.cuts,
            outcome.results_dir.display()
        );
    }
    Ok(())
}

/// Show aggregated results for a case.
pub fn report_case(repo_root: &Path, case_id: &str) -> Result<()> {
    let results_dir = repo_root.join("arena").join("results").join(case_id);
    let (summary, warnings) = aggregate(&results_dir)?;
    println!("report: case={} runs={}", case_id, summary.runs);
    println!(
        "report: blocked={} survived={} breached={} error={}",
        summary.blocked, summary.survived, summary.breached, summary.error
    );
    if let (Some(turns), Some(cuts)) = (summary.avg_turns, summary.avg_cuts) {
        println!("report: avg_turns={:.2} avg_cuts={:.2}", turns, cuts);
    }
    for warning in warnings {
        eprintln!("warning: {}", warning);
    }
    Ok(())
}

/// Remove results for a case.
pub fn clean_case(repo_root: &Path, case_id: &str) -> Result<()> {
    let case_results = repo_root.join("arena").join("results").join(case_id);
    if case_results.exists() {
        std::fs::remove_dir_all(&case_results)
            .with_context(|| format!("remove {}", case_results.display()))?;
    }
    println!("clean: case={} results={}", case_id, case_results.display());
    Ok(())
}
