//! Case execution orchestration.
//!
//! Coordinates agent configuration, simulation, and result capture.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use blocker::io::config::AgentConfig;
use chrono::Utc;
use tracing::{debug, info, instrument};

use crate::case::CaseFile;
use crate::config::apply_case_config;
use crate::outcome::Outcome;
use crate::results::{CaptureInput, capture_results};
use crate::simulate::simulate;

/// Result of running a single case.
#[derive(Debug)]
pub struct RunOutcome {
    /// Unique identifier for this arena run.
    pub run_id: String,
    /// Path to the results directory.
    pub results_dir: PathBuf,
    pub outcome: Outcome,
    pub turns: usize,
    pub cuts: usize,
}

/// Run a case end-to-end: simulate the game, then capture results.
#[instrument(skip_all, fields(case_id = %case.case.id, run_num = run_num))]
pub fn run_case(
    results_base: &Path,
    case_path: &Path,
    case: &CaseFile,
    run_num: u32,
) -> Result<RunOutcome> {
    info!("case run started");

    let config = apply_case_config(AgentConfig::default(), &case.agent);
    let started_at = Utc::now();
    let run_id = format!("run-{}-{}", started_at.format("%Y%m%d_%H%M%S_%3f"), run_num);

    debug!("simulating game");
    let simulation = simulate(case, &config).context("simulate game")?;
    let finished_at = Utc::now();

    debug!("capturing results");
    let results_dir = capture_results(
        results_base,
        &CaptureInput {
            case_id: &case.case.id,
            case_path,
            run_id: &run_id,
            config: &config,
            simulation: &simulation,
            started_at,
            finished_at,
        },
    )
    .context("capture results")?;

    info!(
        outcome = ?simulation.outcome,
        turns = simulation.turns.len(),
        results_dir = %results_dir.display(),
        "case run complete"
    );

    Ok(RunOutcome {
        run_id,
        results_dir,
        outcome: simulation.outcome,
        turns: simulation.turns.len(),
        cuts: simulation.cuts.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn runs_case_and_writes_results() {
        let temp = tempfile::tempdir().expect("tempdir");
        let case_path = temp.path().join("chain.toml");
        fs::write(
            &case_path,
            r#"
[case]
id = "chain"

[graph]
nodes = 3
links = [[0, 1], [1, 2]]
gateways = [2]

[adversary]
start = 0
policy = "shortest_path"
"#,
        )
        .expect("write case");
        let case = CaseFile::load(&case_path).expect("load case");

        let outcome =
            run_case(&temp.path().join("results"), &case_path, &case, 1).expect("run case");
        assert_eq!(outcome.outcome, Outcome::Blocked);
        assert_eq!(outcome.cuts, 1);
        assert!(outcome.run_id.starts_with("run-"));
        assert!(outcome.run_id.ends_with("-1"));
        assert!(outcome.results_dir.join("meta.json").is_file());
    }
}
