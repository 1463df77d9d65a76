//! Result capture and persistence.
//!
//! Writes run metadata, the effective agent config, and the per-turn
//! transcript to the results directory for later analysis.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use blocker::io::config::{AgentConfig, write_config};
use blocker::io::transcript::TranscriptWriter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, instrument, warn};

use crate::outcome::Outcome;
use crate::simulate::Simulation;

/// Input for capturing results from a completed run.
#[derive(Debug)]
pub struct CaptureInput<'a> {
    pub case_id: &'a str,
    pub case_path: &'a Path,
    pub run_id: &'a str,
    pub config: &'a AgentConfig,
    pub simulation: &'a Simulation,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Metadata for an arena run, persisted to `meta.json`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RunMeta {
    pub case_id: String,
    pub run_id: String,
    /// SHA-256 hash of the case file for reproducibility tracking.
    pub case_hash: String,
    pub outcome: Outcome,
    pub turns: usize,
    pub cuts: Vec<(usize, usize)>,
    pub final_position: usize,
    pub start_time: String,
    pub end_time: String,
    pub duration_secs: f64,
    pub agent_error: Option<String>,
    /// Non-fatal errors encountered during capture.
    pub errors: Vec<String>,
}

/// Persist a finished run under `base_dir/<case>/<run>/`.
#[instrument(skip_all, fields(case_id = %input.case_id, run_id = %input.run_id))]
pub fn capture_results(base_dir: &Path, input: &CaptureInput<'_>) -> Result<PathBuf> {
    let results_dir = results_dir(base_dir, input.case_id, input.run_id);
    fs::create_dir_all(&results_dir)
        .with_context(|| format!("create results dir {}", results_dir.display()))?;

    let mut errors = Vec::new();

    let case_hash = match file_sha256(input.case_path) {
        Ok(hash) => hash,
        Err(err) => {
            errors.push(format!("case hash: {err}"));
            String::new()
        }
    };

    if let Err(err) = write_config(&results_dir.join("agent.toml"), input.config) {
        errors.push(format!("agent.toml: {err:#}"));
    }
    if let Err(err) = write_transcript(&results_dir.join("turns.jsonl"), input.simulation) {
        errors.push(format!("turns.jsonl: {err:#}"));
    }

    if !errors.is_empty() {
        warn!(errors = ?errors, "artifact capture had errors");
    }

    let sim = input.simulation;
    let duration = input.finished_at - input.started_at;
    let meta = RunMeta {
        case_id: input.case_id.to_string(),
        run_id: input.run_id.to_string(),
        case_hash,
        outcome: sim.outcome,
        turns: sim.turns.len(),
        cuts: sim.cuts.clone(),
        final_position: sim.final_position,
        start_time: input.started_at.to_rfc3339(),
        end_time: input.finished_at.to_rfc3339(),
        duration_secs: duration.num_milliseconds() as f64 / 1000.0,
        agent_error: sim.error.clone(),
        errors,
    };

    write_meta(&results_dir.join("meta.json"), &meta)?;
    debug!(results_dir = %results_dir.display(), "results captured");
    Ok(results_dir)
}

pub fn results_dir(base_dir: &Path, case_id: &str, run_id: &str) -> PathBuf {
    base_dir.join(case_id).join(run_id)
}

fn write_transcript(path: &Path, sim: &Simulation) -> Result<()> {
    let mut writer = TranscriptWriter::create(path)?;
    for report in &sim.turns {
        writer.record(report)?;
    }
    Ok(())
}

fn write_meta(path: &Path, meta: &RunMeta) -> Result<()> {
    let contents = serde_json::to_string_pretty(meta).context("serialize meta")?;
    fs::write(path, format!("{contents}\n"))
        .with_context(|| format!("write meta {}", path.display()))?;
    Ok(())
}

fn file_sha256(path: &Path) -> Result<String> {
    let contents = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let mut hasher = Sha256::new();
    hasher.update(contents);
    let digest = hasher.finalize();
    Ok(hex::encode(digest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use blocker::core::graph::{LinkId, NodeId};
    use blocker::core::types::{CutDecision, TurnReport};
    use tempfile::tempdir;

    fn simulation() -> Simulation {
        Simulation {
            outcome: Outcome::Blocked,
            turns: vec![TurnReport {
                turn: 1,
                adversary: NodeId(0),
                dangerous: 1,
                decision: CutDecision::Immediate { link: LinkId(0) },
                cut: Some((NodeId(0), NodeId(1))),
            }],
            cuts: vec![(0, 1)],
            final_position: 0,
            error: None,
        }
    }

    #[test]
    fn results_dir_is_stable() {
        let base = Path::new("/tmp/results");
        let dir = results_dir(base, "case", "run-1");
        assert_eq!(dir, PathBuf::from("/tmp/results/case/run-1"));
    }

    #[test]
    fn writes_meta_config_and_transcript() {
        let temp = tempdir().expect("tempdir");
        let case_path = temp.path().join("case.toml");
        fs::write(&case_path, "[case]\nid = 'case'\n").expect("case");
        let sim = simulation();
        let config = AgentConfig::default();
        let started_at = Utc::now();

        let dir = capture_results(
            &temp.path().join("results"),
            &CaptureInput {
                case_id: "case",
                case_path: &case_path,
                run_id: "run-1",
                config: &config,
                simulation: &sim,
                started_at,
                finished_at: started_at,
            },
        )
        .expect("capture");

        let meta: RunMeta =
            serde_json::from_str(&fs::read_to_string(dir.join("meta.json")).expect("meta"))
                .expect("parse meta");
        assert_eq!(meta.outcome, Outcome::Blocked);
        assert_eq!(meta.cuts, vec![(0, 1)]);
        assert_eq!(meta.case_hash.len(), 64);
        assert!(meta.errors.is_empty());
        assert!(dir.join("agent.toml").is_file());
        let transcript = fs::read_to_string(dir.join("turns.jsonl")).expect("transcript");
        assert_eq!(transcript.lines().count(), 1);
    }

    #[test]
    fn missing_case_file_is_recorded_not_fatal() {
        let temp = tempdir().expect("tempdir");
        let sim = simulation();
        let config = AgentConfig::default();
        let now = Utc::now();
        let dir = capture_results(
            temp.path(),
            &CaptureInput {
                case_id: "case",
                case_path: &temp.path().join("missing.toml"),
                run_id: "run-2",
                config: &config,
                simulation: &sim,
                started_at: now,
                finished_at: now,
            },
        )
        .expect("capture");
        let meta: RunMeta =
            serde_json::from_str(&fs::read_to_string(dir.join("meta.json")).expect("meta"))
                .expect("parse meta");
        assert!(meta.case_hash.is_empty());
        assert!(meta.errors.iter().any(|err| err.starts_with("case hash")));
    }
}
