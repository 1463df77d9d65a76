use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::outcome::Outcome;
use crate::results::RunMeta;

#[derive(Debug, Default)]
pub struct ReportSummary {
    pub runs: usize,
    pub blocked: usize,
    pub survived: usize,
    pub breached: usize,
    pub error: usize,
    pub avg_turns: Option<f64>,
    pub avg_cuts: Option<f64>,
}

pub fn load_run_dirs(case_results_dir: &Path) -> Result<Vec<PathBuf>> {
    if !case_results_dir.exists() {
        return Ok(Vec::new());
    }
    let mut dirs = Vec::new();
    for entry in fs::read_dir(case_results_dir)
        .with_context(|| format!("read {}", case_results_dir.display()))?
    {
        let entry = entry.context("read entry")?;
        if entry.path().is_dir() {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    Ok(dirs)
}

pub fn aggregate(case_results_dir: &Path) -> Result<(ReportSummary, Vec<String>)> {
    let mut summary = ReportSummary::default();
    let mut warnings = Vec::new();
    let mut total_turns = 0usize;
    let mut total_cuts = 0usize;

    for run_dir in load_run_dirs(case_results_dir)? {
        let meta_path = run_dir.join("meta.json");
        let meta: RunMeta = match fs::read_to_string(&meta_path)
            .with_context(|| format!("read {}", meta_path.display()))
            .and_then(|contents| serde_json::from_str(&contents).context("parse meta"))
        {
            Ok(meta) => meta,
            Err(err) => {
                warnings.push(format!(
                    "skip {}: meta.json invalid ({err})",
                    run_dir.display()
                ));
                continue;
            }
        };

        summary.runs += 1;
        match meta.outcome {
            Outcome::Blocked => summary.blocked += 1,
            Outcome::Survived => summary.survived += 1,
            Outcome::Breached => summary.breached += 1,
            Outcome::Error => summary.error += 1,
        }
        total_turns += meta.turns;
        total_cuts += meta.cuts.len();
    }

    if summary.runs > 0 {
        let runs = summary.runs as f64;
        summary.avg_turns = Some(total_turns as f64 / runs);
        summary.avg_cuts = Some(total_cuts as f64 / runs);
    }

    Ok((summary, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_meta(path: &Path, outcome: Outcome, turns: usize, cuts: Vec<(usize, usize)>) {
        let meta = RunMeta {
            case_id: "case".to_string(),
            run_id: "run".to_string(),
            case_hash: "hash".to_string(),
            outcome,
            turns,
            cuts,
            final_position: 0,
            start_time: "now".to_string(),
            end_time: "later".to_string(),
            duration_secs: 0.0,
            agent_error: None,
            errors: Vec::new(),
        };
        let contents = serde_json::to_string_pretty(&meta).expect("meta json");
        fs::write(path, format!("{contents}\n")).expect("write meta");
    }

    #[test]
    fn aggregates_runs() {
        let temp = tempdir().expect("tempdir");
        let run1 = temp.path().join("run1");
        let run2 = temp.path().join("run2");
        fs::create_dir_all(&run1).expect("run1");
        fs::create_dir_all(&run2).expect("run2");

        write_meta(&run1.join("meta.json"), Outcome::Blocked, 2, vec![(0, 1), (1, 2)]);
        write_meta(&run2.join("meta.json"), Outcome::Breached, 4, vec![(0, 1)]);

        let (summary, warnings) = aggregate(temp.path()).expect("aggregate");
        assert!(warnings.is_empty());
        assert_eq!(summary.runs, 2);
        assert_eq!(summary.blocked, 1);
        assert_eq!(summary.breached, 1);
        assert_eq!(summary.avg_turns, Some(3.0));
        assert_eq!(summary.avg_cuts, Some(1.5));
    }

    #[test]
    fn invalid_meta_is_skipped_with_warning() {
        let temp = tempdir().expect("tempdir");
        let run = temp.path().join("broken");
        fs::create_dir_all(&run).expect("run");
        fs::write(run.join("meta.json"), "not json").expect("write");

        let (summary, warnings) = aggregate(temp.path()).expect("aggregate");
        assert_eq!(summary.runs, 0);
        assert_eq!(summary.avg_turns, None);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn missing_results_dir_is_empty_report() {
        let temp = tempdir().expect("tempdir");
        let (summary, warnings) = aggregate(&temp.path().join("none")).expect("aggregate");
        assert_eq!(summary.runs, 0);
        assert!(warnings.is_empty());
    }
}
