//! JSON-lines transcript of played turns (`blocker play --transcript <path>`).

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::types::TurnReport;

/// Appends one JSON object per turn and flushes after each.
pub struct TranscriptWriter<W: Write> {
    out: W,
}

impl TranscriptWriter<BufWriter<File>> {
    /// Create (or truncate) a transcript file, creating parent directories.
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("create directory {}", parent.display()))?;
        }
        let file =
            File::create(path).with_context(|| format!("create transcript {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> TranscriptWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn record(&mut self, report: &TurnReport) -> Result<()> {
        let line = serde_json::to_string(report).context("serialize turn report")?;
        writeln!(self.out, "{line}").context("write transcript line")?;
        self.out.flush().context("flush transcript")
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::graph::{LinkId, NodeId};
    use crate::core::types::CutDecision;

    fn report(turn: u32, decision: CutDecision, cut: Option<(usize, usize)>) -> TurnReport {
        TurnReport {
            turn,
            adversary: NodeId(0),
            dangerous: 1,
            decision,
            cut: cut.map(|(a, b)| (NodeId(a), NodeId(b))),
        }
    }

    #[test]
    fn writes_one_line_per_turn() {
        let mut writer = TranscriptWriter::new(Vec::new());
        writer
            .record(&report(
                1,
                CutDecision::Immediate { link: LinkId(0) },
                Some((0, 1)),
            ))
            .expect("record");
        writer
            .record(&report(2, CutDecision::Hold, None))
            .expect("record");
        let text = String::from_utf8(writer.into_inner()).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            r#"{"turn":1,"adversary":0,"dangerous":1,"decision":{"kind":"immediate","link":0},"cut":[0,1]}"#
        );
        assert!(lines[1].contains(r#""cut":null"#));
    }

    #[test]
    fn create_makes_parent_directories() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("logs/turns.jsonl");
        let mut writer = TranscriptWriter::create(&path).expect("create");
        writer
            .record(&report(1, CutDecision::Hold, None))
            .expect("record");
        drop(writer);
        let contents = fs::read_to_string(&path).expect("read");
        assert_eq!(contents.lines().count(), 1);
    }
}
