//! Case file parsing and validation.
//!
//! Cases are TOML files describing a graph, its gateways, and how the
//! simulated adversary moves. See `arena/cases/` for examples.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use blocker::core::classifier::RefreshPolicy;
use blocker::core::invariants::validate_setup;
use blocker::core::setup::Setup;
use serde::Deserialize;

/// A parsed case file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CaseFile {
    pub case: CaseMeta,
    pub graph: CaseGraph,
    pub adversary: AdversaryConfig,
    #[serde(default)]
    pub agent: CaseConfig,
}

/// Case metadata: identifier and free-form description.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CaseMeta {
    /// Unique identifier (slug format: `[a-z0-9_-]+`).
    pub id: String,
    #[serde(default)]
    pub description: String,
}

/// The board: node count, link pairs, gateway ids.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CaseGraph {
    pub nodes: usize,
    pub links: Vec<(usize, usize)>,
    pub gateways: Vec<usize>,
}

/// How the simulated adversary moves.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Step along a shortest active path to the nearest gateway.
    ShortestPath,
    /// Step into an adjacent gateway if possible, else to a random neighbour.
    Random,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AdversaryConfig {
    pub start: usize,
    pub policy: Policy,
    /// Seed for the `random` policy.
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,
}

fn default_max_turns() -> u32 {
    100
}

/// Agent configuration overrides for the case.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct CaseConfig {
    pub refresh: Option<RefreshPolicy>,
}

impl CaseFile {
    /// Load and validate a case file from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("read case {}", path.display()))?;
        let case: CaseFile =
            toml::from_str(&contents).with_context(|| format!("parse case {}", path.display()))?;
        case.validate()
            .with_context(|| format!("validate case {}", path.display()))?;
        Ok(case)
    }

    #[cfg(test)]
    pub fn parse_str(contents: &str) -> Result<Self> {
        let case: CaseFile = toml::from_str(contents).context("parse case")?;
        case.validate()?;
        Ok(case)
    }

    /// The agent-facing setup for this case.
    pub fn setup(&self) -> Setup {
        Setup {
            node_count: self.graph.nodes,
            links: self.graph.links.clone(),
            gateways: self.graph.gateways.clone(),
        }
    }

    fn validate(&self) -> Result<()> {
        validate_case_id(&self.case.id)?;
        let errors = validate_setup(&self.setup());
        if !errors.is_empty() {
            bail!("graph invalid: {}", errors.join("; "));
        }
        if self.graph.gateways.is_empty() {
            bail!("graph.gateways must be non-empty");
        }
        if self.adversary.start >= self.graph.nodes {
            bail!(
                "adversary.start {} out of range 0..{}",
                self.adversary.start,
                self.graph.nodes
            );
        }
        if self.graph.gateways.contains(&self.adversary.start) {
            bail!("adversary.start must not be a gateway");
        }
        if self.adversary.max_turns == 0 {
            bail!("adversary.max_turns must be > 0");
        }
        Ok(())
    }
}

/// Discover and load all case files from a directory.
///
/// Returns cases sorted by id. Errors if duplicate ids are found.
pub fn discover_cases(dir: &Path) -> Result<Vec<CaseFile>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut cases = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read cases dir {}", dir.display()))? {
        let entry = entry.context("read case entry")?;
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("toml") {
            continue;
        }
        cases.push(CaseFile::load(&path)?);
    }
    cases.sort_by(|left, right| left.case.id.cmp(&right.case.id));
    for pair in cases.windows(2) {
        if pair[0].case.id == pair[1].case.id {
            return Err(anyhow!("duplicate case.id {}", pair[0].case.id));
        }
    }
    Ok(cases)
}

fn validate_case_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        bail!("case.id must be non-empty");
    }
    if id.contains('/') || id.contains('\\') {
        bail!("case.id must not contain path separators");
    }
    if id.contains("..") {
        bail!("case.id must not contain '..'");
    }
    if !id
        .chars()
        .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' || ch == '_')
    {
        bail!("case.id must use [a-z0-9_-] only");
    }
    Ok(())
}
