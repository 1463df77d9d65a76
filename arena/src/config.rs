//! Agent configuration merging.
//!
//! Applies case-specific overrides to the default agent configuration.

use blocker::io::config::AgentConfig;

use crate::case::CaseConfig;

/// Apply case configuration overrides to the base agent config.
///
/// The turn cap always comes from the case's `adversary.max_turns`, so the
/// agent itself plays without one.
pub fn apply_case_config(mut base: AgentConfig, overrides: &CaseConfig) -> AgentConfig {
    if let Some(refresh) = overrides.refresh {
        base.refresh = refresh;
    }
    base.max_turns = 0;
    base
}
