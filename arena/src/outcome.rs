use serde::{Deserialize, Serialize};

/// How a simulated game ended.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// No active path from the adversary to any gateway remains.
    Blocked,
    /// The turn limit was reached with a path still open.
    Survived,
    /// The adversary reached a gateway.
    Breached,
    /// The agent failed with an error.
    Error,
}

impl Outcome {
    /// Blocked and survived games both count as the agent holding.
    pub fn is_success(self) -> bool {
        matches!(self, Outcome::Blocked | Outcome::Survived)
    }
}
