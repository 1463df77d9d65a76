//! Shared deterministic types for the turn engine.
//!
//! These types define stable contracts between core components and the turn
//! orchestration. They must not depend on I/O.

use serde::Serialize;

use crate::core::graph::{LinkId, NodeId};

/// What the agent decided to do this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CutDecision {
    /// The adversary sits next to a gateway; its link was cut.
    Immediate { link: LinkId },
    /// The most urgent dangerous node had its gateway link cut.
    Ranked {
        link: LinkId,
        node: NodeId,
        score: i64,
    },
    /// Nothing worth cutting this turn.
    Hold,
}

impl CutDecision {
    pub fn link(&self) -> Option<LinkId> {
        match self {
            CutDecision::Immediate { link } | CutDecision::Ranked { link, .. } => Some(*link),
            CutDecision::Hold => None,
        }
    }
}

/// Summary of one played turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnReport {
    /// 1-indexed turn counter.
    pub turn: u32,
    pub adversary: NodeId,
    /// Size of the dangerous set after this turn's refresh.
    pub dangerous: usize,
    pub decision: CutDecision,
    /// Endpoints of the severed link, in stored order.
    pub cut: Option<(NodeId, NodeId)>,
}
