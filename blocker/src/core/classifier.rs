//! Deterministic classification of dangerous nodes.
//!
//! A node is dangerous when at least one of its active links leads straight
//! into a gateway.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::graph::{Graph, NodeId};

/// How the dangerous set is recomputed between turns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefreshPolicy {
    /// Full scan on the first turn, then re-check only last turn's members.
    ///
    /// Sound because links are only ever severed and gateways are fixed at
    /// setup: a node outside the set cannot gain an active gateway link.
    #[default]
    Incremental,
    /// Scan every node on every turn.
    Full,
}

/// Returns true if `node` has an active link to a gateway.
pub fn is_dangerous(graph: &Graph, node: NodeId) -> bool {
    graph.gateway_links(node).next().is_some()
}

/// Tracks the dangerous-node set across turns.
#[derive(Debug, Clone, Default)]
pub struct DangerClassifier {
    policy: RefreshPolicy,
    dangerous: BTreeSet<NodeId>,
    scanned: bool,
}

impl DangerClassifier {
    pub fn new(policy: RefreshPolicy) -> Self {
        Self {
            policy,
            dangerous: BTreeSet::new(),
            scanned: false,
        }
    }

    /// Bring the set in line with the live graph.
    pub fn refresh(&mut self, graph: &Graph) {
        if !self.scanned || self.policy == RefreshPolicy::Full {
            self.dangerous = graph
                .nodes()
                .map(|node| node.id)
                .filter(|&id| is_dangerous(graph, id))
                .collect();
            self.scanned = true;
            return;
        }
        self.dangerous.retain(|&id| is_dangerous(graph, id));
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.dangerous.contains(&node)
    }

    pub fn len(&self) -> usize {
        self.dangerous.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dangerous.is_empty()
    }

    /// Members in ascending node id.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.dangerous.iter().copied()
    }
}
