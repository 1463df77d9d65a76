//! Deterministic selection of the link to cut this turn.

use std::collections::BTreeMap;

use crate::core::distance::Estimates;
use crate::core::graph::{Graph, LinkId, NodeId};

/// Find an active link from the adversary's node straight into a gateway.
///
/// Returns the first such link in incident order.
pub fn immediate_cut(graph: &Graph, adversary: NodeId) -> Option<LinkId> {
    graph.gateway_links(adversary).next()
}

/// Dangerous nodes grouped by urgency score, lowest score first.
///
/// Within a group, nodes keep ascending node id order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankingTable {
    groups: BTreeMap<i64, Vec<NodeId>>,
}

impl RankingTable {
    /// The most urgent node and its score.
    pub fn first(&self) -> Option<(i64, NodeId)> {
        self.groups
            .iter()
            .next()
            .and_then(|(&score, nodes)| nodes.first().map(|&node| (score, node)))
    }

    pub fn groups(&self) -> impl Iterator<Item = (i64, &[NodeId])> {
        self.groups
            .iter()
            .map(|(&score, nodes)| (score, nodes.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Score every estimated node and group them into a fresh table.
///
/// A node's score is its simulated distance less one per extra gateway it
/// reaches directly, so a node threatening several gateways ranks earlier.
pub fn rank_by_urgency(graph: &Graph, estimates: &Estimates) -> RankingTable {
    let mut groups: BTreeMap<i64, Vec<NodeId>> = BTreeMap::new();
    for (node, estimate) in estimates.iter() {
        let gateways = graph.gateway_degree(node) as i64;
        let score = estimate.simulated - (gateways - 1);
        groups.entry(score).or_default().push(node);
    }
    RankingTable { groups }
}

/// Pick the gateway link of the most urgent node, if it still has one.
pub fn ranked_cut(graph: &Graph, table: &RankingTable) -> Option<(i64, NodeId, LinkId)> {
    let (score, node) = table.first()?;
    let link = graph.gateway_links(node).next()?;
    Some((score, node, link))
}
