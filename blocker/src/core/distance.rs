//! Breadth-first distance estimation from the adversary to dangerous nodes.
//!
//! Distances are recorded on the node one hop before a gateway, because that
//! hop is the link worth cutting. Each record also carries a simulated
//! distance that discounts dangerous nodes already crossed on the way: those
//! are threats the agent will have dealt with on earlier turns.

use std::collections::VecDeque;

use serde::Serialize;

use crate::core::classifier::DangerClassifier;
use crate::core::graph::{Graph, LinkId, NodeId};

/// Distance record for one pre-gateway node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Estimate {
    /// Hops from the adversary to the gateway, minus one.
    pub distance: i64,
    /// `distance` less the dangerous nodes crossed before this one.
    pub simulated: i64,
}

/// Per-node estimates for a single turn, indexed by node id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Estimates {
    slots: Vec<Option<Estimate>>,
}

impl Estimates {
    fn empty(node_count: usize) -> Self {
        Self {
            slots: vec![None; node_count],
        }
    }

    pub fn get(&self, node: NodeId) -> Option<Estimate> {
        self.slots.get(node.0).copied().flatten()
    }

    /// Nodes with a recorded estimate, ascending by node id.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Estimate)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.map(|estimate| (NodeId(index), estimate)))
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Keep the candidate unless an equal or shorter distance is already known.
    fn offer(&mut self, node: NodeId, candidate: Estimate) {
        let slot = &mut self.slots[node.0];
        match slot {
            Some(existing) if existing.distance <= candidate.distance => {}
            _ => *slot = Some(candidate),
        }
    }
}

/// One pending BFS item.
#[derive(Debug, Clone, Copy)]
struct Visit {
    node: NodeId,
    via: Option<LinkId>,
    depth: i64,
    /// Dangerous nodes strictly before `node` on this path.
    dangerous_before: i64,
}

/// Run the breadth-first estimate from `adversary` over active links.
///
/// Gateways are terminal: reaching one through a link records an estimate on
/// the link's other endpoint. Non-gateway nodes are marked visited when first
/// enqueued; gateways never are, so every pre-gateway node on the frontier
/// gets its own record. Beyond the start node, a node with a single incident
/// link is a dead end and is not expanded.
pub fn estimate_distances(
    graph: &Graph,
    danger: &DangerClassifier,
    adversary: NodeId,
) -> Estimates {
    let mut estimates = Estimates::empty(graph.node_count());
    let mut visited = vec![false; graph.node_count()];
    let mut queue = VecDeque::new();

    visited[adversary.0] = true;
    queue.push_back(Visit {
        node: adversary,
        via: None,
        depth: 0,
        dangerous_before: 0,
    });

    while let Some(visit) = queue.pop_front() {
        let node = graph.node(visit.node);

        if node.is_gateway
            && let Some(via) = visit.via
        {
            let before = graph.link(via).other(visit.node);
            let distance = visit.depth - 1;
            estimates.offer(
                before,
                Estimate {
                    distance,
                    simulated: distance - (visit.dangerous_before - 1),
                },
            );
            continue;
        }

        if visit.depth != 0 && node.links.len() <= 1 {
            continue;
        }

        let dangerous_before = if danger.contains(visit.node) {
            visit.dangerous_before + 1
        } else {
            visit.dangerous_before
        };

        for (link, next) in graph.active_neighbors(visit.node) {
            if Some(link) == visit.via || visited[next.0] {
                continue;
            }
            if !graph.is_gateway(next) {
                visited[next.0] = true;
            }
            queue.push_back(Visit {
                node: next,
                via: Some(link),
                depth: visit.depth + 1,
                dangerous_before,
            });
        }
    }

    estimates
}
