//! Simulated adversary movement over the agent's live graph.

use std::collections::VecDeque;

use blocker::core::graph::{Graph, NodeId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::case::{AdversaryConfig, Policy};

/// Chooses where the adversary goes next.
pub trait Adversary {
    /// Next node to move to, or `None` to stay put.
    fn next_move(&mut self, graph: &Graph, from: NodeId) -> Option<NodeId>;
}

/// Follows a shortest active path to the nearest gateway.
pub struct ShortestPath;

impl Adversary for ShortestPath {
    fn next_move(&mut self, graph: &Graph, from: NodeId) -> Option<NodeId> {
        let path = nearest_gateway_path(graph, from)?;
        path.get(1).copied()
    }
}

/// Enters an adjacent gateway when it can, otherwise wanders at random.
pub struct RandomWalk {
    rng: StdRng,
}

impl RandomWalk {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Adversary for RandomWalk {
    fn next_move(&mut self, graph: &Graph, from: NodeId) -> Option<NodeId> {
        let neighbors: Vec<NodeId> = graph.active_neighbors(from).map(|(_, n)| n).collect();
        if let Some(&gateway) = neighbors.iter().find(|&&n| graph.is_gateway(n)) {
            return Some(gateway);
        }
        if neighbors.is_empty() {
            return None;
        }
        Some(neighbors[self.rng.gen_range(0..neighbors.len())])
    }
}

/// Build the adversary described by a case.
pub fn from_config(config: &AdversaryConfig) -> Box<dyn Adversary> {
    match config.policy {
        Policy::ShortestPath => Box::new(ShortestPath),
        Policy::Random => Box::new(RandomWalk::new(config.seed)),
    }
}

/// Shortest active path from `from` to the nearest gateway, both ends
/// included. Neighbours are explored in incident order.
pub fn nearest_gateway_path(graph: &Graph, from: NodeId) -> Option<Vec<NodeId>> {
    let mut parent: Vec<Option<NodeId>> = vec![None; graph.node_count()];
    let mut seen = vec![false; graph.node_count()];
    let mut queue = VecDeque::new();
    seen[from.0] = true;
    queue.push_back(from);

    while let Some(node) = queue.pop_front() {
        if graph.is_gateway(node) {
            let mut path = vec![node];
            let mut cursor = node;
            while let Some(prev) = parent[cursor.0] {
                path.push(prev);
                cursor = prev;
            }
            path.reverse();
            return Some(path);
        }
        for (_, next) in graph.active_neighbors(node) {
            if !seen[next.0] {
                seen[next.0] = true;
                parent[next.0] = Some(node);
                queue.push_back(next);
            }
        }
    }
    None
}
