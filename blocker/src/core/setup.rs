//! Initial game description and graph construction.

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::graph::{Graph, NodeId};
use crate::core::invariants::validate_setup;

/// Raw initialisation data: node count, link pairs, gateway ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setup {
    pub node_count: usize,
    /// Endpoint pairs in input order.
    pub links: Vec<(usize, usize)>,
    pub gateways: Vec<usize>,
}

impl Setup {
    /// Validate and build the graph store.
    pub fn build_graph(&self) -> Result<Graph> {
        let errors = validate_setup(self);
        if !errors.is_empty() {
            return Err(anyhow!("setup invariants failed: {}", errors.join("; ")));
        }
        let mut graph = Graph::with_nodes(self.node_count);
        for &(a, b) in &self.links {
            graph.add_link(NodeId(a), NodeId(b))?;
        }
        for &gateway in &self.gateways {
            graph.mark_gateway(NodeId(gateway))?;
        }
        Ok(graph)
    }
}
