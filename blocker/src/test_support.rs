//! Test-only helpers for constructing graphs and agents.

use crate::core::graph::{Graph, NodeId};
use crate::core::setup::Setup;
use crate::io::config::AgentConfig;
use crate::turn::Agent;

/// Build a graph from raw link pairs and gateway ids.
///
/// Panics on invalid input; tests are expected to pass well-formed graphs.
pub fn graph(node_count: usize, links: &[(usize, usize)], gateways: &[usize]) -> Graph {
    let mut graph = Graph::with_nodes(node_count);
    for &(a, b) in links {
        graph.add_link(NodeId(a), NodeId(b)).expect("link endpoints in range");
    }
    for &gateway in gateways {
        graph.mark_gateway(NodeId(gateway)).expect("gateway in range");
    }
    graph
}

/// Setup value matching [`graph`]'s arguments.
pub fn setup(node_count: usize, links: &[(usize, usize)], gateways: &[usize]) -> Setup {
    Setup {
        node_count,
        links: links.to_vec(),
        gateways: gateways.to_vec(),
    }
}

/// Agent with default config over the given graph.
pub fn agent(node_count: usize, links: &[(usize, usize)], gateways: &[usize]) -> Agent {
    Agent::new(&setup(node_count, links, gateways), &AgentConfig::default())
        .expect("valid setup")
}

/// Render a setup plus adversary positions in the game's text format.
pub fn game_input(setup: &Setup, turns: &[usize]) -> String {
    let mut text = format!(
        "{} {} {}\n",
        setup.node_count,
        setup.links.len(),
        setup.gateways.len()
    );
    for (a, b) in &setup.links {
        text.push_str(&format!("{a} {b}\n"));
    }
    for gateway in &setup.gateways {
        text.push_str(&format!("{gateway}\n"));
    }
    for turn in turns {
        text.push_str(&format!("{turn}\n"));
    }
    text
}

/// Write a setup file into a fresh temp directory.
///
/// Keep the returned `TempDir` alive for as long as the path is used.
pub fn setup_file(setup: &Setup) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("setup.txt");
    std::fs::write(&path, game_input(setup, &[])).expect("write setup");
    (dir, path)
}
