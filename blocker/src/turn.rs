//! Orchestration for a single deterministic turn.
//!
//! Refreshes the dangerous set, cuts an adjacent gateway link if there is
//! one, and otherwise ranks dangerous nodes by estimated distance and cuts
//! the most urgent one's gateway link.

use anyhow::Result;
use tracing::{debug, instrument, trace};

use crate::core::classifier::DangerClassifier;
use crate::core::distance::estimate_distances;
use crate::core::graph::{Graph, NodeId};
use crate::core::selector::{immediate_cut, rank_by_urgency, ranked_cut};
use crate::core::setup::Setup;
use crate::core::types::{CutDecision, TurnReport};
use crate::io::config::AgentConfig;

/// The link-cutting agent. Owns the graph for the whole game.
#[derive(Debug, Clone)]
pub struct Agent {
    graph: Graph,
    danger: DangerClassifier,
    turns: u32,
}

impl Agent {
    /// Validate the setup and build a fresh agent.
    pub fn new(setup: &Setup, config: &AgentConfig) -> Result<Self> {
        let graph = setup.build_graph()?;
        debug!(
            nodes = graph.node_count(),
            links = graph.link_count(),
            gateways = setup.gateways.len(),
            refresh = ?config.refresh,
            "agent initialised"
        );
        Ok(Self::from_graph(graph, config))
    }

    pub fn from_graph(graph: Graph, config: &AgentConfig) -> Self {
        Self {
            graph,
            danger: DangerClassifier::new(config.refresh),
            turns: 0,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn danger(&self) -> &DangerClassifier {
        &self.danger
    }

    /// Turns played so far.
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Play one turn with the adversary at `adversary` and apply the cut.
    ///
    /// Fails only when `adversary` names a node outside the graph; the
    /// returned error then wraps an `UnknownNodeError`.
    #[instrument(skip(self))]
    pub fn play_turn(&mut self, adversary: usize) -> Result<TurnReport> {
        let adversary = self.graph.resolve(adversary)?;
        self.turns += 1;

        self.danger.refresh(&self.graph);
        let decision = self.decide(adversary);

        let cut = decision.link().map(|link| {
            self.graph.sever(link);
            self.graph.link(link).endpoints
        });

        debug!(
            turn = self.turns,
            dangerous = self.danger.len(),
            decision = ?decision,
            "turn played"
        );

        Ok(TurnReport {
            turn: self.turns,
            adversary,
            dangerous: self.danger.len(),
            decision,
            cut,
        })
    }

    fn decide(&self, adversary: NodeId) -> CutDecision {
        if let Some(link) = immediate_cut(&self.graph, adversary) {
            return CutDecision::Immediate { link };
        }

        let estimates = estimate_distances(&self.graph, &self.danger, adversary);
        for (node, estimate) in estimates.iter() {
            trace!(
                node = %node,
                distance = estimate.distance,
                simulated = estimate.simulated,
                "dangerous node estimate"
            );
        }

        let table = rank_by_urgency(&self.graph, &estimates);
        match ranked_cut(&self.graph, &table) {
            Some((score, node, link)) => CutDecision::Ranked { link, node, score },
            None => CutDecision::Hold,
        }
    }
}
