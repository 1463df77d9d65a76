//! In-process game simulation: the agent against a simulated adversary.

use anyhow::Result;
use blocker::core::graph::NodeId;
use blocker::core::types::TurnReport;
use blocker::io::config::AgentConfig;
use blocker::turn::Agent;
use tracing::{debug, instrument, warn};

use crate::adversary::{from_config, nearest_gateway_path};
use crate::case::CaseFile;
use crate::outcome::Outcome;

/// Record of one simulated game.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub outcome: Outcome,
    pub turns: Vec<TurnReport>,
    /// Cut endpoints in turn order.
    pub cuts: Vec<(usize, usize)>,
    /// Adversary position when the game ended.
    pub final_position: usize,
    /// Agent error message when `outcome` is `Error`.
    pub error: Option<String>,
}

/// Play a case to completion.
///
/// Each turn: stop if the adversary is on a gateway or cut off from every
/// gateway; otherwise the agent plays and cuts, then the adversary moves.
/// Setup errors are returned; errors during play end the game as `Error`.
#[instrument(skip_all, fields(case_id = %case.case.id))]
pub fn simulate(case: &CaseFile, config: &AgentConfig) -> Result<Simulation> {
    let mut agent = Agent::new(&case.setup(), config)?;
    let mut adversary = from_config(&case.adversary);
    let mut position = NodeId(case.adversary.start);
    let mut sim = Simulation {
        outcome: Outcome::Survived,
        turns: Vec::new(),
        cuts: Vec::new(),
        final_position: position.0,
        error: None,
    };

    for _ in 0..case.adversary.max_turns {
        if agent.graph().is_gateway(position) {
            sim.outcome = Outcome::Breached;
            break;
        }
        if nearest_gateway_path(agent.graph(), position).is_none() {
            sim.outcome = Outcome::Blocked;
            break;
        }

        let report = match agent.play_turn(position.0) {
            Ok(report) => report,
            Err(err) => {
                warn!(error = %format!("{err:#}"), "agent failed");
                sim.outcome = Outcome::Error;
                sim.error = Some(format!("{err:#}"));
                break;
            }
        };
        if let Some((a, b)) = report.cut {
            sim.cuts.push((a.0, b.0));
        }
        sim.turns.push(report);

        if let Some(next) = adversary.next_move(agent.graph(), position) {
            debug!(from = %position, to = %next, "adversary moved");
            position = next;
        }
    }

    if sim.outcome == Outcome::Survived && agent.graph().is_gateway(position) {
        sim.outcome = Outcome::Breached;
    }
    sim.final_position = position.0;
    Ok(sim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::{AdversaryConfig, CaseConfig, CaseGraph, CaseMeta, Policy};

    fn case(
        nodes: usize,
        links: &[(usize, usize)],
        gateways: &[usize],
        start: usize,
        policy: Policy,
        max_turns: u32,
    ) -> CaseFile {
        CaseFile {
            case: CaseMeta {
                id: "test".to_string(),
                description: String::new(),
            },
            graph: CaseGraph {
                nodes,
                links: links.to_vec(),
                gateways: gateways.to_vec(),
            },
            adversary: AdversaryConfig {
                start,
                policy,
                seed: 3,
                max_turns,
            },
            agent: CaseConfig::default(),
        }
    }

    #[test]
    fn linear_chain_is_blocked_after_one_cut() {
        let sim = simulate(
            &case(3, &[(0, 1), (1, 2)], &[2], 0, Policy::ShortestPath, 10),
            &AgentConfig::default(),
        )
        .expect("simulate");
        assert_eq!(sim.outcome, Outcome::Blocked);
        assert_eq!(sim.cuts, vec![(1, 2)]);
    }

    #[test]
    fn adversary_between_two_gateways_breaches() {
        // One cut per turn cannot close both gateway links at once.
        let sim = simulate(
            &case(3, &[(0, 1), (0, 2)], &[1, 2], 0, Policy::ShortestPath, 10),
            &AgentConfig::default(),
        )
        .expect("simulate");
        assert_eq!(sim.outcome, Outcome::Breached);
        assert_eq!(sim.cuts, vec![(0, 1)]);
        assert_eq!(sim.final_position, 2);
    }

    #[test]
    fn double_gateway_node_one_hop_away_is_held() {
        // The agent cuts one of node 1's gateway links before the adversary
        // arrives, then the other once it is adjacent.
        let sim = simulate(
            &case(4, &[(0, 1), (1, 2), (1, 3)], &[2, 3], 0, Policy::ShortestPath, 10),
            &AgentConfig::default(),
        )
        .expect("simulate");
        assert_eq!(sim.outcome, Outcome::Blocked);
        assert_eq!(sim.cuts, vec![(1, 2), (1, 3)]);
    }

    #[test]
    fn disconnected_start_is_blocked_without_playing() {
        let sim = simulate(
            &case(4, &[(0, 1), (2, 3)], &[3], 0, Policy::Random, 10),
            &AgentConfig::default(),
        )
        .expect("simulate");
        assert_eq!(sim.outcome, Outcome::Blocked);
        assert!(sim.turns.is_empty());
    }

    #[test]
    fn turn_limit_reached_counts_as_survived() {
        // Long ring with a gateway far away; one turn is all we allow.
        let sim = simulate(
            &case(
                6,
                &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0), (3, 5)],
                &[5],
                1,
                Policy::ShortestPath,
                1,
            ),
            &AgentConfig::default(),
        )
        .expect("simulate");
        assert_eq!(sim.turns.len(), 1);
        assert_eq!(sim.outcome, Outcome::Survived);
    }
}
