//! Turn loop for `blocker play`.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::core::types::TurnReport;
use crate::io::config::AgentConfig;
use crate::io::input::InputReader;
use crate::turn::Agent;

/// Reason why `run_loop` stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopStop {
    /// The input stream ended.
    InputEnded,
    /// The configured `max_turns` was reached.
    TurnLimit { max_turns: u32 },
}

/// Summary of a loop invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopOutcome {
    pub turns_played: u32,
    pub cuts: u32,
    pub stop: LoopStop,
}

/// Read the setup from `input`, then play one turn per adversary position
/// until the input ends, writing each cut to `output` as `a b`.
///
/// Turns without a cut write nothing. Stops immediately on any fatal error
/// (malformed setup, unknown node, write failure) or on an error from
/// `on_turn`.
#[instrument(skip_all)]
pub fn run_loop<R, W, F>(
    input: R,
    mut output: W,
    config: &AgentConfig,
    mut on_turn: F,
) -> Result<LoopOutcome>
where
    R: BufRead,
    W: Write,
    F: FnMut(&TurnReport) -> Result<()>,
{
    let mut reader = InputReader::new(input);
    let setup = reader.read_setup().context("read game setup")?;
    let mut agent = Agent::new(&setup, config).context("initialise agent")?;
    info!(
        nodes = setup.node_count,
        links = setup.links.len(),
        gateways = setup.gateways.len(),
        "game started"
    );

    let mut cuts = 0u32;
    let stop = loop {
        if let Some(max_turns) = config.turn_limit()
            && agent.turns() >= max_turns
        {
            break LoopStop::TurnLimit { max_turns };
        }

        let Some(position) = reader.next_turn()? else {
            break LoopStop::InputEnded;
        };

        let report = agent
            .play_turn(position)
            .with_context(|| format!("turn {}", agent.turns() + 1))?;
        if let Some((a, b)) = report.cut {
            writeln!(output, "{} {}", a, b).context("write cut")?;
            output.flush().context("flush output")?;
            cuts += 1;
        }
        on_turn(&report)?;
    };

    info!(turns = agent.turns(), cuts, stop = ?stop, "game finished");
    Ok(LoopOutcome {
        turns_played: agent.turns(),
        cuts,
        stop,
    })
}
