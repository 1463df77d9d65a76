//! Turn-based link-cutting agent.
//!
//! Each turn the adversary stands on a node of an undirected graph and may
//! walk along uncut links towards a gateway. The agent severs exactly one
//! link per turn to keep it away from every gateway. The crate enforces a
//! strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (graph store, danger
//!   classification, distance estimation, cut selection). No I/O.
//! - **[`io`]**: Input parsing, configuration, transcripts.
//!
//! Orchestration modules ([`turn`], [`looping`]) coordinate core logic with
//! I/O to implement the `blocker play` command.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod looping;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod turn;
