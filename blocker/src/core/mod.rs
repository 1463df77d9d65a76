//! Deterministic, pure logic for the turn engine.
//!
//! Core modules must be free of I/O side effects. They operate on the
//! in-memory graph and return deterministic outputs suitable for tests.

pub mod classifier;
pub mod distance;
pub mod graph;
pub mod invariants;
pub mod selector;
pub mod setup;
pub mod types;
