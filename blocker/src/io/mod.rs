//! I/O helpers for blocker commands.

pub mod config;
pub mod input;
pub mod transcript;
