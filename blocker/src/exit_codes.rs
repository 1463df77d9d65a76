//! Stable exit codes for blocker CLI commands.

/// Input ended normally, or the setup checked out.
pub const OK: i32 = 0;
/// Malformed setup, unknown node, unreadable config, or any other fatal error.
pub const INVALID: i32 = 1;
