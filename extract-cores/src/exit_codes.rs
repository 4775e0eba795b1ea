//! Stable exit codes for extract-cores commands.

/// Command succeeded, or usage was printed.
pub const OK: i32 = 0;
/// Command failed due to unreadable input, invalid config or a core conflict.
pub const INVALID: i32 = 1;
/// `check --strict` found duplicate extensions or folders.
pub const DUPLICATES: i32 = 2;
