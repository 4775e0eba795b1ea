//! Aggregate emulator package definitions into `consoles.toml` / `cores.toml`.
//!
//! A package is a directory holding a `config.json` (supported extensions and
//! a label) and a `launch.sh` naming the RetroArch core it runs. The crate keeps
//! a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (path layout, name canonicalization,
//!   extension filtering, aggregation, duplicate detection).
//! - **[`io`]**: Side-effecting operations (directory walk, package files,
//!   TOML documents, tool configuration).
//!
//! Orchestration modules ([`extract`], [`check`]) coordinate core logic with I/O
//! to implement CLI commands.

pub mod check;
pub mod core;
pub mod exit_codes;
pub mod extract;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
