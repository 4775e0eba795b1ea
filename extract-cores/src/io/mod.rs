//! I/O helpers for extract-cores commands.

pub mod config;
pub mod package;
pub mod store;
pub mod walk;
