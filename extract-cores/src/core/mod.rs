//! Deterministic, pure logic for turning package records into groups.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return deterministic outputs suitable for tests.

pub mod aggregate;
pub mod duplicates;
pub mod extensions;
pub mod layout;
pub mod names;
pub mod record;
pub mod types;
