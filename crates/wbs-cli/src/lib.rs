//! Library half of the `wbs` binary: command implementations, report types
//! and terminal rendering. Kept separate from `main.rs` so the commands can
//! be driven from integration tests.

pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
