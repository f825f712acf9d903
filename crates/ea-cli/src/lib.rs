//! Elastic agent CLI library.
//!
//! Exposes the commands and formatters behind the `elastic-agent-cli`
//! binary so they can be tested without spawning a process.

pub mod actions;
pub mod commands;
pub mod formatters;

pub use actions::ConfigAction;
