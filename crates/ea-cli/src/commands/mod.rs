//! Command implementations for the elastic agent CLI.
//!
//! Each command reads its inputs, performs the operation, and prints the
//! outcome in the requested output format.

pub mod config;
pub mod fields;
pub mod validate;
