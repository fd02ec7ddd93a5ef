//! Command-line interface for tally.

pub mod args;
pub mod commands;
