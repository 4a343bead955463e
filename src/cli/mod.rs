//! Command-line interface for shopdash.

pub mod args;
pub mod commands;
