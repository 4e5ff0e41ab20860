//! Load-shedding planner CLI library.
//!
//! This crate provides the CLI interface for the planner.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, LineAction, ReportPeriod, SlotArg};
pub use config::Config;
