//! CLI module

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::run_command;
