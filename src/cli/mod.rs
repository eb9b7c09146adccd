//! CLI module
//!
//! One invocation runs the whole pipeline: catalog stage, then event stage.

mod commands;
mod runner;

pub use commands::Cli;
pub use runner::Runner;
