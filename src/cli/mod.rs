//! CLI module
//!
//! Command-line interface for the generator.
//!
//! # Commands
//!
//! - `boolean` - Generate boolean expressions for a whole project
//! - `aggregate` - Generate aggregate expressions for one connector

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
