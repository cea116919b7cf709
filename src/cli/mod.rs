//! CLI module
//!
//! Command-line interface for querying a provider.
//!
//! # Commands
//!
//! - `status-changes` - Fetch status change events
//! - `trips` - Fetch trips

mod commands;
mod runner;

pub use commands::{Cli, Commands, Filters, OutputFormat};
pub use runner::Runner;
