//! CLI module
//!
//! Command-line interface for the pager.
//!
//! # Commands
//!
//! - `window` - Compute a page window offline
//! - `load` - Fetch counts and print controls for each pager
//! - `select` - Load a pager and select a page
//! - `posts` - Load custom post lists

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
