//! User interface and interaction
//!
//! This module contains the command-line definitions and the
//! conversion of parsed arguments into configuration overrides.

pub mod cli;

// Re-export commonly used items
pub use cli::{Cli, Commands, MailArgs, cli_to_config};
