// Command-line interface definitions and parsing for pathfinder

use crate::config::CliConfig;
use crate::core::types::RawRow;
use crate::input;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Check that URIs are reachable, print a report and mail the rows \
             whose notify condition is met",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    // Core Options
    /// Probe timeout in seconds (default: from config, else 10)
    #[arg(
        short = 't',
        long,
        value_name = "SECONDS",
        global = true,
        help_heading = "Core Options"
    )]
    pub timeout: Option<f64>,

    // Output & Verbosity
    /// Suppress log output
    #[arg(short = 'q', long, global = true, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    // Configuration
    /// Directory holding app.toml and app.local.toml (default: etc)
    #[arg(long, value_name = "DIR", global = true, help_heading = "Configuration")]
    pub config_dir: Option<String>,

    /// Ignore the per-user config file
    #[arg(long, global = true, help_heading = "Configuration")]
    pub no_user_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Specify a single URI to validate using command-line arguments
    Custom {
        /// Short label describing the URI. Must be quoted to include spaces
        #[arg(value_name = "TITLE")]
        title: String,

        /// URI to validate
        #[arg(value_name = "URI")]
        uri: String,

        #[command(flatten)]
        mail: MailArgs,
    },
    /// Specify a CSV file containing rows of URI data to validate
    ///
    /// The header must be `title,URI,notify`, with notify one of valid,
    /// invalid or always. Every URI is validated and printed; a mail of just
    /// the rows meeting their notify condition is sent, or no mail if none
    /// do.
    File {
        /// Path to the CSV file
        #[arg(value_name = "PATH")]
        file: PathBuf,

        #[command(flatten)]
        mail: MailArgs,
    },
}

/// Mail options shared by both subcommands
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct MailArgs {
    /// Prevent a mail from being sent
    #[arg(short = 'n', long)]
    pub no_send: bool,

    /// Subject to use in the mail (default: from config). Must be quoted to
    /// include spaces
    #[arg(long, value_name = "TEXT")]
    pub subject: Option<String>,
}

impl MailArgs {
    /// The subject to mail under, or `None` when no mail should be sent.
    ///
    /// An empty `--subject` falls back to `default_subject`.
    pub fn resolve_subject(&self, default_subject: &str) -> Option<String> {
        if self.no_send {
            return None;
        }
        let subject = self
            .subject
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(default_subject);
        Some(subject.to_string())
    }
}

impl Commands {
    pub fn mail_args(&self) -> &MailArgs {
        match self {
            Commands::Custom { mail, .. } | Commands::File { mail, .. } => mail,
        }
    }

    /// Load raw rows from the source this command names.
    pub fn load_rows(&self) -> crate::core::error::Result<Vec<RawRow>> {
        match self {
            Commands::Custom { title, uri, .. } => Ok(vec![input::custom_row(title, uri)]),
            Commands::File { file, .. } => input::read_csv(file),
        }
    }

    /// Human-readable name of the row source, for logs.
    pub fn source_name(&self) -> String {
        match self {
            Commands::Custom { .. } => "command line".to_string(),
            Commands::File { file, .. } => file.display().to_string(),
        }
    }
}

/// Convert the parsed CLI into the config overrides it carries
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    CliConfig {
        timeout: cli.timeout,
        config_dir: cli.config_dir.clone(),
        no_user_config: cli.no_user_config,
    }
}
