//! Check that a list of URIs is reachable and report the results.
//!
//! Rows come from the command line or a CSV file. Each row is validated,
//! its URI probed with one HTTP GET, and the full result set printed as a
//! plain-text table. Rows whose notify policy matches their outcome can be
//! mailed as an HTML report.

pub mod config;
pub mod core;
pub mod input;
pub mod notification;
pub mod reporting;
pub mod runner;
pub mod ui;
pub mod validation;

// Re-export commonly used items for convenience
pub use config::{CliConfig, Config, ConfigSources, MailOverrides};
pub use self::core::{
    CheckedRow, FieldError, NotifyPolicy, PathfinderError, ProbeStatus, RawRow, Result, Row,
    ValidationError,
};
pub use notification::{Mail, MailDispatch, SmtpMailer};
pub use runner::{RunSummary, Runner};
pub use validation::{HttpProber, Probe};
