//! Notification
//!
//! This module decides which checked rows belong in the mailed
//! report and hands the finished report to the mail relay.

pub mod filter;
pub mod mailer;

// Re-export commonly used items
pub use filter::{matched_rows, matches};
pub use mailer::{Mail, MailDispatch, SmtpMailer};
