//! Reporting
//!
//! This module renders checked rows as a plain-text table and as an
//! HTML document, and holds the structured logging helpers.

pub mod html;
pub mod logging;
pub mod text;

// Re-export commonly used items
pub use html::HtmlReport;
pub use text::plain_text;
