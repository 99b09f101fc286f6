//! Plain-text report
//!
//! Fixed-width table with `Result`, `Title` and `URI` columns, used both for
//! the console and for the plain-text part of the mail.

use crate::core::constants::report::{RESULT_WIDTH, RULE_CHAR, TITLE_WIDTH};
use crate::core::types::CheckedRow;

/// Format one table line. Columns are left-justified and padded to their
/// minimum width; longer values push later columns to the right.
pub fn format_line(result: &str, title: &str, uri: &str) -> String {
    format!("{result:<RESULT_WIDTH$} {title:<TITLE_WIDTH$} {uri}")
}

/// The column header line.
pub fn header() -> String {
    format_line("Result", "Title", "URI")
}

/// A rule exactly as long as the header.
pub fn rule() -> String {
    RULE_CHAR.to_string().repeat(header().chars().count())
}

/// Render rows as a table: header, rule, then one line per row, joined with
/// newlines (no trailing newline).
pub fn plain_text<'a, I>(rows: I) -> String
where
    I: IntoIterator<Item = &'a CheckedRow>,
{
    let mut lines = vec![header(), rule()];
    lines.extend(
        rows.into_iter()
            .map(|row| format_line(row.result().as_str(), row.title(), row.uri())),
    );
    lines.join("\n")
}
