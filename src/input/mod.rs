//! Row sources
//!
//! Raw rows come either from a single title/URI pair given on the
//! command line or from a CSV file with a `title,URI,notify` header.

pub mod csv_file;

pub use csv_file::{read_csv, read_csv_from};

use crate::core::constants::{fields, notify_tokens};
use crate::core::types::RawRow;

/// Build the raw row for a single URI supplied on the command line.
///
/// Rows built this way always notify.
pub fn custom_row(title: &str, uri: &str) -> RawRow {
    RawRow::new()
        .with(fields::TITLE, title)
        .with(fields::URI, uri)
        .with(fields::NOTIFY, notify_tokens::ALWAYS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_row_notifies_always() {
        let row = custom_row("Example", "http://example.com");

        assert_eq!(
            row.fields(),
            &[
                ("title".to_string(), "Example".to_string()),
                ("URI".to_string(), "http://example.com".to_string()),
                ("notify".to_string(), "always".to_string()),
            ]
        );
    }

    #[test]
    fn test_custom_row_keeps_values_verbatim() {
        let row = custom_row("", "not a uri");
        assert_eq!(row.fields()[0].1, "");
        assert_eq!(row.fields()[1].1, "not a uri");
    }
}
