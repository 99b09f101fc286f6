//! Row validation
//!
//! Turns a [`RawRow`] into a typed [`Row`] or a [`ValidationError`] listing
//! every field that is wrong. The schema is closed: a row must carry exactly
//! `title`, `URI` (any case) and `notify`.

use url::Url;

use crate::core::constants::{fields, notify_tokens};
use crate::core::error::{FieldError, ValidationError};
use crate::core::types::{NotifyPolicy, RawRow, Row, canonical_field};

const MISSING: &str = "Missing value";
const EMPTY: &str = "Please enter a value";

/// Validate a single raw row.
pub fn validate_row(raw: &RawRow) -> Result<Row, ValidationError> {
    let mut errors = Vec::new();
    let mut title = None;
    let mut uri = None;
    let mut notify = None;

    for (key, value) in raw.fields() {
        let slot = match canonical_field(key) {
            Some(fields::TITLE) => &mut title,
            Some(fields::URI) => &mut uri,
            Some(_) => &mut notify,
            None => {
                errors.push(FieldError::new(
                    key.as_str(),
                    format!("The input field '{key}' was not expected."),
                ));
                continue;
            }
        };

        if slot.is_some() {
            errors.push(FieldError::new(
                key.as_str(),
                "Field was given more than once",
            ));
        } else {
            *slot = Some(value.as_str());
        }
    }

    let title = check_title(title).map_err(|m| errors.push(FieldError::new(fields::TITLE, m)));
    let uri = check_uri(uri).map_err(|m| errors.push(FieldError::new(fields::URI, m)));
    let notify =
        check_notify(notify).map_err(|m| errors.push(FieldError::new(fields::NOTIFY, m)));

    match (title, uri, notify) {
        (Ok(title), Ok(uri), Ok(notify)) if errors.is_empty() => Ok(Row { title, uri, notify }),
        _ => {
            // Field checks push after the schema checks; report in field order
            errors.sort_by_key(|e| field_rank(&e.field));
            Err(ValidationError {
                row: raw.clone(),
                errors,
            })
        }
    }
}

/// Validate every row, stopping at the first rejected one.
pub fn validate_rows(raws: &[RawRow]) -> Result<Vec<Row>, ValidationError> {
    raws.iter().map(validate_row).collect()
}

fn field_rank(field: &str) -> usize {
    fields::ALL
        .iter()
        .position(|f| *f == field)
        .unwrap_or(fields::ALL.len())
}

fn check_title(value: Option<&str>) -> Result<String, String> {
    match value {
        None => Err(MISSING.to_string()),
        Some(v) if v.trim().is_empty() => Err(EMPTY.to_string()),
        Some(v) => Ok(v.to_string()),
    }
}

fn check_uri(value: Option<&str>) -> Result<String, String> {
    let value = match value.map(str::trim) {
        None => return Err(MISSING.to_string()),
        Some("") => return Err(EMPTY.to_string()),
        Some(v) => v,
    };

    let parsed = Url::parse(value).map_err(|e| format!("That is not a valid URL ({e})"))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(format!(
            "URL scheme '{}' is not supported, use http:// or https://",
            parsed.scheme()
        ));
    }
    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(value.to_string()),
        _ => Err("That is not a valid URL (missing host)".to_string()),
    }
}

fn check_notify(value: Option<&str>) -> Result<NotifyPolicy, String> {
    match value {
        None => Err(MISSING.to_string()),
        Some("") => Err(EMPTY.to_string()),
        Some(v) => v.parse().map_err(|_| {
            format!(
                "Value must be one of: {} (not '{v}')",
                notify_tokens::ALL.join("; ")
            )
        }),
    }
}
