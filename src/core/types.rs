use std::fmt;
use std::str::FromStr;

use crate::core::constants::{fields, notify_tokens};
use crate::core::error::PathfinderError;

/// An input row exactly as the row source produced it.
///
/// Keys keep the spelling and order of the source (CLI flags or the CSV
/// header) so a rejected row can be echoed back verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: Vec<(String, String)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, keeping insertion order.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.push((key.into(), value.into()));
    }

    /// All fields in source order.
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl fmt::Display for RawRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key:?}: {value:?}")?;
        }
        write!(f, "}}")
    }
}

/// Per-row rule deciding whether a row appears in the mailed report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotifyPolicy {
    /// Include the row whatever the probe said
    Always,
    /// Include the row only when it probed `OK`
    Valid,
    /// Include the row only when it probed `Invalid`
    Invalid,
}

impl NotifyPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Always => notify_tokens::ALWAYS,
            Self::Valid => notify_tokens::VALID,
            Self::Invalid => notify_tokens::INVALID,
        }
    }

    /// Whether a row with this policy and the given probe outcome belongs in
    /// the notification.
    pub fn matches(&self, status: ProbeStatus) -> bool {
        match self {
            Self::Always => true,
            Self::Valid => status == ProbeStatus::Ok,
            Self::Invalid => status == ProbeStatus::Invalid,
        }
    }
}

impl FromStr for NotifyPolicy {
    type Err = PathfinderError;

    /// Tokens are matched exactly; `Always` or ` valid` are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            notify_tokens::ALWAYS => Ok(Self::Always),
            notify_tokens::VALID => Ok(Self::Valid),
            notify_tokens::INVALID => Ok(Self::Invalid),
            other => Err(PathfinderError::NotifyPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for NotifyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binary outcome of probing a URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeStatus {
    /// The server answered with HTTP 200
    Ok,
    /// Any other status code, or no usable response at all
    Invalid,
}

impl ProbeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Invalid => "Invalid",
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `pad` so width specifiers in report templates apply
        f.pad(self.as_str())
    }
}

/// A validated row that has not been probed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub title: String,
    pub uri: String,
    pub notify: NotifyPolicy,
}

impl Row {
    /// Attach the probe outcome. Consumes the row so a result can only be
    /// set once.
    pub fn checked(self, result: ProbeStatus) -> CheckedRow {
        CheckedRow { row: self, result }
    }
}

/// A row together with its probe outcome.
///
/// Fields are private; the outcome cannot change after probing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedRow {
    row: Row,
    result: ProbeStatus,
}

impl CheckedRow {
    pub fn title(&self) -> &str {
        &self.row.title
    }

    pub fn uri(&self) -> &str {
        &self.row.uri
    }

    pub fn notify(&self) -> NotifyPolicy {
        self.row.notify
    }

    pub fn result(&self) -> ProbeStatus {
        self.result
    }

    pub fn row(&self) -> &Row {
        &self.row
    }
}

/// Canonical key for a raw field name, if it is one of the known fields.
///
/// Only the URI column is case-insensitive; `title` and `notify` must be
/// spelled exactly.
pub fn canonical_field(key: &str) -> Option<&'static str> {
    if key == fields::TITLE {
        Some(fields::TITLE)
    } else if key.eq_ignore_ascii_case(fields::URI) {
        Some(fields::URI)
    } else if key == fields::NOTIFY {
        Some(fields::NOTIFY)
    } else {
        None
    }
}
