use std::fmt;

use crate::core::types::RawRow;

/// A problem with a single field of an input row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field name as it should be reported (canonical spelling where known)
    pub field: String,
    /// Human-readable description of the problem
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// A rejected input row with every field-level problem found in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The row as it came from the source
    pub row: RawRow,
    /// Never empty
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// Diagnostic for the given field, if that field failed.
    pub fn field(&self, name: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == name)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Comprehensive error types for pathfinder operations
#[derive(Debug)]
pub enum PathfinderError {
    /// IO error (file operations, etc.)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// Input row rejected by the validator
    Validation(ValidationError),

    /// Notify token outside always/valid/invalid
    NotifyPolicy(String),

    /// Malformed CSV input
    Csv(csv::Error),

    /// HTTP client construction error
    Http(reqwest::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// Mail relay rejected the credentials
    MailAuth(String),

    /// Any other failure building or sending mail
    Mail(String),
}

impl fmt::Display for PathfinderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathfinderError::Io(err) => write!(f, "IO error: {err}"),
            PathfinderError::Config(msg) => write!(f, "Configuration error: {msg}"),
            PathfinderError::Validation(err) => write!(f, "Validation error: {err}"),
            PathfinderError::NotifyPolicy(token) => write!(
                f,
                "Notify policy error: '{token}' is not one of always, valid, invalid"
            ),
            PathfinderError::Csv(err) => write!(f, "CSV error: {err}"),
            PathfinderError::Http(err) => write!(f, "HTTP error: {err}"),
            PathfinderError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            PathfinderError::MailAuth(msg) => write!(f, "Mail authentication error: {msg}"),
            PathfinderError::Mail(msg) => write!(f, "Mail error: {msg}"),
        }
    }
}

impl std::error::Error for PathfinderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PathfinderError::Io(err) => Some(err),
            PathfinderError::Validation(err) => Some(err),
            PathfinderError::Csv(err) => Some(err),
            PathfinderError::Http(err) => Some(err),
            PathfinderError::TomlParsing(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PathfinderError {
    fn from(err: std::io::Error) -> Self {
        PathfinderError::Io(err)
    }
}

impl From<ValidationError> for PathfinderError {
    fn from(err: ValidationError) -> Self {
        PathfinderError::Validation(err)
    }
}

impl From<csv::Error> for PathfinderError {
    fn from(err: csv::Error) -> Self {
        PathfinderError::Csv(err)
    }
}

impl From<reqwest::Error> for PathfinderError {
    fn from(err: reqwest::Error) -> Self {
        PathfinderError::Http(err)
    }
}

impl From<toml::de::Error> for PathfinderError {
    fn from(err: toml::de::Error) -> Self {
        PathfinderError::TomlParsing(err)
    }
}

/// Type alias for Results using PathfinderError
pub type Result<T> = std::result::Result<T, PathfinderError>;
