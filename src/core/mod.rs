//! Core types and foundational components
//!
//! This module contains the row types, error handling,
//! and constants used throughout the application.

pub mod constants;
pub mod error;
pub mod types;

// Re-export commonly used items for convenience
pub use error::{FieldError, PathfinderError, Result, ValidationError};
pub use types::{CheckedRow, NotifyPolicy, ProbeStatus, RawRow, Row};
