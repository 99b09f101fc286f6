//! Row and URI validation
//!
//! This module checks the shape of input rows and probes
//! their URIs over HTTP.

pub mod prober;
pub mod schema;

// Re-export commonly used items
pub use prober::{HttpProber, Probe};
pub use schema::{validate_row, validate_rows};
