//! Errors surfaced at the crate boundary.
//!
//! Evaluation itself never fails: degenerate configurations produce degenerate
//! numbers (`NaN`, `inf`) rather than errors. Only malformed input shapes are
//! rejected.

use thiserror::Error;

/// A coordinate list could not be turned into a position.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateError {
    /// Positions need 2, 3 or 4 components.
    #[error("expected 2, 3 or 4 coordinates, got {0}")]
    Arity(usize),
}

/// A noise configuration document could not be loaded.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The document is not valid JSON or doesn't match the option schema.
    #[error("invalid noise configuration: {0}")]
    Json(#[from] serde_json::Error),
}
