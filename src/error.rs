//! Econometric analysis error types
//!
//! Defines the standardized error type for all analysis operations.
//! Fatal preconditions surface here; per-pair computation failures are
//! recorded inline in the result structures instead (see `stats::granger`).

use thiserror::Error;

/// Result type alias for analysis operations
pub type Result<T> = std::result::Result<T, EconError>;

/// Errors that can occur during econometric analysis
#[derive(Error, Debug)]
pub enum EconError {
    /// Too few aligned observations for a statistically valid test
    #[error("Insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// A required series has zero observations
    #[error("Series '{name}' has no observations")]
    EmptySeries { name: String },

    /// Inner join across series produced zero common quarters
    #[error("Quarterly alignment produced no common quarters")]
    AlignmentEmpty,

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Invalid input data
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// I/O failure at the loading/writing boundary
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parse failure at the loading boundary
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failure when writing the results artifact
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
