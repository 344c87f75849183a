use thiserror::Error;

/// Errors raised by the loaders and the contour generator
#[derive(Debug, Error)]
pub enum AshbyError {
    /// Required column missing or value malformed at load time
    #[error("validation error: {0}")]
    Validation(String),

    /// Note name does not match the `letter[#]octave` pattern
    #[error("cannot parse note name {name:?}: {reason}")]
    NoteParse { name: String, reason: String },

    /// Non-positive value where a physical quantity requires positivity
    #[error("domain error: {quantity} must be positive, got {value}")]
    Domain { quantity: &'static str, value: f64 },

    /// Referenced key absent from the loaded catalog
    #[error("no record named {0:?} in the catalog")]
    Lookup(String),

    /// CSV reading or deserialization error
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// DataFrame construction or query error
    #[error("dataframe error: {0}")]
    DataFrame(#[from] polars::error::PolarsError),

    /// I/O error while reading a source table
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl AshbyError {
    /// Shorthand for a positivity check at a derivation point.
    pub(crate) fn require_positive(quantity: &'static str, value: f64) -> Result<f64> {
        if value > 0.0 && value.is_finite() {
            Ok(value)
        } else {
            Err(AshbyError::Domain { quantity, value })
        }
    }
}

/// Type alias for Results using AshbyError
pub type Result<T> = std::result::Result<T, AshbyError>;
