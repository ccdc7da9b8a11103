use thiserror::Error;

/// Error taxonomy for the valuation engine.
///
/// Calculators degrade gracefully (confidence penalty) when optional data is
/// missing, but fail fast on missing identity fields and on required-field
/// gaps beyond the configured tolerance.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error(
        "insufficient data for {position}: {missing} of {required} required fields missing \
         (tolerance {max_missing_fraction})"
    )]
    InsufficientData {
        position: String,
        missing: usize,
        required: usize,
        max_missing_fraction: f64,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("schema validation failed: {0}")]
    SchemaValidation(String),
}

impl EngineError {
    /// Whether the caller can retry with more data rather than a code fix.
    pub fn is_recoverable(&self) -> bool {
        match self {
            EngineError::InsufficientData { .. } => true,
            EngineError::InvalidConfiguration(_) => false,
            EngineError::SchemaValidation(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
