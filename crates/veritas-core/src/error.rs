//! Configuration error types

use thiserror::Error;

/// Errors raised while building scorers or detectors from configuration.
///
/// Analysis itself never fails; only malformed configuration is rejected,
/// and only at construction time.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// A risk weight is negative, NaN or infinite
    #[error("invalid weight for component '{component}': {value}")]
    InvalidWeight { component: String, value: f64 },

    /// A source weight is negative, NaN or infinite
    #[error("invalid weight for source '{source_id}': {value}")]
    InvalidSourceWeight { source_id: String, value: f64 },

    /// Two source configs share an id
    #[error("duplicate source id: {0}")]
    DuplicateSource(String),

    /// A lexicon pattern failed to compile
    #[error("invalid lexicon pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}
