//! Error types for the verification layer
//!
//! None of these escape an analysis run: source failures become `error`
//! verdicts and classifier failures become the fallback assessment. Only
//! [`PipelineError`] is returned to callers, and only while building.

use std::time::Duration;

use thiserror::Error;
use veritas_core::ConfigError;

/// Why a single source lookup failed
#[derive(Debug, Clone, Error, PartialEq)]
pub enum VerifyError {
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("source unavailable: {0}")]
    Unavailable(String),

    #[error("rate limit exceeded")]
    RateLimited,

    #[error("internal error: {0}")]
    Internal(String),
}

/// Why the text classifier could not produce an assessment
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ClassifierError {
    #[error("classifier timed out after {0:?}")]
    Timeout(Duration),

    #[error("classifier unavailable: {0}")]
    Unavailable(String),

    #[error("invalid classifier response: {0}")]
    InvalidResponse(String),
}

/// Errors raised while assembling an engine or pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("no verifier registered for enabled source '{0}'")]
    MissingVerifier(String),
}

impl From<PipelineError> for veritas::Error {
    fn from(err: PipelineError) -> Self {
        veritas::Error::Config(err.to_string())
    }
}
