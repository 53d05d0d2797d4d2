//! Common error types for Veritas components.

use thiserror::Error;

/// Common error type for Veritas operations at process boundaries
/// (config loading, reading input, writing reports).
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("{0}")]
    Internal(String),
}

/// Result type alias using Veritas Error.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_message() {
        let err = Error::Config("weight for snopes is negative".to_string());
        assert_eq!(
            err.to_string(),
            "configuration error: weight for snopes is negative"
        );
    }

    #[test]
    fn serde_error_converts() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: Error = parse.unwrap_err().into();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
