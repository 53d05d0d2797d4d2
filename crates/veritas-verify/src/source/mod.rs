//! Fact-checking source capability
//!
//! A [`SourceVerifier`] answers for one source id. The engine never looks
//! inside an implementation: simulated sources and real HTTP integrations
//! are interchangeable.

mod simulated;

use async_trait::async_trait;
use veritas_core::{Claim, SourceVerdict};

use crate::error::VerifyError;

pub use simulated::{simulated_sources, SimulatedSource};

/// A source's raw answer, before status normalisation
#[derive(Debug, Clone, PartialEq)]
pub struct SourceReport {
    /// The source's own label ("half_true", "unproven", ...)
    pub rating: String,
    pub confidence: f64,
    pub detail: String,
    pub source_url: Option<String>,
}

impl SourceReport {
    pub fn new(rating: impl Into<String>, confidence: f64, detail: impl Into<String>) -> Self {
        Self {
            rating: rating.into(),
            confidence,
            detail: detail.into(),
            source_url: None,
        }
    }

    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    pub fn into_verdict(self, source_id: impl Into<String>) -> SourceVerdict {
        let verdict = SourceVerdict::from_rating(source_id, self.rating, self.confidence, self.detail);
        match self.source_url {
            Some(url) => verdict.with_source_url(url),
            None => verdict,
        }
    }
}

/// Checks claims against one fact-checking source.
///
/// Implementations must be safe to call concurrently. Malformed or
/// unexpected claims should produce an "unknown" style rating rather than
/// an error; errors are for the lookup itself failing.
#[async_trait]
pub trait SourceVerifier: Send + Sync {
    /// Must match the `id` of the source's [`veritas_core::SourceConfig`]
    fn id(&self) -> &str;

    async fn verify(&self, claim: &Claim) -> Result<SourceReport, VerifyError>;
}
