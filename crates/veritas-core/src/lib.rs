//! Veritas Core Engine
//!
//! The synchronous half of the misinformation risk pipeline. Nothing in this
//! crate performs I/O; the async fan-out to fact-checking sources lives in
//! `veritas-verify` and feeds its verdicts back into the types defined here.
//!
//! ```text
//! raw text ──► ClaimExtractor ──► [Claim]
//!                                    │  (veritas-verify: sources × cache)
//!                                    ▼
//!                             [ClaimConsensus] ──► CredibilityAggregator
//!                                                        │
//!   HeuristicLayers (semantic, linguistic, temporal,     ▼
//!   source, regional) ───────────────────────► CompositeRiskScorer ──► CompositeRiskResult
//! ```
//!
//! # Example
//!
//! ```rust
//! use veritas_core::ClaimExtractor;
//!
//! let extractor = ClaimExtractor::default();
//! let claims = extractor.extract("Experts say the bridge carries 40 million cars a year.");
//! assert_eq!(claims[0].text(), "the bridge carries 40 million cars a year");
//! ```

pub mod claim;
pub mod consensus;
pub mod credibility;
mod error;
pub mod extract;
pub mod hash;
pub mod layers;
pub mod lexicon;
pub mod recommendation;
pub mod risk;
pub mod verdict;

// Re-export main types at crate root
pub use claim::{Claim, ExtractionPattern};
pub use consensus::{
    default_sources, validate_sources, ClaimConsensus, ConsensusOutcome, SourceConfig,
};
pub use credibility::{CredibilityAggregator, CredibilityReport, SourceBreakdown};
pub use error::ConfigError;
pub use extract::ClaimExtractor;
pub use hash::ClaimHash;
pub use layers::{HeuristicLayers, LayerReport, TemporalConfig};
pub use lexicon::Lexicon;
pub use recommendation::{Priority, Recommendation};
pub use risk::{
    Component, ComponentInput, CompositeRiskResult, CompositeRiskScorer, RiskTier, RiskWeights,
};
pub use verdict::{SourceVerdict, VerdictStatus};

/// Round to a fixed number of decimal places for reporting.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
