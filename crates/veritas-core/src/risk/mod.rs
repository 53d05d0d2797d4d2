//! Composite risk scoring
//!
//! Merges the credibility-scale sub-scores of every analysis layer into one
//! 0–100 risk value and a [`RiskTier`]:
//!
//! ```text
//! weighted = Σ wᵢ·vᵢ / Σ wᵢ      (available, weighted components only)
//! risk     = clamp(100 − weighted, 0, 100)
//! ```
//!
//! Risk-scale inputs (regional context, classifier) are inverted before they
//! enter the sum. Unavailable components are left out of both sums and
//! lower the reported confidence instead.

mod component;
mod scorer;
mod weights;

pub use component::{Component, ComponentInput};
pub use scorer::{CompositeRiskResult, CompositeRiskScorer, RiskTier};
pub use weights::RiskWeights;
