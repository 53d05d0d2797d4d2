//! Overall credibility from per-claim consensus
//!
//! Each verified claim contributes points by its consensus label and the
//! overall score is their integer mean:
//!
//! ```text
//! true 90 │ partially_true 70 │ mixture 50 │ unknown 50 │ false 10
//! ```
//!
//! An empty claim set scores a neutral 50.

mod aggregator;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::recommendation::Recommendation;
use crate::verdict::VerdictStatus;

pub use aggregator::CredibilityAggregator;

/// Score used when there is nothing to average
pub const NEUTRAL_CREDIBILITY: u32 = 50;

/// Per-source statistics over one verification run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceBreakdown {
    /// Every verdict recorded for the source, errors included
    pub checks_performed: usize,
    /// Mean confidence, two decimals
    pub avg_confidence: f64,
    pub status_distribution: BTreeMap<VerdictStatus, usize>,
}

/// Output of [`CredibilityAggregator::aggregate`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredibilityReport {
    pub overall_credibility: u32,
    pub source_breakdown: BTreeMap<String, SourceBreakdown>,
    pub recommendations: Vec<Recommendation>,
    pub suspicious_indicators: Vec<String>,
}
