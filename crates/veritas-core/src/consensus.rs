//! Weighted consensus across fact-checking sources
//!
//! Each responding source casts `weight × confidence` for the status it
//! reported. The status with the largest total wins; near-equal totals fall
//! back to [`VerdictStatus::CONSENSUS_PRIORITY`], so disagreement leans
//! toward flagging risk.
//!
//! Weights are renormalised over the sources that actually responded: a
//! disabled, unconfigured or failing source simply drops out of both the
//! vote and the denominator of [`ConsensusOutcome::support`].

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::claim::Claim;
use crate::error::ConfigError;
use crate::round_to;
use crate::verdict::{SourceVerdict, VerdictStatus};

/// Scores closer than this are treated as a tie
const SCORE_EPSILON: f64 = 1e-9;

/// Static configuration for one fact-checking source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub id: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub weight: f64,
    /// Live calls allowed per hour; 0 means unlimited
    #[serde(default)]
    pub rate_limit_per_hour: u32,
}

fn default_enabled() -> bool {
    true
}

impl SourceConfig {
    pub fn new(id: impl Into<String>, weight: f64) -> Self {
        Self {
            id: id.into(),
            enabled: true,
            weight,
            rate_limit_per_hour: 0,
        }
    }

    pub fn with_rate_limit(mut self, per_hour: u32) -> Self {
        self.rate_limit_per_hour = per_hour;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Reject negative or non-finite weights
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(ConfigError::InvalidSourceWeight {
                source_id: self.id.clone(),
                value: self.weight,
            });
        }
        Ok(())
    }
}

/// Validate a source registry: every weight valid, ids unique.
pub fn validate_sources(sources: &[SourceConfig]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for source in sources {
        source.validate()?;
        if !seen.insert(source.id.as_str()) {
            return Err(ConfigError::DuplicateSource(source.id.clone()));
        }
    }
    Ok(())
}

/// The four sources shipped with the pipeline
pub fn default_sources() -> Vec<SourceConfig> {
    vec![
        SourceConfig::new("snopes", 0.30).with_rate_limit(100),
        SourceConfig::new("politifact", 0.25).with_rate_limit(50),
        SourceConfig::new("factcheck_org", 0.25).with_rate_limit(30),
        SourceConfig::new("google_fact_check", 0.20).with_rate_limit(1000),
    ]
}

/// Result of the weighted vote for one claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusOutcome {
    pub status: VerdictStatus,
    /// Winning score over total responding weight, in [0, 1]
    pub support: f64,
    pub responding_sources: usize,
}

impl ConsensusOutcome {
    fn unknown() -> Self {
        Self {
            status: VerdictStatus::Unknown,
            support: 0.0,
            responding_sources: 0,
        }
    }

    /// Run the weighted vote.
    ///
    /// Only verdicts from enabled, configured sources that did not error are
    /// counted. No responders (or nothing but zero-confidence answers)
    /// yields `Unknown`.
    pub fn compute<'a>(
        verdicts: impl IntoIterator<Item = &'a SourceVerdict>,
        sources: &[SourceConfig],
    ) -> Self {
        let mut scores: BTreeMap<VerdictStatus, f64> = BTreeMap::new();
        let mut total_weight = 0.0;
        let mut responding = 0;

        for verdict in verdicts {
            if verdict.is_error() {
                continue;
            }
            let Some(config) = sources.iter().find(|s| s.id == verdict.source_id) else {
                continue;
            };
            if !config.enabled {
                continue;
            }

            responding += 1;
            total_weight += config.weight;
            *scores.entry(verdict.status).or_insert(0.0) += config.weight * verdict.confidence;
        }

        if responding == 0 {
            return Self::unknown();
        }

        let best = scores.values().copied().fold(0.0_f64, f64::max);
        if best <= SCORE_EPSILON {
            return Self {
                responding_sources: responding,
                ..Self::unknown()
            };
        }

        let status = VerdictStatus::CONSENSUS_PRIORITY
            .into_iter()
            .find(|s| scores.get(s).is_some_and(|v| best - v <= SCORE_EPSILON))
            .unwrap_or(VerdictStatus::Unknown);

        let support = if total_weight > 0.0 {
            round_to((best / total_weight).clamp(0.0, 1.0), 2)
        } else {
            0.0
        };

        Self {
            status,
            support,
            responding_sources: responding,
        }
    }
}

/// Every source's verdict for one claim plus the reconciled status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimConsensus {
    pub claim: Claim,
    /// At most one verdict per source id
    pub source_results: BTreeMap<String, SourceVerdict>,
    pub consensus: VerdictStatus,
    pub support: f64,
    pub responding_sources: usize,
}

impl ClaimConsensus {
    /// Collect verdicts for `claim` and compute its consensus.
    ///
    /// If a source appears twice, the later verdict replaces the earlier one.
    pub fn new(
        claim: Claim,
        verdicts: impl IntoIterator<Item = SourceVerdict>,
        sources: &[SourceConfig],
    ) -> Self {
        let source_results: BTreeMap<String, SourceVerdict> = verdicts
            .into_iter()
            .map(|v| (v.source_id.clone(), v))
            .collect();

        let outcome = ConsensusOutcome::compute(source_results.values(), sources);

        Self {
            claim,
            source_results,
            consensus: outcome.status,
            support: outcome.support,
            responding_sources: outcome.responding_sources,
        }
    }
}
