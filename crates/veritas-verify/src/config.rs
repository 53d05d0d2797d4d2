//! Pipeline configuration
//!
//! Every section implements `Default` and deserialises with
//! `#[serde(default)]`, so a JSON file only needs the keys it changes.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use veritas_core::{default_sources, Lexicon, RiskWeights, SourceConfig, TemporalConfig};

/// Verification cache settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Entry lifetime (default: 86_400s = 24 hours)
    pub ttl_secs: u64,
    /// Maximum (claim, source) entries; oldest evicted first. None = unbounded
    pub capacity: Option<usize>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 86_400,
            capacity: None,
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// Fan-out limits for the consensus engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Only the first N claims are sent to sources (default: 5)
    pub max_verified_claims: usize,
    /// Concurrent source calls (default: 20)
    pub max_in_flight: usize,
    /// Per source call, counted once a worker slot is free (default: 5s)
    pub per_call_timeout_ms: u64,
    /// Whole batch, counted from the first spawn (default: 30s)
    pub batch_timeout_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_verified_claims: 5,
            max_in_flight: 20,
            per_call_timeout_ms: 5_000,
            batch_timeout_ms: 30_000,
        }
    }
}

impl EngineConfig {
    pub fn per_call_timeout(&self) -> Duration {
        Duration::from_millis(self.per_call_timeout_ms)
    }

    pub fn batch_timeout(&self) -> Duration {
        Duration::from_millis(self.batch_timeout_ms)
    }
}

/// Everything the pipeline needs, loadable from one JSON file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub sources: Vec<SourceConfig>,
    pub cache: CacheConfig,
    pub engine: EngineConfig,
    pub risk_weights: RiskWeights,
    pub lexicon: Lexicon,
    /// Urgency thresholds for the temporal layer
    pub temporal: TemporalConfig,
    /// Classifier call budget (default: 10s)
    pub classifier_timeout_ms: u64,
    /// Text sent to the classifier is cut to this many chars (default: 1000)
    pub classifier_max_chars: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            cache: CacheConfig::default(),
            engine: EngineConfig::default(),
            risk_weights: RiskWeights::default(),
            lexicon: Lexicon::default(),
            temporal: TemporalConfig::default(),
            classifier_timeout_ms: 10_000,
            classifier_max_chars: 1_000,
        }
    }
}

impl PipelineConfig {
    /// Load from a JSON file; missing keys keep their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> veritas::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> veritas::Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn classifier_timeout(&self) -> Duration {
        Duration::from_millis(self.classifier_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veritas_core::Component;

    #[test]
    fn empty_json_is_default() {
        let config = PipelineConfig::from_json_str("{}").unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn partial_sections_merge() {
        let raw = r#"{
            "engine": {"per_call_timeout_ms": 250},
            "cache": {"capacity": 100},
            "risk_weights": {"regional_context": 0.0},
            "temporal": {"urgency_penalty": 25}
        }"#;
        let config = PipelineConfig::from_json_str(raw).unwrap();
        assert_eq!(config.engine.per_call_timeout(), Duration::from_millis(250));
        assert_eq!(config.engine.max_in_flight, 20);
        assert_eq!(config.cache.capacity, Some(100));
        assert_eq!(config.cache.ttl_secs, 86_400);
        assert_eq!(config.risk_weights.get(Component::RegionalContext), 0.0);
        assert_eq!(config.sources.len(), 4);
        assert_eq!(config.temporal.urgency_penalty, 25);
        assert_eq!(config.temporal.urgency_allowance, 2);
    }

    #[test]
    fn invalid_weight_is_serialization_error() {
        let err = PipelineConfig::from_json_str(r#"{"risk_weights": {"ai_assessment": -1}}"#)
            .unwrap_err();
        assert!(matches!(err, veritas::Error::Serialization(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = PipelineConfig::from_json_file("/nonexistent/veritas.json").unwrap_err();
        assert!(matches!(err, veritas::Error::Io(_)));
    }
}
