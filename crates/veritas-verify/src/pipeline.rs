//! End-to-end content analysis
//!
//! One [`Pipeline`] owns the extractor, the consensus engine (with its
//! shared cache), the heuristic layers and the scorer. An analysis run:
//!
//! 1. extracts claims;
//! 2. verifies the leading claims and, concurrently, consults the optional
//!    text classifier;
//! 3. aggregates credibility from the per-claim consensus;
//! 4. runs the heuristic layers;
//! 5. merges everything into a composite risk score.
//!
//! Nothing in a run returns an error: failing sources and classifiers
//! degrade to neutral values and are reported as such.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::{debug, info};
use veritas::tracing::prefix;
use veritas_core::{
    Claim, ClaimConsensus, ClaimExtractor, Component, ComponentInput, CompositeRiskResult,
    CompositeRiskScorer, CredibilityAggregator, HeuristicLayers, LayerReport, Recommendation,
    SourceBreakdown,
};

use crate::cache::VerificationCache;
use crate::classifier::{consult, ClassifierReport, TextClassifier};
use crate::config::PipelineConfig;
use crate::engine::ConsensusEngine;
use crate::error::PipelineError;
use crate::source::{simulated_sources, SourceVerifier};

/// Claims echoed back in the report
const REPORTED_CLAIMS: usize = 5;
const MAX_RED_FLAGS: usize = 10;
const LINGUISTIC_RED_FLAGS: usize = 3;
const REGIONAL_RED_FLAGS: usize = 2;

/// Input to [`Pipeline::analyze`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Externally computed sub-scores; these replace the pipeline's own
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub overrides: BTreeMap<Component, ComponentInput>,
}

impl AnalysisRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_override(mut self, component: Component, input: ComponentInput) -> Self {
        self.overrides.insert(component, input);
        self
    }
}

/// Everything one analysis run produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub total_claims: usize,
    pub extracted_claims: Vec<Claim>,
    pub fact_check_results: Vec<ClaimConsensus>,
    pub overall_credibility: u32,
    pub source_breakdown: BTreeMap<String, SourceBreakdown>,
    pub recommendations: Vec<Recommendation>,
    pub suspicious_indicators: Vec<String>,
    pub layers: LayerReport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<ClassifierReport>,
    pub risk: CompositeRiskResult,
    pub red_flags: Vec<String>,
    pub processing_time_seconds: f64,
}

/// Assembles a [`Pipeline`] from its collaborators
pub struct PipelineBuilder {
    config: PipelineConfig,
    verifiers: Vec<Arc<dyn SourceVerifier>>,
    classifier: Option<Arc<dyn TextClassifier>>,
}

impl PipelineBuilder {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            verifiers: Vec::new(),
            classifier: None,
        }
    }

    /// Register the four built-in simulated sources
    pub fn with_simulated_sources(mut self) -> Self {
        self.verifiers.extend(simulated_sources());
        self
    }

    /// Register a verifier; a later one with the same id replaces an earlier one
    pub fn with_verifier(mut self, verifier: Arc<dyn SourceVerifier>) -> Self {
        self.verifiers.push(verifier);
        self
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn TextClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn build(self) -> Result<Pipeline, PipelineError> {
        let PipelineConfig {
            sources,
            cache,
            engine,
            risk_weights,
            lexicon,
            temporal,
            classifier_timeout_ms,
            classifier_max_chars,
        } = self.config;

        let layers = HeuristicLayers::new(&lexicon, temporal)?;
        let cache = Arc::new(VerificationCache::new(&cache));
        let engine = ConsensusEngine::new(sources, self.verifiers, cache, engine)?;

        Ok(Pipeline {
            extractor: ClaimExtractor::new(&lexicon),
            engine,
            aggregator: CredibilityAggregator::new(&lexicon),
            layers,
            scorer: CompositeRiskScorer::new(risk_weights),
            classifier: self.classifier,
            classifier_timeout: Duration::from_millis(classifier_timeout_ms),
            classifier_max_chars,
        })
    }
}

/// The full analysis pipeline; cheap to share behind an `Arc`
pub struct Pipeline {
    extractor: ClaimExtractor,
    engine: ConsensusEngine,
    aggregator: CredibilityAggregator,
    layers: HeuristicLayers,
    scorer: CompositeRiskScorer,
    classifier: Option<Arc<dyn TextClassifier>>,
    classifier_timeout: Duration,
    classifier_max_chars: usize,
}

impl Pipeline {
    pub fn builder(config: PipelineConfig) -> PipelineBuilder {
        PipelineBuilder::new(config)
    }

    pub fn engine(&self) -> &ConsensusEngine {
        &self.engine
    }

    pub fn cache(&self) -> &VerificationCache {
        self.engine.cache()
    }

    /// Analyze plain text with no URL and no overrides
    pub async fn analyze_content(&self, text: &str) -> AnalysisReport {
        self.analyze(&AnalysisRequest::new(text)).await
    }

    pub async fn analyze(&self, request: &AnalysisRequest) -> AnalysisReport {
        let started = Instant::now();
        let text = request.text.as_str();
        info!(
            "{} analyzing {} chars{}",
            prefix::PIPELINE_OPEN,
            text.chars().count(),
            if request.url.is_some() { " with url" } else { "" }
        );

        let claims = self.extractor.extract(text);
        debug!("extracted {} claims", claims.len());

        let (fact_check_results, classifier) =
            tokio::join!(self.engine.verify_claims(&claims), self.classify(text));

        let credibility = self.aggregator.aggregate(&fact_check_results, text);
        let layers = self.layers.analyze(text, request.url.as_deref());

        let mut components = layers.components();
        components.insert(
            Component::FactualVerification,
            ComponentInput::Risk(100.0 - credibility.overall_credibility as f64),
        );
        if let Some(report) = &classifier {
            let input = match (report.available, &report.error) {
                (true, _) => ComponentInput::Risk(report.assessment.risk_score as f64),
                (false, Some(reason)) => ComponentInput::Unavailable(reason.clone()),
                (false, None) => ComponentInput::Unavailable("classifier unavailable".to_string()),
            };
            components.insert(Component::AiAssessment, input);
        }
        components.extend(request.overrides.clone());

        let risk = self.scorer.score(&components);
        let red_flags = red_flags(classifier.as_ref(), &layers);

        let processing_time_seconds =
            (started.elapsed().as_secs_f64() * 1000.0).round() / 1000.0;

        info!(
            "{} {} claims, credibility {}, risk {} ({}) in {:.3}s",
            prefix::PIPELINE_CLOSE,
            claims.len(),
            credibility.overall_credibility,
            risk.overall_score,
            risk.tier,
            processing_time_seconds
        );

        AnalysisReport {
            total_claims: claims.len(),
            extracted_claims: claims.into_iter().take(REPORTED_CLAIMS).collect(),
            fact_check_results,
            overall_credibility: credibility.overall_credibility,
            source_breakdown: credibility.source_breakdown,
            recommendations: credibility.recommendations,
            suspicious_indicators: credibility.suspicious_indicators,
            layers,
            classifier,
            risk,
            red_flags,
            processing_time_seconds,
        }
    }

    async fn classify(&self, text: &str) -> Option<ClassifierReport> {
        let classifier = self.classifier.as_ref()?;
        Some(
            consult(
                classifier.as_ref(),
                text,
                self.classifier_max_chars,
                self.classifier_timeout,
            )
            .await,
        )
    }
}

/// Classifier flags, then the leading linguistic and regional findings
fn red_flags(classifier: Option<&ClassifierReport>, layers: &LayerReport) -> Vec<String> {
    let classifier_flags = classifier
        .map(|report| report.assessment.red_flags.as_slice())
        .unwrap_or_default();

    let candidates = classifier_flags
        .iter()
        .chain(layers.linguistic.detected_patterns.iter().take(LINGUISTIC_RED_FLAGS))
        .chain(layers.regional.risk_factors.iter().take(REGIONAL_RED_FLAGS));

    let mut seen = HashSet::new();
    candidates
        .filter(|flag| seen.insert(*flag))
        .take(MAX_RED_FLAGS)
        .cloned()
        .collect()
}
