use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Component, ComponentInput, RiskWeights};
use crate::recommendation::{Priority, Recommendation};
use crate::round_to;

const NEUTRAL_CREDIBILITY: f64 = 50.0;

const BASE_CONFIDENCE: f64 = 0.8;
const UNAVAILABLE_PENALTY: f64 = 0.15;
const AGREEMENT_ADJUSTMENT: f64 = 0.1;
/// Population variance below which components are considered to agree
const AGREEMENT_VARIANCE: f64 = 200.0;
const MIN_CONFIDENCE: f64 = 0.3;
const MAX_CONFIDENCE: f64 = 0.95;

/// Discrete risk classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskTier {
    Minimal,
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskTier {
    /// Tier for a 0–100 risk score (inclusive lower bounds)
    pub fn from_score(score: u32) -> Self {
        match score {
            70.. => Self::Critical,
            50..=69 => Self::High,
            30..=49 => Self::Moderate,
            15..=29 => Self::Low,
            _ => Self::Minimal,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Critical => "Multiple strong indicators of misinformation detected",
            Self::High => "Significant misinformation indicators present",
            Self::Moderate => "Some concerning elements detected",
            Self::Low => "Minor concerns, generally appears credible",
            Self::Minimal => "Strong credibility indicators, low risk",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Minimal => write!(f, "MINIMAL"),
            Self::Low => write!(f, "LOW"),
            Self::Moderate => write!(f, "MODERATE"),
            Self::High => write!(f, "HIGH"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Final risk judgment for one piece of content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeRiskResult {
    /// 0–100, higher is riskier
    pub overall_score: u32,
    pub tier: RiskTier,
    pub description: String,
    /// 0.3–0.95
    pub confidence: f64,
    /// Credibility-scale value of every available component
    pub component_scores: BTreeMap<Component, f64>,
    /// Share of the weighted credibility each component contributed
    pub weighted_components: BTreeMap<Component, f64>,
    /// Components left out, with the reason
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub unavailable: BTreeMap<Component, String>,
    pub recommendations: Vec<Recommendation>,
}

/// Weighted merge of component sub-scores
#[derive(Debug, Clone, Default)]
pub struct CompositeRiskScorer {
    weights: RiskWeights,
}

impl CompositeRiskScorer {
    pub fn new(weights: RiskWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &RiskWeights {
        &self.weights
    }

    pub fn score(&self, components: &BTreeMap<Component, ComponentInput>) -> CompositeRiskResult {
        let mut component_scores = BTreeMap::new();
        let mut unavailable = BTreeMap::new();

        for (component, input) in components {
            match input.credibility() {
                Some(value) => {
                    component_scores.insert(*component, value);
                }
                None => {
                    let reason = input
                        .unavailable_reason()
                        .unwrap_or_else(|| "unavailable".to_string());
                    unavailable.insert(*component, reason);
                }
            }
        }

        // Weight of components that are configured but not scored
        let missing_weight: f64 = self
            .weights
            .iter()
            .filter(|(c, _)| !component_scores.contains_key(c))
            .map(|(_, w)| w)
            .sum();
        let present_weight = self.weights.total() - missing_weight;

        let mut weighted_components = BTreeMap::new();
        let weighted_credibility = if present_weight > 0.0 {
            // Missing weight is handed to the present components pro rata
            let scale = if missing_weight > 0.0 {
                self.weights.total() / present_weight
            } else {
                1.0
            };
            let mut sum = 0.0;
            for (component, value) in &component_scores {
                let contribution = self.weights.get(*component) * value * scale;
                weighted_components.insert(*component, round_to(contribution, 2));
                sum += contribution;
            }
            sum
        } else {
            NEUTRAL_CREDIBILITY
        };

        let overall_score = (100.0 - weighted_credibility).clamp(0.0, 100.0).round() as u32;
        let tier = RiskTier::from_score(overall_score);

        CompositeRiskResult {
            overall_score,
            tier,
            description: tier.description().to_string(),
            confidence: confidence(&component_scores, unavailable.len()),
            recommendations: recommendations(overall_score, &component_scores),
            component_scores,
            weighted_components,
            unavailable,
        }
    }
}

fn confidence(scores: &BTreeMap<Component, f64>, unavailable: usize) -> f64 {
    let mut confidence = BASE_CONFIDENCE - UNAVAILABLE_PENALTY * unavailable as f64;

    if !scores.is_empty() {
        let n = scores.len() as f64;
        let mean = scores.values().sum::<f64>() / n;
        let variance = scores.values().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        if variance < AGREEMENT_VARIANCE {
            confidence += AGREEMENT_ADJUSTMENT;
        } else {
            confidence -= AGREEMENT_ADJUSTMENT;
        }
    }

    round_to(confidence.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE), 2)
}

fn recommendations(risk: u32, scores: &BTreeMap<Component, f64>) -> Vec<Recommendation> {
    let below = |component: Component, threshold: f64| {
        scores.get(&component).is_some_and(|v| *v < threshold)
    };

    let mut out = Vec::new();

    if risk >= 70 {
        out.push(
            Recommendation::new(
                Priority::Critical,
                "DO NOT SHARE",
                "Multiple severe misinformation indicators detected",
            )
            .with_details(vec![
                "This content shows strong signs of being misinformation. Sharing could spread false information.".into(),
            ]),
        );
    }
    if below(Component::SourceCredibility, 40.0) {
        out.push(
            Recommendation::new(
                Priority::High,
                "Verify source credibility",
                "Source appears unreliable",
            )
            .with_details(vec![
                "Check the publisher's reputation, editorial standards, and track record.".into(),
            ]),
        );
    }
    if below(Component::FactualVerification, 50.0) {
        out.push(
            Recommendation::new(
                Priority::High,
                "Fact-check specific claims",
                "Contains disputed factual claims",
            )
            .with_details(vec![
                "Use multiple fact-checking sources to verify specific claims before believing or sharing.".into(),
            ]),
        );
    }
    if below(Component::LinguisticPatterns, 60.0) {
        out.push(
            Recommendation::new(
                Priority::Medium,
                "Analyze language patterns",
                "Suspicious linguistic patterns detected",
            )
            .with_details(vec![
                "Content uses emotional manipulation or conspiracy language patterns.".into(),
            ]),
        );
    }
    if below(Component::TemporalAnalysis, 50.0) {
        out.push(
            Recommendation::new(
                Priority::Medium,
                "Question urgency claims",
                "Artificial urgency detected",
            )
            .with_details(vec![
                "Legitimate news rarely requires immediate sharing. Take time to verify.".into(),
            ]),
        );
    }

    out
}
