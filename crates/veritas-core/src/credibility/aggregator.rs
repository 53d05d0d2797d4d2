use std::collections::BTreeMap;

use super::{CredibilityReport, SourceBreakdown, NEUTRAL_CREDIBILITY};
use crate::consensus::ClaimConsensus;
use crate::lexicon::{matches_in, Lexicon};
use crate::recommendation::{Priority, Recommendation};
use crate::round_to;
use crate::verdict::VerdictStatus;

/// Share of unknown-consensus claims above which independent checking is advised
const UNKNOWN_SHARE_THRESHOLD: f64 = 0.7;

/// Turns per-claim consensus into a credibility report
#[derive(Debug, Clone)]
pub struct CredibilityAggregator {
    suspicious_indicators: Vec<String>,
}

impl Default for CredibilityAggregator {
    fn default() -> Self {
        Self::new(&Lexicon::default())
    }
}

impl CredibilityAggregator {
    pub fn new(lexicon: &Lexicon) -> Self {
        Self {
            suspicious_indicators: lexicon
                .suspicious_indicators
                .iter()
                .map(|s| s.to_lowercase())
                .collect(),
        }
    }

    /// Full report: score, breakdown, recommendations and the indicators
    /// found in `content`.
    pub fn aggregate(&self, results: &[ClaimConsensus], content: &str) -> CredibilityReport {
        CredibilityReport {
            overall_credibility: Self::score(results),
            source_breakdown: Self::source_breakdown(results),
            recommendations: Self::recommendations(results),
            suspicious_indicators: self.suspicious_indicators(content),
        }
    }

    /// Points a claim contributes for its consensus label
    pub fn points(status: VerdictStatus) -> u32 {
        match status {
            VerdictStatus::True => 90,
            VerdictStatus::PartiallyTrue => 70,
            VerdictStatus::False => 10,
            VerdictStatus::Mixture | VerdictStatus::Unknown | VerdictStatus::Error => 50,
        }
    }

    /// Integer mean of claim points, [`NEUTRAL_CREDIBILITY`] when empty
    pub fn score(results: &[ClaimConsensus]) -> u32 {
        if results.is_empty() {
            return NEUTRAL_CREDIBILITY;
        }
        let total: u32 = results.iter().map(|r| Self::points(r.consensus)).sum();
        (total / results.len() as u32).min(100)
    }

    pub fn source_breakdown(results: &[ClaimConsensus]) -> BTreeMap<String, SourceBreakdown> {
        let mut breakdown: BTreeMap<String, SourceBreakdown> = BTreeMap::new();
        let mut confidence_sums: BTreeMap<&str, f64> = BTreeMap::new();

        for result in results {
            for (source_id, verdict) in &result.source_results {
                let entry = breakdown.entry(source_id.clone()).or_default();
                entry.checks_performed += 1;
                *entry.status_distribution.entry(verdict.status).or_insert(0) += 1;
                *confidence_sums.entry(source_id.as_str()).or_insert(0.0) += verdict.confidence;
            }
        }

        for (source_id, entry) in breakdown.iter_mut() {
            let sum = confidence_sums.get(source_id.as_str()).copied().unwrap_or(0.0);
            entry.avg_confidence = round_to(sum / entry.checks_performed as f64, 2);
        }

        breakdown
    }

    /// Rule-based recommendations, most urgent first
    pub fn recommendations(results: &[ClaimConsensus]) -> Vec<Recommendation> {
        let count = |status: VerdictStatus| results.iter().filter(|r| r.consensus == status).count();
        let false_claims = count(VerdictStatus::False);
        let mixture_claims = count(VerdictStatus::Mixture);
        let unknown_claims = count(VerdictStatus::Unknown);

        let mut recommendations = Vec::new();

        if false_claims > 0 {
            recommendations.push(
                Recommendation::new(
                    Priority::Critical,
                    "VERIFY IMMEDIATELY",
                    format!("{false_claims} claims flagged as false"),
                )
                .with_details(vec![
                    "Multiple fact-checkers have disputed key claims in this content".into(),
                ]),
            );
        }

        if mixture_claims > 0 {
            recommendations.push(
                Recommendation::new(
                    Priority::High,
                    "SEEK ADDITIONAL CONTEXT",
                    format!("{mixture_claims} claims need context"),
                )
                .with_details(vec![
                    "Some claims contain partial truths that may be misleading without context"
                        .into(),
                ]),
            );
        }

        if unknown_claims as f64 > results.len() as f64 * UNKNOWN_SHARE_THRESHOLD {
            recommendations.push(
                Recommendation::new(
                    Priority::Medium,
                    "INDEPENDENT VERIFICATION NEEDED",
                    "Many claims could not be verified",
                )
                .with_details(vec!["Consider seeking primary sources or expert opinions".into()]),
            );
        }

        recommendations
    }

    /// Indicator phrases present in `content`, in lexicon order
    pub fn suspicious_indicators(&self, content: &str) -> Vec<String> {
        let lower = content.to_lowercase();
        matches_in(&self.suspicious_indicators, &lower)
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}
