//! Temporal manipulation analysis
//!
//! Looks for manufactured urgency: many urgency cues ("breaking", "act
//! now"), or urgency with nothing anchoring it in time ("yesterday",
//! "hours ago").

use serde::{Deserialize, Serialize};

use crate::lexicon::{matches_in, Lexicon};

/// Thresholds for temporal scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemporalConfig {
    /// Urgency cues tolerated before each one is penalised (default: 2)
    pub urgency_allowance: usize,
    /// Points per urgency cue once over the allowance (default: 15)
    pub urgency_penalty: i32,
    /// Penalty for urgency with no time reference (default: 20)
    pub unanchored_penalty: i32,
    /// Scores below this are high manipulation risk (default: 50)
    pub high_risk_below: u32,
}

impl Default for TemporalConfig {
    fn default() -> Self {
        Self {
            urgency_allowance: 2,
            urgency_penalty: 15,
            unanchored_penalty: 20,
            high_risk_below: 50,
        }
    }
}

/// Likelihood that timing language is being used to push the reader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManipulationRisk {
    Low,
    High,
}

impl std::fmt::Display for ManipulationRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalAnalysis {
    /// 0–100 credibility
    pub temporal_score: u32,
    pub urgency_indicators: Vec<String>,
    pub time_references: Vec<String>,
    pub manipulation_risk: ManipulationRisk,
}

/// Temporal analyzer over injected urgency and time-reference lists
#[derive(Debug, Clone)]
pub struct TemporalAnalyzer {
    config: TemporalConfig,
    urgency: Vec<String>,
    time_references: Vec<String>,
}

impl TemporalAnalyzer {
    pub fn new(lexicon: &Lexicon, config: TemporalConfig) -> Self {
        Self {
            config,
            urgency: lexicon.urgency_indicators.clone(),
            time_references: lexicon.time_references.clone(),
        }
    }

    pub fn analyze(&self, content_lower: &str) -> TemporalAnalysis {
        let urgency = matches_in(&self.urgency, content_lower);
        let time_refs = matches_in(&self.time_references, content_lower);

        let mut score: i32 = 100;
        if urgency.len() > self.config.urgency_allowance {
            score -= urgency.len() as i32 * self.config.urgency_penalty;
        }
        if !urgency.is_empty() && time_refs.is_empty() {
            score -= self.config.unanchored_penalty;
        }
        let score = score.clamp(0, 100) as u32;

        TemporalAnalysis {
            temporal_score: score,
            manipulation_risk: self.risk_for(score),
            urgency_indicators: urgency.into_iter().map(str::to_string).collect(),
            time_references: time_refs.into_iter().map(str::to_string).collect(),
        }
    }

    fn risk_for(&self, score: u32) -> ManipulationRisk {
        if score < self.config.high_risk_below {
            ManipulationRisk::High
        } else {
            ManipulationRisk::Low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_analyzer() -> TemporalAnalyzer {
        TemporalAnalyzer::new(&Lexicon::default(), TemporalConfig::default())
    }

    #[test]
    fn calm_text_scores_full() {
        let result = default_analyzer().analyze("the council met on tuesday to discuss parking");
        assert_eq!(result.temporal_score, 100);
        assert_eq!(result.manipulation_risk, ManipulationRisk::Low);
    }

    #[test]
    fn unanchored_urgency_penalised() {
        let result = default_analyzer().analyze("breaking: the bridge is closed");
        assert_eq!(result.urgency_indicators, vec!["breaking"]);
        assert_eq!(result.temporal_score, 80);
    }

    #[test]
    fn anchored_urgency_not_penalised() {
        let result = default_analyzer().analyze("breaking: the bridge closed hours ago");
        assert_eq!(result.temporal_score, 100);
    }

    #[test]
    fn many_urgency_cues_are_high_risk() {
        // breaking, urgent, alert, warning
        let result = default_analyzer().analyze("breaking urgent alert warning for the city");
        assert_eq!(result.urgency_indicators.len(), 4);
        // 100 - 4*15 - 20
        assert_eq!(result.temporal_score, 20);
        assert_eq!(result.manipulation_risk, ManipulationRisk::High);
    }

    #[test]
    fn custom_thresholds() {
        let ta = TemporalAnalyzer::new(
            &Lexicon::default(),
            TemporalConfig {
                urgency_allowance: 0,
                unanchored_penalty: 0,
                ..TemporalConfig::default()
            },
        );
        assert_eq!(ta.analyze("urgent").temporal_score, 85);
    }
}
