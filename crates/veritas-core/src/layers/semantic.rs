//! Semantic consistency: assertion-to-evidence balance and fallacy markers

use serde::{Deserialize, Serialize};

use crate::lexicon::{matches_in, FallacyFamily, Lexicon};
use crate::round_to;

const UNSUPPORTED_CLAIMS_PENALTY: i32 = 30;
const FALLACY_PENALTY: i32 = 15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticAnalysis {
    /// 0–100 credibility
    pub semantic_score: u32,
    pub detected_fallacies: Vec<String>,
    pub claims_to_evidence_ratio: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SemanticAnalyzer {
    claim_words: Vec<String>,
    evidence_words: Vec<String>,
    fallacies: Vec<FallacyFamily>,
}

impl SemanticAnalyzer {
    pub fn new(lexicon: &Lexicon) -> Self {
        Self {
            claim_words: lexicon.claim_words.clone(),
            evidence_words: lexicon.evidence_words.clone(),
            fallacies: lexicon.fallacies.clone(),
        }
    }

    pub fn analyze(&self, content_lower: &str) -> SemanticAnalysis {
        let claims = matches_in(&self.claim_words, content_lower).len();
        let evidence = matches_in(&self.evidence_words, content_lower).len();

        let mut score: i32 = 100;
        let mut notes = Vec::new();

        if claims > evidence * 2 {
            score -= UNSUPPORTED_CLAIMS_PENALTY;
            notes.push("Many claims made without sufficient evidence".to_string());
        }

        // One penalty per family, however many of its markers appear
        let detected_fallacies: Vec<String> = self
            .fallacies
            .iter()
            .filter(|f| !matches_in(&f.markers, content_lower).is_empty())
            .map(|f| f.name.clone())
            .collect();
        score -= FALLACY_PENALTY * detected_fallacies.len() as i32;

        SemanticAnalysis {
            semantic_score: score.clamp(0, 100) as u32,
            detected_fallacies,
            claims_to_evidence_ratio: round_to(claims as f64 / evidence.max(1) as f64, 2),
            notes,
        }
    }
}
