//! Optional text classifier collaborator
//!
//! An external model (typically a hosted LLM) that rates the whole text.
//! The pipeline treats it as best effort: a slow or failing classifier is
//! replaced by [`ClassifierAssessment::fallback`] and the composite score
//! records the `ai_assessment` component as unavailable.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::warn;

use crate::error::ClassifierError;

/// What the classifier thinks of a text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierAssessment {
    /// 0–100, higher is riskier
    pub risk_score: u32,
    #[serde(default)]
    pub red_flags: Vec<String>,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub verification_steps: Vec<String>,
}

impl ClassifierAssessment {
    /// Neutral stand-in used when the classifier cannot answer
    pub fn fallback() -> Self {
        Self {
            risk_score: 0,
            red_flags: Vec::new(),
            explanation: "AI analysis unavailable. Using rule-based analysis instead.".to_string(),
            verification_steps: vec![
                "Manually verify information with trusted sources".to_string(),
                "Check for author credentials and publication date".to_string(),
            ],
        }
    }
}

#[async_trait]
pub trait TextClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<ClassifierAssessment, ClassifierError>;
}

/// The assessment as reported, plus whether it is real
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierReport {
    pub available: bool,
    pub assessment: ClassifierAssessment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Cut `text` to `max_chars` characters, marking the cut with "..."
pub fn truncate_for_classifier(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

/// Ask the classifier, never failing
pub async fn consult(
    classifier: &dyn TextClassifier,
    text: &str,
    max_chars: usize,
    limit: Duration,
) -> ClassifierReport {
    let input = truncate_for_classifier(text, max_chars);

    let outcome = match timeout(limit, classifier.classify(&input)).await {
        Ok(result) => result,
        Err(_) => Err(ClassifierError::Timeout(limit)),
    }
    .and_then(|assessment| {
        if assessment.risk_score > 100 {
            Err(ClassifierError::InvalidResponse(format!(
                "risk score {} out of range",
                assessment.risk_score
            )))
        } else {
            Ok(assessment)
        }
    });

    match outcome {
        Ok(assessment) => ClassifierReport {
            available: true,
            assessment,
            error: None,
        },
        Err(e) => {
            warn!("text classifier failed: {}", e);
            ClassifierReport {
                available: false,
                assessment: ClassifierAssessment::fallback(),
                error: Some(e.to_string()),
            }
        }
    }
}
