use serde::{Deserialize, Serialize};

/// One contributor to the composite score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    SemanticConsistency,
    FactualVerification,
    SourceCredibility,
    LinguisticPatterns,
    TemporalAnalysis,
    RegionalContext,
    AiAssessment,
}

impl Component {
    pub const ALL: [Component; 7] = [
        Self::SemanticConsistency,
        Self::FactualVerification,
        Self::SourceCredibility,
        Self::LinguisticPatterns,
        Self::TemporalAnalysis,
        Self::RegionalContext,
        Self::AiAssessment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SemanticConsistency => "semantic_consistency",
            Self::FactualVerification => "factual_verification",
            Self::SourceCredibility => "source_credibility",
            Self::LinguisticPatterns => "linguistic_patterns",
            Self::TemporalAnalysis => "temporal_analysis",
            Self::RegionalContext => "regional_context",
            Self::AiAssessment => "ai_assessment",
        }
    }
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sub-score as supplied by its producer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentInput {
    /// 0–100, higher is more credible
    Credibility(f64),
    /// 0–100, higher is riskier; inverted before scoring
    Risk(f64),
    /// The producer failed; the reason is reported back
    Unavailable(String),
}

impl ComponentInput {
    /// Value on the credibility scale, clamped to [0, 100].
    ///
    /// `None` for unavailable inputs and for non-finite values.
    pub fn credibility(&self) -> Option<f64> {
        let value = match self {
            Self::Credibility(v) => *v,
            Self::Risk(v) => 100.0 - *v,
            Self::Unavailable(_) => return None,
        };
        value.is_finite().then(|| value.clamp(0.0, 100.0))
    }

    /// Why the component is missing from the sum, if it is
    pub fn unavailable_reason(&self) -> Option<String> {
        match self {
            Self::Unavailable(reason) => Some(reason.clone()),
            Self::Credibility(v) | Self::Risk(v) if !v.is_finite() => {
                Some(format!("non-finite score {v}"))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_is_inverted() {
        assert_eq!(ComponentInput::Risk(30.0).credibility(), Some(70.0));
        assert_eq!(ComponentInput::Credibility(30.0).credibility(), Some(30.0));
    }

    #[test]
    fn out_of_range_is_clamped() {
        assert_eq!(ComponentInput::Risk(140.0).credibility(), Some(0.0));
        assert_eq!(ComponentInput::Credibility(-5.0).credibility(), Some(0.0));
    }

    #[test]
    fn nan_counts_as_unavailable() {
        let input = ComponentInput::Credibility(f64::NAN);
        assert_eq!(input.credibility(), None);
        assert!(input.unavailable_reason().is_some());
    }

    #[test]
    fn component_names_match_serde() {
        for component in Component::ALL {
            let json = serde_json::to_string(&component).unwrap();
            assert_eq!(json, format!("\"{}\"", component.as_str()));
        }
    }
}
