//! Regional misinformation patterns
//!
//! Unlike the other layers this produces a *risk* score: each matching
//! pattern adds its category's points, capped at 100.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::lexicon::{Lexicon, RegionalCategory};

const MAX_RISK: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalAnalysis {
    /// 0–100 risk
    pub risk_score: u32,
    /// "{category label}: {matched text}" per hit, in lexicon order
    pub risk_factors: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct RegionalAnalyzer {
    patterns: Vec<(RegionalCategory, Regex)>,
}

impl RegionalAnalyzer {
    /// Compile the lexicon's patterns; a bad pattern is a config error
    pub fn new(lexicon: &Lexicon) -> Result<Self, ConfigError> {
        let patterns = lexicon
            .regional_patterns
            .iter()
            .map(|p| {
                RegexBuilder::new(&p.pattern)
                    .case_insensitive(true)
                    .build()
                    .map(|re| (p.category, re))
                    .map_err(|e| ConfigError::InvalidPattern {
                        pattern: p.pattern.clone(),
                        reason: e.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    pub fn analyze(&self, content_lower: &str) -> RegionalAnalysis {
        let mut risk = 0;
        let mut risk_factors = Vec::new();

        for (category, regex) in &self.patterns {
            if let Some(m) = regex.find(content_lower) {
                risk += category.risk_points();
                risk_factors.push(format!("{}: {}", category.label(), m.as_str()));
            }
        }

        RegionalAnalysis {
            risk_score: risk.min(MAX_RISK),
            risk_factors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::RegionalPattern;

    fn analyze(text: &str) -> RegionalAnalysis {
        RegionalAnalyzer::new(&Lexicon::default())
            .unwrap()
            .analyze(&text.to_lowercase())
    }

    #[test]
    fn no_patterns_no_risk() {
        let result = analyze("The monsoon arrived two days early this year.");
        assert_eq!(result.risk_score, 0);
        assert!(result.risk_factors.is_empty());
    }

    #[test]
    fn health_myth_and_scam() {
        let result = analyze("Garlic prevents COVID! Also earn 5 lakhs from home.");
        assert_eq!(result.risk_score, 65);
        assert_eq!(
            result.risk_factors,
            vec![
                "Health misinformation: garlic prevents covid",
                "Financial scam pattern: earn 5 lakhs from home",
            ]
        );
    }

    #[test]
    fn risk_capped() {
        let result = analyze(
            "cow urine and gaumutra, turmeric immunity, hot water kills virus, garlic prevents covid",
        );
        assert_eq!(result.risk_score, 100);
        assert_eq!(result.risk_factors.len(), 5);
    }

    #[test]
    fn invalid_pattern_rejected() {
        let lexicon = Lexicon {
            regional_patterns: vec![RegionalPattern::new(RegionalCategory::Political, "(unclosed")],
            ..Lexicon::default()
        };
        assert!(matches!(
            RegionalAnalyzer::new(&lexicon),
            Err(ConfigError::InvalidPattern { .. })
        ));
    }
}
