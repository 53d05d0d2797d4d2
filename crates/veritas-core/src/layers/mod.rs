//! Heuristic analysis layers
//!
//! Each layer is a pure function of the text (and, for the source layer, the
//! URL) over the injected [`Lexicon`]. Their scores become the non-factual
//! inputs of the composite risk score.

pub mod linguistic;
pub mod regional;
pub mod semantic;
pub mod source;
pub mod temporal;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::lexicon::Lexicon;
use crate::risk::{Component, ComponentInput};

pub use linguistic::{LinguisticAnalysis, LinguisticAnalyzer};
pub use regional::{RegionalAnalysis, RegionalAnalyzer};
pub use semantic::{SemanticAnalysis, SemanticAnalyzer};
pub use source::{DomainReputation, SourceAnalysis, SourceAnalyzer};
pub use temporal::{ManipulationRisk, TemporalAnalysis, TemporalAnalyzer, TemporalConfig};

/// Output of every layer for one piece of content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerReport {
    pub semantic: SemanticAnalysis,
    pub linguistic: LinguisticAnalysis,
    pub temporal: TemporalAnalysis,
    pub source: SourceAnalysis,
    pub regional: RegionalAnalysis,
}

impl LayerReport {
    /// Layer scores keyed by composite component.
    ///
    /// The regional layer is reported as risk and is inverted by the scorer.
    pub fn components(&self) -> BTreeMap<Component, ComponentInput> {
        BTreeMap::from([
            (
                Component::SemanticConsistency,
                ComponentInput::Credibility(self.semantic.semantic_score as f64),
            ),
            (
                Component::SourceCredibility,
                ComponentInput::Credibility(self.source.credibility_score as f64),
            ),
            (
                Component::LinguisticPatterns,
                ComponentInput::Credibility(self.linguistic.linguistic_score as f64),
            ),
            (
                Component::TemporalAnalysis,
                ComponentInput::Credibility(self.temporal.temporal_score as f64),
            ),
            (
                Component::RegionalContext,
                ComponentInput::Risk(self.regional.risk_score as f64),
            ),
        ])
    }
}

/// All heuristic layers, built once from a lexicon
#[derive(Debug, Clone)]
pub struct HeuristicLayers {
    semantic: SemanticAnalyzer,
    linguistic: LinguisticAnalyzer,
    temporal: TemporalAnalyzer,
    source: SourceAnalyzer,
    regional: RegionalAnalyzer,
}

impl HeuristicLayers {
    /// Fails only if a regional pattern does not compile
    pub fn new(lexicon: &Lexicon, temporal: TemporalConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            semantic: SemanticAnalyzer::new(lexicon),
            linguistic: LinguisticAnalyzer::new(lexicon),
            temporal: TemporalAnalyzer::new(lexicon, temporal),
            source: SourceAnalyzer::new(lexicon),
            regional: RegionalAnalyzer::new(lexicon)?,
        })
    }

    pub fn analyze(&self, content: &str, url: Option<&str>) -> LayerReport {
        let lower = content.to_lowercase();

        LayerReport {
            semantic: self.semantic.analyze(&lower),
            linguistic: self.linguistic.analyze(content, &lower),
            temporal: self.temporal.analyze(&lower),
            source: self.source.analyze(url),
            regional: self.regional.analyze(&lower),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn components_cover_all_layers() {
        let layers = HeuristicLayers::new(&Lexicon::default(), TemporalConfig::default()).unwrap();
        let report = layers.analyze("Cow urine cures everything.", None);
        let components = report.components();

        assert_eq!(components.len(), 5);
        assert_eq!(
            components[&Component::RegionalContext],
            ComponentInput::Risk(30.0)
        );
        assert_eq!(
            components[&Component::SourceCredibility],
            ComponentInput::Credibility(50.0)
        );
        assert!(!components.contains_key(&Component::FactualVerification));
    }

    #[test]
    fn temporal_thresholds_reach_the_layer() {
        let strict = TemporalConfig {
            unanchored_penalty: 60,
            ..TemporalConfig::default()
        };
        let lexicon = Lexicon::default();
        let text = "Breaking: the bridge is closed.";

        let default = HeuristicLayers::new(&lexicon, TemporalConfig::default()).unwrap();
        let strict = HeuristicLayers::new(&lexicon, strict).unwrap();

        assert_eq!(default.analyze(text, None).temporal.temporal_score, 80);
        let report = strict.analyze(text, None);
        assert_eq!(report.temporal.temporal_score, 40);
        assert_eq!(report.temporal.manipulation_risk, ManipulationRisk::High);
    }
}
