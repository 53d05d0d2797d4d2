use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Component;
use crate::error::ConfigError;

/// Explicit component → weight map.
///
/// The defaults sum to 1. Custom weights may sum to less; the scorer does
/// not rescale them, it only redistributes the weight of components that
/// are missing or unavailable. Every weight is finite and non-negative. A
/// component with no entry weighs 0 and is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<Component, f64>", into = "BTreeMap<Component, f64>")]
pub struct RiskWeights(BTreeMap<Component, f64>);

impl Default for RiskWeights {
    fn default() -> Self {
        use Component::*;

        Self(BTreeMap::from([
            (SemanticConsistency, 0.20),
            (FactualVerification, 0.25),
            (SourceCredibility, 0.15),
            (LinguisticPatterns, 0.15),
            (TemporalAnalysis, 0.05),
            (RegionalContext, 0.10),
            (AiAssessment, 0.10),
        ]))
    }
}

impl RiskWeights {
    /// Build from an explicit map; components left out weigh 0.
    pub fn new(weights: BTreeMap<Component, f64>) -> Result<Self, ConfigError> {
        for (component, weight) in &weights {
            check(*component, *weight)?;
        }
        Ok(Self(weights))
    }

    /// Replace one weight
    pub fn with(mut self, component: Component, weight: f64) -> Result<Self, ConfigError> {
        check(component, weight)?;
        self.0.insert(component, weight);
        Ok(self)
    }

    pub fn get(&self, component: Component) -> f64 {
        self.0.get(&component).copied().unwrap_or(0.0)
    }

    /// Sum of every configured weight
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Component, f64)> + '_ {
        self.0.iter().map(|(c, w)| (*c, *w))
    }
}

fn check(component: Component, weight: f64) -> Result<(), ConfigError> {
    if !weight.is_finite() || weight < 0.0 {
        return Err(ConfigError::InvalidWeight {
            component: component.to_string(),
            value: weight,
        });
    }
    Ok(())
}

/// Deserialised maps override the defaults key by key
impl TryFrom<BTreeMap<Component, f64>> for RiskWeights {
    type Error = ConfigError;

    fn try_from(overrides: BTreeMap<Component, f64>) -> Result<Self, Self::Error> {
        overrides
            .into_iter()
            .try_fold(Self::default(), |weights, (c, w)| weights.with(c, w))
    }
}

impl From<RiskWeights> for BTreeMap<Component, f64> {
    fn from(weights: RiskWeights) -> Self {
        weights.0
    }
}
