//! Extracted claims

use serde::{Deserialize, Serialize};

use crate::hash::ClaimHash;

/// Which extraction rule produced a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionPattern {
    /// Text following an attribution phrase ("according to", "experts say", ...)
    FactualIndicator,
    /// "it is proven that ..." style assertions
    ProvenAssertion,
    /// "the fact is ..." style assertions
    FactAssertion,
    /// Numeric share of a population ("15% of adults ...")
    Statistic,
    /// "evidence shows ..." style references
    EvidenceReference,
    /// Whole sentence carrying a strong factual marker
    FactualSentence,
}

impl ExtractionPattern {
    /// Whether the claim is a whole sentence rather than a pattern capture
    pub fn is_sentence(&self) -> bool {
        matches!(self, Self::FactualSentence)
    }
}

impl std::fmt::Display for ExtractionPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FactualIndicator => write!(f, "factual_indicator"),
            Self::ProvenAssertion => write!(f, "proven_assertion"),
            Self::FactAssertion => write!(f, "fact_assertion"),
            Self::Statistic => write!(f, "statistic"),
            Self::EvidenceReference => write!(f, "evidence_reference"),
            Self::FactualSentence => write!(f, "factual_sentence"),
        }
    }
}

/// A short span of text asserting something checkable.
///
/// Immutable once extracted; two claims are the same claim when their text
/// matches exactly (case-sensitive).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Claim {
    text: String,
    pattern: ExtractionPattern,
}

impl Claim {
    pub fn new(text: impl Into<String>, pattern: ExtractionPattern) -> Self {
        Self {
            text: text.into(),
            pattern,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn pattern(&self) -> ExtractionPattern {
        self.pattern
    }

    /// Cache key for this claim's text
    pub fn hash(&self) -> ClaimHash {
        ClaimHash::of(&self.text)
    }
}

impl std::fmt::Display for Claim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
