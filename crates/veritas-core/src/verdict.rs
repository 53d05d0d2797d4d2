//! Source verdicts and status normalisation

use serde::{Deserialize, Serialize};

/// Normalised outcome of checking a claim against one source
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum VerdictStatus {
    True,
    False,
    PartiallyTrue,
    Mixture,
    Unknown,
    /// The source could not be consulted (timeout, failure, rate limit)
    Error,
}

impl VerdictStatus {
    /// Tie-break order for consensus, strongest claim on risk first.
    ///
    /// On disagreement the more conservative label wins: a tie between
    /// `True` and `False` resolves to `False`.
    pub const CONSENSUS_PRIORITY: [VerdictStatus; 5] = [
        Self::False,
        Self::True,
        Self::PartiallyTrue,
        Self::Mixture,
        Self::Unknown,
    ];

    /// Map a source-specific rating label onto the shared vocabulary.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace;
    /// spaces and hyphens are treated as underscores ("half true",
    /// "half-true" and "HALF_TRUE" are the same rating). Anything
    /// unrecognised is `Unknown`; this never yields `Error`.
    pub fn normalize(rating: &str) -> Self {
        let rating = rating.trim().to_lowercase().replace([' ', '-'], "_");

        match rating.as_str() {
            "true" | "correct" | "accurate" | "verified" => Self::True,
            "false" | "incorrect" | "inaccurate" | "debunked" | "hoax" | "pants_on_fire" => {
                Self::False
            }
            "partially_true" | "half_true" | "mostly_true" | "partly_true" => Self::PartiallyTrue,
            "mixture" | "mixed" | "complex" | "needs_context" => Self::Mixture,
            _ => Self::Unknown,
        }
    }

    pub fn is_error(&self) -> bool {
        *self == Self::Error
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::True => "true",
            Self::False => "false",
            Self::PartiallyTrue => "partially_true",
            Self::Mixture => "mixture",
            Self::Unknown => "unknown",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for VerdictStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of checking one claim against one source.
///
/// `confidence` is always within [0, 1]. `rating` keeps the source's own
/// label (e.g. "half_true") next to the normalised `status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceVerdict {
    pub source_id: String,
    pub status: VerdictStatus,
    pub rating: String,
    pub confidence: f64,
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

impl SourceVerdict {
    /// Build a verdict from a source's raw rating.
    pub fn from_rating(
        source_id: impl Into<String>,
        rating: impl Into<String>,
        confidence: f64,
        detail: impl Into<String>,
    ) -> Self {
        let rating = rating.into();
        Self {
            source_id: source_id.into(),
            status: VerdictStatus::normalize(&rating),
            rating,
            confidence: clamp_confidence(confidence),
            detail: detail.into(),
            source_url: None,
        }
    }

    /// Verdict recorded when a source could not be consulted.
    pub fn error(source_id: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            status: VerdictStatus::Error,
            rating: VerdictStatus::Error.as_str().to_string(),
            confidence: 0.0,
            detail: detail.into(),
            source_url: None,
        }
    }

    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.status.is_error()
    }
}

fn clamp_confidence(confidence: f64) -> f64 {
    if confidence.is_nan() {
        0.0
    } else {
        confidence.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_known_ratings() {
        assert_eq!(VerdictStatus::normalize("Verified"), VerdictStatus::True);
        assert_eq!(VerdictStatus::normalize("debunked"), VerdictStatus::False);
        assert_eq!(VerdictStatus::normalize("Pants on Fire"), VerdictStatus::False);
        assert_eq!(
            VerdictStatus::normalize("half-true"),
            VerdictStatus::PartiallyTrue
        );
        assert_eq!(
            VerdictStatus::normalize("needs_context"),
            VerdictStatus::Mixture
        );
    }

    #[test]
    fn normalize_unrecognised_is_unknown() {
        assert_eq!(VerdictStatus::normalize("unproven"), VerdictStatus::Unknown);
        assert_eq!(VerdictStatus::normalize(""), VerdictStatus::Unknown);
        assert_eq!(VerdictStatus::normalize("error"), VerdictStatus::Unknown);
    }

    #[test]
    fn confidence_is_clamped() {
        assert_eq!(SourceVerdict::from_rating("s", "true", 1.7, "").confidence, 1.0);
        assert_eq!(SourceVerdict::from_rating("s", "true", -0.2, "").confidence, 0.0);
        assert_eq!(
            SourceVerdict::from_rating("s", "true", f64::NAN, "").confidence,
            0.0
        );
    }

    #[test]
    fn error_verdict_shape() {
        let v = SourceVerdict::error("snopes", "timed out");
        assert!(v.is_error());
        assert_eq!(v.confidence, 0.0);
        assert_eq!(v.rating, "error");
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&VerdictStatus::PartiallyTrue).unwrap();
        assert_eq!(json, "\"partially_true\"");
    }
}
