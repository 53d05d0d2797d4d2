//! Claim extraction
//!
//! Pulls candidate factual claims out of free text with two kinds of rules,
//! applied in order:
//!
//! 1. Pattern rules capture the text that follows a factual-indicator phrase
//!    ("according to", "experts say", ...) or a numeric share ("15% of ...")
//!    up to the next `.`, `,` or `;`. Captures must be 10–200 chars.
//! 2. Sentence rules keep whole `.`-separated sentences that contain a strong
//!    factual marker ("percent", "million", "study", ...). Sentences must be
//!    15–250 chars.
//!
//! Duplicates (exact text match) are dropped keeping first-seen order, and
//! the result is capped at [`MAX_CLAIMS`].

use std::collections::HashSet;
use std::ops::RangeInclusive;
use std::sync::LazyLock;

use regex::Regex;

use crate::claim::{Claim, ExtractionPattern};
use crate::lexicon::Lexicon;

/// Maximum claims returned by one extraction
pub const MAX_CLAIMS: usize = 10;

const CAPTURE_LEN: RangeInclusive<usize> = 10..=200;
const SENTENCE_LEN: RangeInclusive<usize> = 15..=250;

struct PatternRule {
    pattern: ExtractionPattern,
    regex: Regex,
}

fn rule(pattern: ExtractionPattern, source: &str) -> PatternRule {
    PatternRule {
        pattern,
        regex: Regex::new(source).expect("extraction rule is a valid regex"),
    }
}

static PATTERN_RULES: LazyLock<Vec<PatternRule>> = LazyLock::new(|| {
    use ExtractionPattern::*;

    vec![
        rule(
            FactualIndicator,
            r"(?i)(?:according to|study shows|research proves|data indicates|scientists found|experts say|reports indicate|statistics show)\s+(?P<claim>.+?)[.,;]",
        ),
        rule(
            ProvenAssertion,
            r"(?i)(?:it is|this is|that is)\s+(?:proven|confirmed|verified|established)\s+(?:that\s+)?(?P<claim>.+?)[.,;]",
        ),
        rule(
            FactAssertion,
            r"(?i)(?:the fact is|the truth is|it's a fact that)\s+(?P<claim>.+?)[.,;]",
        ),
        rule(Statistic, r"(?i)(?P<claim>\d+%?\s+of\s+.+?)[.,;]"),
        rule(
            EvidenceReference,
            r"(?i)(?:evidence shows|research indicates|studies demonstrate)\s+(?P<claim>.+?)[.,;]",
        ),
    ]
});

/// Rule-based claim extractor.
///
/// A pure function of its input: the same text always yields the same
/// ordered claims. Empty or whitespace-only text yields no claims.
#[derive(Debug, Clone)]
pub struct ClaimExtractor {
    sentence_markers: Vec<String>,
    max_claims: usize,
}

impl Default for ClaimExtractor {
    fn default() -> Self {
        Self::new(&Lexicon::default())
    }
}

impl ClaimExtractor {
    /// Build an extractor using the lexicon's factual markers
    pub fn new(lexicon: &Lexicon) -> Self {
        Self {
            sentence_markers: lexicon
                .factual_markers
                .iter()
                .map(|m| m.to_lowercase())
                .filter(|m| !m.is_empty())
                .collect(),
            max_claims: MAX_CLAIMS,
        }
    }

    pub fn with_max_claims(mut self, max_claims: usize) -> Self {
        self.max_claims = max_claims;
        self
    }

    /// Extract claims in rule order, deduplicated and capped.
    pub fn extract(&self, content: &str) -> Vec<Claim> {
        let content = content.split_whitespace().collect::<Vec<_>>().join(" ");
        if content.is_empty() {
            return Vec::new();
        }

        let mut seen = HashSet::new();
        let mut claims = Vec::new();

        for rule in PATTERN_RULES.iter() {
            for caps in rule.regex.captures_iter(&content) {
                let Some(capture) = caps.name("claim") else {
                    continue;
                };
                let text = capture.as_str().trim();
                if CAPTURE_LEN.contains(&text.chars().count()) {
                    push_unique(&mut claims, &mut seen, text, rule.pattern);
                }
            }
        }

        for sentence in content.split('.') {
            let sentence = sentence.trim();
            if !SENTENCE_LEN.contains(&sentence.chars().count()) {
                continue;
            }
            let lower = sentence.to_lowercase();
            if self.sentence_markers.iter().any(|m| lower.contains(m.as_str())) {
                push_unique(
                    &mut claims,
                    &mut seen,
                    sentence,
                    ExtractionPattern::FactualSentence,
                );
            }
        }

        claims.truncate(self.max_claims);
        claims
    }
}

fn push_unique(
    claims: &mut Vec<Claim>,
    seen: &mut HashSet<String>,
    text: &str,
    pattern: ExtractionPattern,
) {
    if seen.insert(text.to_string()) {
        claims.push(Claim::new(text, pattern));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(claims: &[Claim]) -> Vec<&str> {
        claims.iter().map(|c| c.text()).collect()
    }

    #[test]
    fn empty_and_whitespace_yield_nothing() {
        let extractor = ClaimExtractor::default();
        assert!(extractor.extract("").is_empty());
        assert!(extractor.extract("   \n\t  ").is_empty());
    }

    #[test]
    fn indicator_capture_stops_at_punctuation() {
        let extractor = ClaimExtractor::default();
        let claims = extractor.extract("According to him, fuel prices rose sharply.");
        // "him" is too short as a capture; the sentence has no marker
        assert!(claims.is_empty());

        let claims = extractor.extract("Experts say coastal flooding will double by 2050; others disagree.");
        assert_eq!(texts(&claims), vec!["coastal flooding will double by 2050"]);
        assert_eq!(claims[0].pattern(), ExtractionPattern::FactualIndicator);
    }

    #[test]
    fn statistic_and_sentence_rules() {
        let extractor = ClaimExtractor::default();
        let claims = extractor.extract("Roughly 40% of voters stayed home. Turnout data was published later.");
        assert_eq!(
            texts(&claims),
            vec![
                "40% of voters stayed home",
                "Roughly 40% of voters stayed home",
                "Turnout data was published later",
            ]
        );
        assert_eq!(claims[0].pattern(), ExtractionPattern::Statistic);
        assert!(claims[2].pattern().is_sentence());
    }

    #[test]
    fn proven_assertion_skips_that() {
        let extractor = ClaimExtractor::default();
        let claims = extractor.extract("It is confirmed that the reservoir is half empty.");
        assert_eq!(texts(&claims), vec!["the reservoir is half empty"]);
        assert_eq!(claims[0].pattern(), ExtractionPattern::ProvenAssertion);
    }

    #[test]
    fn duplicates_removed_first_seen_wins() {
        let extractor = ClaimExtractor::default();
        let text = "Nothing to see. The study found 12 million cases. The study found 12 million cases.";
        let claims = extractor.extract(text);
        assert_eq!(texts(&claims), vec!["The study found 12 million cases"]);
    }

    #[test]
    fn dedup_is_case_sensitive() {
        let extractor = ClaimExtractor::default();
        let text = "The study covered 3 million homes. the study covered 3 million homes.";
        assert_eq!(extractor.extract(text).len(), 2);
    }

    #[test]
    fn capped_at_max_claims() {
        let extractor = ClaimExtractor::default();
        let text: String = (1..=15)
            .map(|i| format!("Survey {} polled {} million adults. ", i, i))
            .collect();
        let claims = extractor.extract(&text);
        assert_eq!(claims.len(), MAX_CLAIMS);
        assert_eq!(claims[0].text(), "Survey 1 polled 1 million adults");
    }

    #[test]
    fn overlong_sentences_dropped() {
        let extractor = ClaimExtractor::default();
        let long = format!("The study {}", "x".repeat(260));
        assert!(extractor.extract(&long).is_empty());
    }

    #[test]
    fn custom_markers() {
        let lexicon = Lexicon {
            factual_markers: vec!["Census".to_string()],
            ..Lexicon::default()
        };
        let extractor = ClaimExtractor::new(&lexicon);
        let claims = extractor.extract("The census counted everyone twice. A study said so.");
        assert_eq!(texts(&claims), vec!["The census counted everyone twice"]);
    }

    #[test]
    fn extraction_is_idempotent() {
        let extractor = ClaimExtractor::default();
        let text = "According to a peer-reviewed study published in The Lancet... 15% increased transmissibility...";
        assert_eq!(extractor.extract(text), extractor.extract(text));
    }
}
