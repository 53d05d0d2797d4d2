//! Linguistic pattern analysis
//!
//! Scans for manipulative phrasing by category and checks two crude style
//! signals: sentence length and exclamation density.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::lexicon::{matches_in, Lexicon};

const PHRASE_PENALTY: i32 = 10;
const CATEGORY_PHRASE_PENALTY: i32 = 15;
const SENTENCE_LENGTH_PENALTY: i32 = 15;
const EXCLAMATION_PENALTY: i32 = 20;
const MIN_AVG_WORDS: f64 = 5.0;
const MAX_AVG_WORDS: f64 = 40.0;
const MAX_EXCLAMATIONS_PER_WORD: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinguisticAnalysis {
    /// 0–100 credibility
    pub linguistic_score: u32,
    /// Per-category `max(0, 100 - 15n)`
    pub pattern_scores: BTreeMap<String, u32>,
    /// Every matched phrase, category by category
    pub detected_patterns: Vec<String>,
    pub avg_sentence_words: Option<f64>,
    pub exclamation_ratio: f64,
}

#[derive(Debug, Clone)]
pub struct LinguisticAnalyzer {
    categories: Vec<(&'static str, Vec<String>)>,
}

impl LinguisticAnalyzer {
    pub fn new(lexicon: &Lexicon) -> Self {
        Self {
            categories: vec![
                ("conspiracy", lexicon.conspiracy.clone()),
                ("emotional_manipulation", lexicon.emotional_manipulation.clone()),
                ("false_authority", lexicon.false_authority.clone()),
                ("urgency_tactics", lexicon.urgency_tactics.clone()),
            ],
        }
    }

    /// `content` is the original text; sentence and word counts use it as is.
    pub fn analyze(&self, content: &str, content_lower: &str) -> LinguisticAnalysis {
        let mut score: i32 = 100;
        let mut pattern_scores = BTreeMap::new();
        let mut detected_patterns = Vec::new();

        for (category, phrases) in &self.categories {
            let found = matches_in(phrases, content_lower);
            let n = found.len() as i32;
            pattern_scores.insert(
                category.to_string(),
                (100 - n * CATEGORY_PHRASE_PENALTY).max(0) as u32,
            );
            score -= n * PHRASE_PENALTY;
            detected_patterns.extend(found.into_iter().map(str::to_string));
        }

        let avg_sentence_words = average_sentence_words(content);
        if let Some(avg) = avg_sentence_words {
            if !(MIN_AVG_WORDS..=MAX_AVG_WORDS).contains(&avg) {
                score -= SENTENCE_LENGTH_PENALTY;
            }
        }

        let words = content.split_whitespace().count().max(1);
        let exclamation_ratio = content.matches('!').count() as f64 / words as f64;
        if exclamation_ratio > MAX_EXCLAMATIONS_PER_WORD {
            score -= EXCLAMATION_PENALTY;
        }

        LinguisticAnalysis {
            linguistic_score: score.clamp(0, 100) as u32,
            pattern_scores,
            detected_patterns,
            avg_sentence_words,
            exclamation_ratio,
        }
    }
}

/// Mean words per non-empty `.`-separated sentence
fn average_sentence_words(content: &str) -> Option<f64> {
    let counts: Vec<usize> = content
        .split('.')
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.split_whitespace().count())
        .collect();

    if counts.is_empty() {
        return None;
    }
    Some(counts.iter().sum::<usize>() as f64 / counts.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn analyze(text: &str) -> LinguisticAnalysis {
        LinguisticAnalyzer::new(&Lexicon::default()).analyze(text, &text.to_lowercase())
    }

    #[test]
    fn plain_prose_scores_full() {
        let result = analyze("The city council approved the new budget after a long debate.");
        assert_eq!(result.linguistic_score, 100);
        assert!(result.detected_patterns.is_empty());
        assert_eq!(result.pattern_scores["conspiracy"], 100);
    }

    #[test]
    fn phrases_penalised_per_match() {
        let text = "Shocking leaked files about the deep state that they don't want you to know about.";
        let result = analyze(text);
        assert_eq!(
            result.detected_patterns,
            vec!["they don't want you to know", "deep state", "shocking", "leaked"]
        );
        assert_eq!(result.pattern_scores["conspiracy"], 70);
        assert_eq!(result.pattern_scores["emotional_manipulation"], 70);
        assert_eq!(result.linguistic_score, 60);
    }

    #[test]
    fn short_sentences_and_exclamations() {
        // Sentences split on "." only: one sentence of 6 words, 3 marks
        let result = analyze("Wake now! Read this! Act fast!");
        assert_eq!(result.avg_sentence_words, Some(6.0));
        assert_eq!(result.linguistic_score, 80);

        let result = analyze("Read it. Now go. Be quick.");
        assert_eq!(result.avg_sentence_words, Some(2.0));
        assert_eq!(result.linguistic_score, 85);
    }

    #[test]
    fn empty_text_has_no_sentence_penalty() {
        let result = analyze("");
        assert_eq!(result.avg_sentence_words, None);
        assert_eq!(result.linguistic_score, 100);
    }
}
