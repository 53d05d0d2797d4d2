//! Keyword lists driving the rule-based analysis.
//!
//! Every phrase list the pipeline consults lives here as plain data, built
//! once and handed to the components that need it. Tests and deployments
//! can swap in their own lists without touching the scoring code.

use serde::{Deserialize, Serialize};

/// Family of regional misinformation pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionalCategory {
    /// Chain-letter style "forward to 10 people" messages
    ViralForward,
    /// Home-remedy and cure myths
    HealthMyth,
    /// Fabricated polls and leaked-video framing
    Political,
    /// Get-rich-quick and fake scheme scams
    FinancialScam,
}

impl RegionalCategory {
    /// Risk points added per matching pattern
    pub fn risk_points(&self) -> u32 {
        match self {
            Self::ViralForward => 25,
            Self::HealthMyth => 30,
            Self::Political => 20,
            Self::FinancialScam => 35,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ViralForward => "Viral forward message pattern",
            Self::HealthMyth => "Health misinformation",
            Self::Political => "Political misinformation pattern",
            Self::FinancialScam => "Financial scam pattern",
        }
    }
}

/// A regex matched against lowercased content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalPattern {
    pub category: RegionalCategory,
    pub pattern: String,
}

impl RegionalPattern {
    pub fn new(category: RegionalCategory, pattern: &str) -> Self {
        Self {
            category,
            pattern: pattern.to_string(),
        }
    }
}

/// A named logical fallacy and the phrases that signal it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallacyFamily {
    pub name: String,
    pub markers: Vec<String>,
}

/// Publisher domains grouped by reputation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredibleDomains {
    pub high: Vec<String>,
    pub medium: Vec<String>,
    pub questionable: Vec<String>,
}

impl Default for CredibleDomains {
    fn default() -> Self {
        Self {
            high: strings(&[
                "reuters.com",
                "apnews.com",
                "bbc.com",
                "npr.org",
                "pbs.org",
                "theguardian.com",
                "nytimes.com",
                "washingtonpost.com",
                "wsj.com",
            ]),
            medium: strings(&[
                "cnn.com",
                "foxnews.com",
                "msnbc.com",
                "abc.com",
                "cbs.com",
                "nbc.com",
                "time.com",
                "newsweek.com",
                "usatoday.com",
            ]),
            questionable: strings(&[
                "infowars.com",
                "breitbart.com",
                "dailymail.co.uk",
                "rt.com",
                "naturalnews.com",
                "beforeitsnews.com",
            ]),
        }
    }
}

/// All phrase lists used by extraction, aggregation and the heuristic layers.
///
/// Matching is case-insensitive everywhere; lists are lowercased when the
/// consuming component is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    /// Words that promote a whole sentence to a claim
    pub factual_markers: Vec<String>,
    /// Phrases reported verbatim as suspicious indicators
    pub suspicious_indicators: Vec<String>,
    pub conspiracy: Vec<String>,
    pub emotional_manipulation: Vec<String>,
    pub false_authority: Vec<String>,
    pub urgency_tactics: Vec<String>,
    /// Assertive verbs ("proves", "reveals") counted against evidence words
    pub claim_words: Vec<String>,
    pub evidence_words: Vec<String>,
    pub fallacies: Vec<FallacyFamily>,
    pub urgency_indicators: Vec<String>,
    pub time_references: Vec<String>,
    pub credible_domains: CredibleDomains,
    pub regional_patterns: Vec<RegionalPattern>,
}

impl Default for Lexicon {
    fn default() -> Self {
        use RegionalCategory::*;

        Self {
            factual_markers: strings(&[
                "percent", "%", "million", "billion", "study", "research", "data",
            ]),
            suspicious_indicators: strings(&[
                "secret study",
                "hidden research",
                "they don't want you to know",
                "suppressed evidence",
                "cover-up",
                "conspiracy",
                "fake news",
                "hoax",
                "propaganda",
                "mainstream media lies",
            ]),
            conspiracy: strings(&[
                "they don't want you to know",
                "hidden truth",
                "mainstream media won't tell you",
                "deep state",
                "secret agenda",
                "cover-up",
                "wake up",
                "sheeple",
            ]),
            emotional_manipulation: strings(&[
                "shocking",
                "unbelievable",
                "you won't believe",
                "must see",
                "urgent",
                "breaking",
                "exclusive",
                "leaked",
                "exposed",
                "revealed",
            ]),
            false_authority: strings(&[
                "doctors hate this",
                "scientists don't want you to know",
                "secret study shows",
                "unnamed sources",
                "inside sources",
                "whistleblower reveals",
            ]),
            urgency_tactics: strings(&[
                "share before deleted",
                "going viral",
                "must share now",
                "time sensitive",
                "act now",
                "limited time",
                "before it's too late",
            ]),
            claim_words: strings(&["prove", "shows", "demonstrates", "confirms", "reveals"]),
            evidence_words: strings(&["study", "research", "data", "source", "citation"]),
            fallacies: vec![
                fallacy("false_dichotomy", &["either", "only two", "must choose"]),
                fallacy("ad_hominem", &["stupid", "idiotic", "corrupt"]),
                fallacy("appeal_to_fear", &["dangerous", "terrifying", "catastrophic"]),
                fallacy("bandwagon", &["everyone knows", "everybody says", "most people"]),
            ],
            urgency_indicators: strings(&[
                "breaking",
                "urgent",
                "immediate",
                "now",
                "today",
                "this hour",
                "just in",
                "developing",
                "alert",
                "warning",
            ]),
            time_references: strings(&[
                "yesterday",
                "last week",
                "recently",
                "just happened",
                "moments ago",
                "hours ago",
                "days ago",
            ]),
            credible_domains: CredibleDomains::default(),
            regional_patterns: vec![
                RegionalPattern::new(ViralForward, r"good morning.*forward.*10 people"),
                RegionalPattern::new(ViralForward, r"share.*this.*message.*luck"),
                RegionalPattern::new(ViralForward, r"govt.*scheme.*apply.*immediately"),
                RegionalPattern::new(ViralForward, r"bank.*account.*blocked.*click"),
                RegionalPattern::new(HealthMyth, r"cow urine"),
                RegionalPattern::new(HealthMyth, r"gaumutra"),
                RegionalPattern::new(HealthMyth, r"home remedy cures covid"),
                RegionalPattern::new(HealthMyth, r"ayurveda prevents corona"),
                RegionalPattern::new(HealthMyth, r"turmeric immunity"),
                RegionalPattern::new(HealthMyth, r"hot water kills virus"),
                RegionalPattern::new(HealthMyth, r"garlic prevents covid"),
                RegionalPattern::new(Political, r"survey shows.*%.*votes"),
                RegionalPattern::new(Political, r"exit poll predicts"),
                RegionalPattern::new(Political, r"leaked video shows"),
                RegionalPattern::new(Political, r"whatsapp university"),
                RegionalPattern::new(FinancialScam, r"earn.*lakhs.*from home"),
                RegionalPattern::new(FinancialScam, r"government giving.*money"),
                RegionalPattern::new(FinancialScam, r"lottery winner.*claim prize"),
                RegionalPattern::new(FinancialScam, r"investment returns.*%.*guaranteed"),
            ],
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn fallacy(name: &str, markers: &[&str]) -> FallacyFamily {
    FallacyFamily {
        name: name.to_string(),
        markers: strings(markers),
    }
}

/// Phrases from `list` that occur in `content_lower`, in list order.
pub(crate) fn matches_in<'a>(list: &'a [String], content_lower: &str) -> Vec<&'a str> {
    list.iter()
        .map(|s| s.as_str())
        .filter(|phrase| !phrase.is_empty() && content_lower.contains(&phrase.to_lowercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let lexicon: Lexicon =
            serde_json::from_str(r#"{"suspicious_indicators": ["chemtrails"]}"#).unwrap();
        assert_eq!(lexicon.suspicious_indicators, vec!["chemtrails"]);
        assert_eq!(lexicon.conspiracy, Lexicon::default().conspiracy);
    }

    #[test]
    fn matches_preserve_list_order() {
        let list = strings(&["hoax", "cover-up", "absent"]);
        let found = matches_in(&list, "a cover-up wrapped in a hoax");
        assert_eq!(found, vec!["hoax", "cover-up"]);
    }

    #[test]
    fn regional_points() {
        assert_eq!(RegionalCategory::FinancialScam.risk_points(), 35);
        assert_eq!(RegionalCategory::Political.risk_points(), 20);
    }
}
