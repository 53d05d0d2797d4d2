//! Publisher credibility from the content URL
//!
//! Purely lexical: the host is matched against the injected domain tiers
//! and a crude age estimate. Nothing is fetched.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::lexicon::{CredibleDomains, Lexicon};

const NEW_DOMAIN_PENALTY: i32 = 20;
const NO_HTTPS_PENALTY: i32 = 10;

/// Reputation tier of a publisher domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainReputation {
    High,
    Medium,
    Questionable,
    Unknown,
}

impl DomainReputation {
    pub fn base_score(&self) -> i32 {
        match self {
            Self::High => 90,
            Self::Medium => 70,
            Self::Questionable => 20,
            Self::Unknown => 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceAnalysis {
    /// 0–100 credibility
    pub credibility_score: u32,
    pub domain_reputation: DomainReputation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_age_estimate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_https: Option<bool>,
}

impl SourceAnalysis {
    /// Neutral result when no URL accompanies the content
    pub fn no_url() -> Self {
        Self {
            credibility_score: 50,
            domain_reputation: DomainReputation::Unknown,
            domain: None,
            domain_age_estimate: None,
            has_https: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SourceAnalyzer {
    domains: CredibleDomains,
}

impl SourceAnalyzer {
    pub fn new(lexicon: &Lexicon) -> Self {
        Self {
            domains: lexicon.credible_domains.clone(),
        }
    }

    pub fn analyze(&self, url: Option<&str>) -> SourceAnalysis {
        let Some(raw) = url.map(str::trim).filter(|u| !u.is_empty()) else {
            return SourceAnalysis::no_url();
        };

        // Bare domains ("example.com/page") parse once a scheme is supplied
        let parsed = Url::parse(raw).or_else(|_| Url::parse(&format!("http://{raw}")));
        let (host, has_https) = match &parsed {
            Ok(u) => (u.host_str().map(str::to_lowercase), u.scheme() == "https"),
            Err(_) => (None, false),
        };

        let reputation = host
            .as_deref()
            .map(|h| self.reputation(h))
            .unwrap_or(DomainReputation::Unknown);
        let age = estimate_domain_age(host.as_deref().unwrap_or(""));

        let mut score = reputation.base_score();
        if age < 1.0 {
            score -= NEW_DOMAIN_PENALTY;
        }
        if !has_https {
            score -= NO_HTTPS_PENALTY;
        }

        SourceAnalysis {
            credibility_score: score.clamp(0, 100) as u32,
            domain_reputation: reputation,
            domain: host,
            domain_age_estimate: Some(age),
            has_https: Some(has_https),
        }
    }

    fn reputation(&self, host: &str) -> DomainReputation {
        let tiers = [
            (&self.domains.high, DomainReputation::High),
            (&self.domains.medium, DomainReputation::Medium),
            (&self.domains.questionable, DomainReputation::Questionable),
        ];
        tiers
            .into_iter()
            .find(|(list, _)| list.iter().any(|d| host_matches(host, d)))
            .map(|(_, tier)| tier)
            .unwrap_or(DomainReputation::Unknown)
    }
}

/// Exact domain or any subdomain of it
fn host_matches(host: &str, domain: &str) -> bool {
    let domain = domain.to_lowercase();
    host == domain || host.ends_with(&format!(".{domain}"))
}

/// Years, from naming cues alone (there is no registry lookup)
fn estimate_domain_age(host: &str) -> f64 {
    if ["news", "times", "post", "guardian"]
        .iter()
        .any(|cue| host.contains(cue))
    {
        10.0
    } else if host.len() > 15 {
        2.0
    } else {
        5.0
    }
}
