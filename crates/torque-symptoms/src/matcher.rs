//! Rule-based free-text symptom matcher.
//!
//! Scoring per candidate symptom:
//! - any negation substring present → 0, no further scoring
//! - any authored phrase present → `phrase_bonus` (counted once)
//! - distinct whole-word keyword hits → `min(keyword_cap, keyword_weight × hits)`
//! - total capped at 1.0

use regex::Regex;
use serde::{Deserialize, Serialize};
use torque_core::config::MatcherConfig;

use crate::patterns::{default_patterns, SymptomPattern};

/// One canonical symptom recognized in a piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomMatch {
    pub key: String,
    pub confidence: f64,
    /// The first authored phrase found, if any.
    pub matched_phrase: Option<String>,
    /// Distinct keywords found as whole words.
    pub matched_keywords: Vec<String>,
}

#[derive(Debug)]
struct CompiledPattern {
    key: String,
    keywords: Vec<(String, Regex)>,
    phrases: Vec<String>,
    negations: Vec<String>,
}

impl CompiledPattern {
    fn compile(pattern: &SymptomPattern) -> Self {
        let mut keywords: Vec<(String, Regex)> = Vec::with_capacity(pattern.keywords.len());
        for raw in &pattern.keywords {
            let keyword = raw.trim().to_lowercase();
            if keyword.is_empty() || keywords.iter().any(|(k, _)| *k == keyword) {
                continue;
            }
            match Regex::new(&format!(r"\b{}\b", regex::escape(&keyword))) {
                Ok(re) => keywords.push((keyword, re)),
                Err(e) => {
                    tracing::warn!(key = %pattern.key, keyword = %keyword, error = %e, "dropping keyword pattern");
                }
            }
        }
        Self {
            key: pattern.key.clone(),
            keywords,
            phrases: lowered(&pattern.phrases),
            negations: lowered(&pattern.negations),
        }
    }
}

fn lowered(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Maps free text onto canonical symptom keys.
#[derive(Debug)]
pub struct SymptomMatcher {
    patterns: Vec<CompiledPattern>,
    config: MatcherConfig,
}

impl SymptomMatcher {
    /// Matcher over the built-in pattern set with default scoring.
    pub fn new() -> Self {
        Self::with_patterns(&default_patterns(), MatcherConfig::default())
    }

    pub fn with_config(config: MatcherConfig) -> Self {
        Self::with_patterns(&default_patterns(), config)
    }

    /// Compile a custom pattern set. Registration order is the tie order.
    pub fn with_patterns(patterns: &[SymptomPattern], config: MatcherConfig) -> Self {
        Self {
            patterns: patterns.iter().map(CompiledPattern::compile).collect(),
            config,
        }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Canonical keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.key.as_str())
    }

    /// Case-insensitive lookup of an already-canonical key.
    pub fn known_key(&self, input: &str) -> Option<&str> {
        let input = input.trim();
        self.keys().find(|k| k.eq_ignore_ascii_case(input))
    }

    pub fn is_known_key(&self, input: &str) -> bool {
        self.known_key(input).is_some()
    }

    /// All symptoms scoring at or above `threshold`, best first.
    pub fn match_text(&self, text: &str, threshold: f64) -> Vec<SymptomMatch> {
        let lowered = text.to_lowercase();
        let mut matches: Vec<SymptomMatch> = self
            .patterns
            .iter()
            .filter_map(|p| self.score(p, &lowered))
            .filter(|m| m.confidence >= threshold)
            .collect();
        // Stable: equal confidences keep registration order.
        matches.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        matches
    }

    /// [`match_text`](Self::match_text) at the configured threshold.
    pub fn match_default(&self, text: &str) -> Vec<SymptomMatch> {
        self.match_text(text, self.config.threshold)
    }

    /// Highest-confidence match at the configured threshold.
    pub fn best_match(&self, text: &str) -> Option<SymptomMatch> {
        self.match_default(text).into_iter().next()
    }

    /// Union of canonical keys matched across several texts, first-seen order.
    pub fn match_multiple<S: AsRef<str>>(&self, texts: &[S], threshold: f64) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        for text in texts {
            for m in self.match_text(text.as_ref(), threshold) {
                if !keys.contains(&m.key) {
                    keys.push(m.key);
                }
            }
        }
        keys
    }

    /// Normalize one input to a canonical key.
    ///
    /// Known keys pass through; otherwise the best match wins; otherwise the
    /// lower-cased input is returned unchanged. Blank input yields `None`.
    pub fn normalize_symptom(&self, input: &str) -> Option<String> {
        self.normalize_with_confidence(input).map(|(key, _)| key)
    }

    /// [`normalize_symptom`](Self::normalize_symptom) plus the confidence of
    /// the match that produced the key. Confidence is `None` for known keys
    /// and pass-through input.
    pub fn normalize_with_confidence(&self, input: &str) -> Option<(String, Option<f64>)> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Some(key) = self.known_key(trimmed) {
            return Some((key.to_string(), None));
        }
        match self.best_match(trimmed) {
            Some(m) => Some((m.key, Some(m.confidence))),
            None => {
                tracing::debug!(input = %trimmed, "no symptom cleared threshold; passing through");
                Some((trimmed.to_lowercase(), None))
            }
        }
    }

    pub fn normalize_symptoms<S: AsRef<str>>(&self, inputs: &[S]) -> Vec<String> {
        inputs
            .iter()
            .filter_map(|i| self.normalize_symptom(i.as_ref()))
            .collect()
    }

    fn score(&self, pattern: &CompiledPattern, lowered: &str) -> Option<SymptomMatch> {
        if pattern.negations.iter().any(|n| lowered.contains(n.as_str())) {
            return None;
        }

        let matched_phrase = pattern
            .phrases
            .iter()
            .find(|p| lowered.contains(p.as_str()))
            .cloned();

        let matched_keywords: Vec<String> = pattern
            .keywords
            .iter()
            .filter(|(_, re)| re.is_match(lowered))
            .map(|(k, _)| k.clone())
            .collect();

        let mut confidence = 0.0;
        if matched_phrase.is_some() {
            confidence += self.config.phrase_bonus;
        }
        confidence += (self.config.keyword_weight * matched_keywords.len() as f64)
            .min(self.config.keyword_cap);
        let confidence = confidence.min(1.0);

        if confidence <= 0.0 {
            return None;
        }

        Some(SymptomMatch {
            key: pattern.key.clone(),
            confidence,
            matched_phrase,
            matched_keywords,
        })
    }
}

impl Default for SymptomMatcher {
    fn default() -> Self {
        Self::new()
    }
}
