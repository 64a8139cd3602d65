use serde::{Deserialize, Serialize};

use super::defaults;

/// Symptom matcher scoring configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Minimum confidence for a match to be reported.
    pub threshold: f64,
    /// Score awarded when any authored phrase appears in the text.
    pub phrase_bonus: f64,
    /// Score per distinct whole-word keyword hit.
    pub keyword_weight: f64,
    /// Ceiling on the keyword contribution.
    pub keyword_cap: f64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            threshold: defaults::DEFAULT_MATCH_THRESHOLD,
            phrase_bonus: defaults::DEFAULT_PHRASE_BONUS,
            keyword_weight: defaults::DEFAULT_KEYWORD_WEIGHT,
            keyword_cap: defaults::DEFAULT_KEYWORD_CAP,
        }
    }
}
