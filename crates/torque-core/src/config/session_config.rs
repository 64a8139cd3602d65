use serde::{Deserialize, Serialize};

use super::defaults;

/// Diagnostic session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Top-candidate probability at which a session becomes confident.
    pub confident_threshold: f64,
    /// Number of leading candidates considered for test recommendation.
    pub top_n: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            confident_threshold: defaults::DEFAULT_CONFIDENT_THRESHOLD,
            top_n: defaults::DEFAULT_TOP_N,
        }
    }
}
