use serde::{Deserialize, Serialize};

use super::defaults;

/// Forward/backward strength pair applied to one class of compiled edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeStrengths {
    /// How strongly the failure produces the symptom.
    pub forward: f64,
    /// How strongly the symptom implicates the failure.
    pub backward: f64,
}

/// Causal graph compilation and scoring configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Multiplier turning relative frequency into a prior.
    pub prior_scale: f64,
    /// Strengths for expected-DTC edges.
    pub dtc_edge: EdgeStrengths,
    /// Strengths for PID-effect edges.
    pub pid_edge: EdgeStrengths,
    /// Backward strength for authored observation edges. Forward comes from severity.
    pub observation_backward: f64,
    /// Backward strength credited when a supplied DTC is in a failure's expected set.
    pub dtc_evidence_strength: f64,
    /// Maximum characters kept when deriving an observation key.
    pub observation_key_len: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            prior_scale: defaults::DEFAULT_PRIOR_SCALE,
            dtc_edge: EdgeStrengths {
                forward: defaults::DEFAULT_DTC_FORWARD,
                backward: defaults::DEFAULT_DTC_BACKWARD,
            },
            pid_edge: EdgeStrengths {
                forward: defaults::DEFAULT_PID_FORWARD,
                backward: defaults::DEFAULT_PID_BACKWARD,
            },
            observation_backward: defaults::DEFAULT_OBSERVATION_BACKWARD,
            dtc_evidence_strength: defaults::DEFAULT_DTC_EVIDENCE_STRENGTH,
            observation_key_len: defaults::DEFAULT_OBSERVATION_KEY_LEN,
        }
    }
}
