//! Configuration for the Torque engine.
//! TOML-based; every section falls back to compiled defaults.

pub mod defaults;
pub mod graph_config;
pub mod matcher_config;
pub mod observability_config;
pub mod sensor_config;
pub mod session_config;

pub use graph_config::{EdgeStrengths, GraphConfig};
pub use matcher_config::MatcherConfig;
pub use observability_config::ObservabilityConfig;
pub use sensor_config::{SensorBand, SensorConfig};
pub use session_config::SessionConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{TorqueError, TorqueResult};

/// Top-level configuration aggregating all sub-configs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TorqueConfig {
    pub graph: GraphConfig,
    pub matcher: MatcherConfig,
    pub session: SessionConfig,
    pub sensors: SensorConfig,
    pub observability: ObservabilityConfig,
}

impl TorqueConfig {
    /// Load configuration from a TOML string. Missing keys keep their defaults.
    pub fn from_toml(toml_str: &str) -> TorqueResult<Self> {
        let mut config: Self = toml::from_str(toml_str).map_err(|e| TorqueError::ConfigError {
            reason: e.to_string(),
        })?;
        config.sensors.fill_missing_defaults();
        config.validate()?;
        Ok(config)
    }

    /// Serialize back to TOML.
    pub fn to_toml(&self) -> TorqueResult<String> {
        toml::to_string(self).map_err(|e| TorqueError::ConfigError {
            reason: e.to_string(),
        })
    }

    /// Validate value ranges across all sections.
    pub fn validate(&self) -> TorqueResult<()> {
        let unit_fields = [
            ("graph.dtc_edge.forward", self.graph.dtc_edge.forward),
            ("graph.dtc_edge.backward", self.graph.dtc_edge.backward),
            ("graph.pid_edge.forward", self.graph.pid_edge.forward),
            ("graph.pid_edge.backward", self.graph.pid_edge.backward),
            ("graph.observation_backward", self.graph.observation_backward),
            ("graph.dtc_evidence_strength", self.graph.dtc_evidence_strength),
            ("matcher.threshold", self.matcher.threshold),
            ("matcher.phrase_bonus", self.matcher.phrase_bonus),
            ("matcher.keyword_weight", self.matcher.keyword_weight),
            ("matcher.keyword_cap", self.matcher.keyword_cap),
            ("session.confident_threshold", self.session.confident_threshold),
        ];
        for (field, value) in unit_fields {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(field, "must be between 0.0 and 1.0"));
            }
        }
        if !self.graph.prior_scale.is_finite() || self.graph.prior_scale < 0.0 {
            return Err(invalid("graph.prior_scale", "must be a finite value >= 0"));
        }
        if self.graph.observation_key_len == 0 {
            return Err(invalid("graph.observation_key_len", "must be greater than 0"));
        }
        if self.session.top_n < 2 {
            return Err(invalid("session.top_n", "must be at least 2"));
        }
        for (name, band) in &self.sensors.bands {
            if band.high.into_iter().chain(band.low).any(|t| !t.is_finite()) {
                return Err(invalid(
                    &format!("sensors.bands.{name}"),
                    "thresholds must be finite",
                ));
            }
            if let (Some(low), Some(high)) = (band.low, band.high) {
                if low >= high {
                    return Err(invalid(
                        &format!("sensors.bands.{name}"),
                        "low threshold must be below high threshold",
                    ));
                }
            }
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> TorqueError {
    TorqueError::ConfigError {
        reason: format!("{field}: {message}"),
    }
}
