//! Evidence tokens and their provenance.

pub mod dtc;
pub mod sensors;

use serde::{Deserialize, Serialize};

pub use dtc::{dtc_to_evidence, normalize_dtc};
pub use sensors::SensorBands;

/// Where an evidence token came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EvidenceSource {
    /// A trouble code reported by the vehicle.
    Dtc { code: String },
    /// A live reading that fell outside its normal band.
    Sensor { name: String, value: f64, unit: String },
    /// Free text normalized by the symptom matcher. `confidence` is absent
    /// when the text was already a canonical key or passed through unmatched.
    Text {
        original: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        confidence: Option<f64>,
    },
}

/// A canonical, graph-recognizable token plus its origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub token: String,
    pub source: EvidenceSource,
}

impl Evidence {
    pub fn new(token: impl Into<String>, source: EvidenceSource) -> Self {
        Self {
            token: token.into(),
            source,
        }
    }

    pub fn is_dtc(&self) -> bool {
        matches!(self.source, EvidenceSource::Dtc { .. })
    }
}
