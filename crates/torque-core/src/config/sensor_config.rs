use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Threshold band for one live sensor.
///
/// A reading at or above `high` emits `{token}_high`, at or below `low`
/// emits `{token}_low`. Either bound may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorBand {
    /// Evidence token prefix.
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    /// Canonical unit the thresholds are expressed in.
    pub unit: String,
    /// Alternate sensor names resolving to this band.
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Per-sensor threshold bands keyed by canonical sensor name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    pub bands: BTreeMap<String, SensorBand>,
}

impl SensorConfig {
    /// Re-insert any built-in band the user config did not mention.
    pub fn fill_missing_defaults(&mut self) {
        for (name, band) in default_bands() {
            self.bands.entry(name).or_insert(band);
        }
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            bands: default_bands(),
        }
    }
}

fn default_bands() -> BTreeMap<String, SensorBand> {
    let mut bands = BTreeMap::new();
    bands.insert(
        "coolant_temp".to_string(),
        SensorBand {
            token: "coolant_temp".to_string(),
            high: Some(defaults::DEFAULT_COOLANT_HIGH_C),
            low: Some(defaults::DEFAULT_COOLANT_LOW_C),
            unit: "C".to_string(),
            aliases: vec![
                "ect".to_string(),
                "coolant_temperature".to_string(),
                "engine_coolant_temp".to_string(),
            ],
        },
    );
    bands.insert(
        "oil_pressure".to_string(),
        SensorBand {
            token: "oil_pressure".to_string(),
            high: Some(defaults::DEFAULT_OIL_PRESSURE_HIGH_PSI),
            low: Some(defaults::DEFAULT_OIL_PRESSURE_LOW_PSI),
            unit: "psi".to_string(),
            aliases: vec!["engine_oil_pressure".to_string(), "eop".to_string()],
        },
    );
    bands.insert(
        "battery_voltage".to_string(),
        SensorBand {
            token: "voltage".to_string(),
            high: Some(defaults::DEFAULT_VOLTAGE_HIGH_V),
            low: Some(defaults::DEFAULT_VOLTAGE_LOW_V),
            unit: "V".to_string(),
            aliases: vec![
                "control_module_voltage".to_string(),
                "system_voltage".to_string(),
                "voltage".to_string(),
            ],
        },
    );
    bands
}
