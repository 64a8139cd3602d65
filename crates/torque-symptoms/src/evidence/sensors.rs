//! Sensor reading → evidence token via per-sensor threshold bands.

use std::collections::HashMap;

use torque_core::config::{SensorBand, SensorConfig};

/// Resolved threshold bands with alias lookup.
#[derive(Debug, Clone)]
pub struct SensorBands {
    bands: HashMap<String, SensorBand>,
    aliases: HashMap<String, String>,
}

impl SensorBands {
    pub fn from_config(config: &SensorConfig) -> Self {
        let mut bands = HashMap::new();
        let mut aliases = HashMap::new();
        for (name, band) in &config.bands {
            let canonical = normalize_name(name);
            for alias in &band.aliases {
                aliases.insert(normalize_name(alias), canonical.clone());
            }
            bands.insert(canonical, band.clone());
        }
        Self { bands, aliases }
    }

    /// Band for a sensor name or alias.
    pub fn band(&self, name: &str) -> Option<&SensorBand> {
        let name = normalize_name(name);
        self.bands.get(&name).or_else(|| {
            self.aliases
                .get(&name)
                .and_then(|canonical| self.bands.get(canonical))
        })
    }

    /// Evaluate one reading. Returns `{token}_high`, `{token}_low`, or `None`
    /// when the value is in band, the sensor is unknown, the value is not
    /// finite, or the unit cannot be converted.
    pub fn evaluate(&self, name: &str, value: f64, unit: &str) -> Option<String> {
        let Some(band) = self.band(name) else {
            tracing::debug!(sensor = %name, "no threshold band for sensor");
            return None;
        };
        if !value.is_finite() {
            return None;
        }
        let Some(value) = convert(value, unit, &band.unit) else {
            tracing::debug!(sensor = %name, unit = %unit, band_unit = %band.unit, "unit not convertible");
            return None;
        };

        if band.high.is_some_and(|high| value >= high) {
            return Some(format!("{}_high", band.token));
        }
        if band.low.is_some_and(|low| value <= low) {
            return Some(format!("{}_low", band.token));
        }
        tracing::trace!(sensor = %name, value, "reading within band");
        None
    }
}

impl Default for SensorBands {
    fn default() -> Self {
        Self::from_config(&SensorConfig::default())
    }
}

fn normalize_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Celsius,
    Fahrenheit,
    Psi,
    Kpa,
    Bar,
    Volt,
    Millivolt,
}

fn parse_unit(unit: &str) -> Option<Unit> {
    let unit = unit.trim().trim_start_matches('°').to_lowercase();
    match unit.as_str() {
        "c" | "celsius" | "degc" => Some(Unit::Celsius),
        "f" | "fahrenheit" | "degf" => Some(Unit::Fahrenheit),
        "psi" => Some(Unit::Psi),
        "kpa" => Some(Unit::Kpa),
        "bar" => Some(Unit::Bar),
        "v" | "volt" | "volts" => Some(Unit::Volt),
        "mv" | "millivolts" => Some(Unit::Millivolt),
        _ => None,
    }
}

/// Convert `value` from `from` to `to`. An empty `from` means the reading is
/// already in the band's unit.
fn convert(value: f64, from: &str, to: &str) -> Option<f64> {
    if from.trim().is_empty() || from.trim().eq_ignore_ascii_case(to.trim()) {
        return Some(value);
    }
    let (from, to) = (parse_unit(from)?, parse_unit(to)?);
    use Unit::*;
    let converted = match (from, to) {
        (a, b) if a == b => value,
        (Fahrenheit, Celsius) => (value - 32.0) * 5.0 / 9.0,
        (Celsius, Fahrenheit) => value * 9.0 / 5.0 + 32.0,
        (Kpa, Psi) => value * 0.145_037_738,
        (Bar, Psi) => value * 14.503_773_8,
        (Psi, Kpa) => value / 0.145_037_738,
        (Millivolt, Volt) => value / 1000.0,
        (Volt, Millivolt) => value * 1000.0,
        _ => return None,
    };
    Some(converted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fahrenheit_converts_to_celsius() {
        let c = convert(212.0, "°F", "C").unwrap();
        assert!((c - 100.0).abs() < 1e-9);
    }

    #[test]
    fn incompatible_units_do_not_convert() {
        assert!(convert(12.0, "psi", "C").is_none());
        assert!(convert(12.0, "furlongs", "C").is_none());
    }

    #[test]
    fn names_normalize_spaces_and_case() {
        assert_eq!(normalize_name(" Coolant Temp "), "coolant_temp");
        assert_eq!(normalize_name("oil-pressure"), "oil_pressure");
    }
}
