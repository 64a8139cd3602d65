use torque_core::config::{SensorBand, SensorConfig};
use torque_symptoms::{dtc_to_evidence, Evidence, EvidenceSource, SensorBands};

// ── DTC mapping ───────────────────────────────────────────────────────────

#[test]
fn known_dtcs_map_to_tokens() {
    assert_eq!(dtc_to_evidence("P0217"), Some("coolant_temp_high"));
    assert_eq!(dtc_to_evidence("P0128"), Some("coolant_temp_low"));
    assert_eq!(dtc_to_evidence("P0480"), Some("fan_not_running"));
}

#[test]
fn unknown_dtc_produces_no_evidence() {
    assert_eq!(dtc_to_evidence("P9999"), None);
    assert_eq!(dtc_to_evidence(""), None);
}

// ── Sensor bands ──────────────────────────────────────────────────────────

#[test]
fn coolant_temperature_bands() {
    let bands = SensorBands::default();
    assert_eq!(bands.evaluate("coolant_temp", 115.0, "C").as_deref(), Some("coolant_temp_high"));
    assert_eq!(bands.evaluate("coolant_temp", 65.0, "C").as_deref(), Some("coolant_temp_low"));
    assert_eq!(bands.evaluate("coolant_temp", 92.0, "C"), None);
}

#[test]
fn oil_pressure_and_voltage_bands() {
    let bands = SensorBands::default();
    assert_eq!(bands.evaluate("oil_pressure", 15.0, "psi").as_deref(), Some("oil_pressure_low"));
    assert_eq!(bands.evaluate("battery_voltage", 11.5, "V").as_deref(), Some("voltage_low"));
    assert_eq!(bands.evaluate("battery_voltage", 15.6, "V").as_deref(), Some("voltage_high"));
    assert_eq!(bands.evaluate("battery_voltage", 13.8, "V"), None);
}

#[test]
fn thresholds_are_inclusive() {
    let bands = SensorBands::default();
    assert_eq!(bands.evaluate("coolant_temp", 105.0, "C").as_deref(), Some("coolant_temp_high"));
    assert_eq!(bands.evaluate("coolant_temp", 70.0, "C").as_deref(), Some("coolant_temp_low"));
}

#[test]
fn aliases_and_units_resolve() {
    let bands = SensorBands::default();
    // 239 F ≈ 115 C
    assert_eq!(bands.evaluate("ECT", 239.0, "°F").as_deref(), Some("coolant_temp_high"));
    // 100 kPa ≈ 14.5 psi
    assert_eq!(bands.evaluate("engine oil pressure", 100.0, "kPa").as_deref(), Some("oil_pressure_low"));
    // Unit omitted: value taken in band unit.
    assert_eq!(bands.evaluate("coolant_temp", 115.0, "").as_deref(), Some("coolant_temp_high"));
}

#[test]
fn unknown_sensor_or_bad_value_produces_no_evidence() {
    let bands = SensorBands::default();
    assert_eq!(bands.evaluate("tire_pressure", 10.0, "psi"), None);
    assert_eq!(bands.evaluate("coolant_temp", f64::NAN, "C"), None);
    assert_eq!(bands.evaluate("coolant_temp", 115.0, "psi"), None);
}

#[test]
fn one_sided_band_only_reports_configured_side() {
    let mut config = SensorConfig::default();
    config.bands.insert(
        "trans_temp".into(),
        SensorBand {
            token: "trans_temp".into(),
            high: Some(120.0),
            low: None,
            unit: "C".into(),
            aliases: vec![],
        },
    );
    let bands = SensorBands::from_config(&config);
    assert_eq!(bands.evaluate("trans_temp", 130.0, "C").as_deref(), Some("trans_temp_high"));
    assert_eq!(bands.evaluate("trans_temp", -40.0, "C"), None);
}

#[test]
fn evidence_serializes_with_kind_tag() {
    let ev = Evidence::new(
        "coolant_temp_high",
        EvidenceSource::Sensor {
            name: "coolant_temp".into(),
            value: 115.0,
            unit: "C".into(),
        },
    );
    let json = serde_json::to_value(&ev).unwrap();
    assert_eq!(json["source"]["kind"], "sensor");
    assert_eq!(json["token"], "coolant_temp_high");
    assert!(!ev.is_dtc());
}
