use std::sync::Arc;

use torque_causal::CausalGraph;
use torque_core::config::{GraphConfig, SessionConfig};
use torque_core::TorqueConfig;
use torque_knowledge::{catalog, ComponentDef, FailureMode, KnowledgeBase, Severity, SystemDef};
use torque_session::{DiagnosticEngine, DiagnosticSession, Phase};
use torque_symptoms::{EvidenceSource, SensorBands, SymptomMatcher};

fn builtin_graph() -> Arc<CausalGraph> {
    let kb = catalog::builtin().unwrap();
    Arc::new(CausalGraph::from_knowledge_base(&kb, GraphConfig::default()).unwrap())
}

fn session() -> DiagnosticSession {
    DiagnosticSession::new(builtin_graph())
}

fn tokens(session: &DiagnosticSession) -> Vec<&str> {
    session.evidence().iter().map(|e| e.token.as_str()).collect()
}

// ── Scenarios ─────────────────────────────────────────────────────────────

#[test]
fn scenario_overheating_with_code_and_reading() {
    let mut s = session();
    s.add_dtc("P0217").unwrap();
    s.add_sensor_reading("coolant_temp", 115.0, "C").unwrap();
    s.add_symptom("overheating").unwrap();

    let diagnosis = s.get_diagnosis();
    assert!(!diagnosis.primary.failure_id.is_empty());
    assert!((0.0..=1.0).contains(&diagnosis.primary.confidence));
    assert!(matches!(diagnosis.phase, Phase::Investigating | Phase::Confident));
    assert_eq!(diagnosis.primary.failure_id, "thermostat_stuck_closed");
    assert!(!diagnosis.repair_actions.is_empty());
}

#[test]
fn scenario_no_evidence_falls_back_to_highest_prior() {
    let s = session();
    let diagnosis = s.get_diagnosis();
    assert_eq!(diagnosis.phase, Phase::Initial);
    assert_eq!(diagnosis.primary.failure_id, "battery_weak");
    assert!((diagnosis.primary.confidence - 0.18).abs() < 1e-9);
    assert!(diagnosis.alternatives.is_empty());
    assert_eq!(diagnosis.repair_actions[0], "Replace battery");
}

#[test]
fn corroborating_evidence_changes_top_confidence() {
    let mut s = session();
    s.add_sensor_reading("coolant_temp", 115.0, "C").unwrap();
    let before = s.get_top_suspects(1)[0].clone();

    s.add_dtc("P0480").unwrap();
    let after = s.get_top_suspects(1)[0].clone();

    assert_eq!(before.failure_id, "coolant_hose_leak");
    assert_eq!(after.failure_id, "cooling_fan_motor_failure");
    assert!((before.probability - after.probability).abs() > 1e-3);
}

// ── Evidence handling ─────────────────────────────────────────────────────

#[test]
fn dtc_adds_code_and_mapped_token_once() {
    let mut s = session();
    let added = s.add_dtc(" p0480 ").unwrap();
    assert_eq!(added, vec!["P0480", "fan_not_running"]);
    assert!(s.add_dtc("P0480").unwrap().is_empty());
    assert!(s.add_symptom("fan not running").unwrap().is_empty());
    assert_eq!(tokens(&s), vec!["P0480", "fan_not_running"]);
    assert!(matches!(
        &s.evidence()[1].source,
        EvidenceSource::Dtc { code } if code == "P0480"
    ));
}

#[test]
fn unmapped_dtc_still_counts_as_evidence() {
    let mut s = session();
    assert_eq!(s.add_dtc("P0171").unwrap(), vec!["P0171"]);
    let suspects: Vec<&str> = s.get_top_suspects(5).iter().map(|c| c.failure_id.as_str()).collect();
    assert_eq!(suspects, vec!["vacuum_leak", "maf_sensor_contaminated"]);
}

#[test]
fn malformed_dtc_and_blank_text_are_ignored() {
    let mut s = session();
    assert!(s.add_dtc("P0-217").unwrap().is_empty());
    assert!(s.add_dtc("   ").unwrap().is_empty());
    assert!(s.add_symptom("   ").unwrap().is_empty());
    assert_eq!(s.phase(), Phase::Initial);
}

#[test]
fn in_band_reading_emits_nothing() {
    let mut s = session();
    assert!(s.add_sensor_reading("coolant_temp", 90.0, "C").unwrap().is_empty());
    assert!(s.add_sensor_reading("unknown_sensor", 1.0, "").unwrap().is_empty());
    assert!(s.evidence().is_empty());
}

#[test]
fn sensor_reading_records_provenance() {
    let mut s = session();
    s.add_sensor_reading("ECT", 239.0, "F").unwrap();
    assert_eq!(tokens(&s), vec!["coolant_temp_high"]);
    assert!(matches!(
        &s.evidence()[0].source,
        EvidenceSource::Sensor { name, unit, .. } if name == "ECT" && unit == "F"
    ));
}

#[test]
fn text_evidence_records_matcher_confidence() {
    let mut s = session();
    s.add_symptom("The engine is overheating").unwrap();
    s.add_symptom("rough_idle").unwrap();
    s.add_symptom("squeaky glovebox").unwrap();
    assert_eq!(tokens(&s), vec!["coolant_temp_high", "rough_idle", "squeaky glovebox"]);

    let confidences: Vec<Option<f64>> = s
        .evidence()
        .iter()
        .map(|e| match &e.source {
            EvidenceSource::Text { confidence, .. } => *confidence,
            _ => panic!("expected text evidence"),
        })
        .collect();
    assert!(confidences[0].is_some_and(|c| c >= 0.6));
    let best = SymptomMatcher::new().best_match("The engine is overheating").unwrap();
    assert_eq!(confidences[0], Some(best.confidence));
    assert_eq!(confidences[1], None);
    assert_eq!(confidences[2], None);
}

#[test]
fn unknown_evidence_only_is_investigating_with_fallback() {
    let mut s = session();
    s.add_symptom("squeaky glovebox").unwrap();
    assert_eq!(s.phase(), Phase::Investigating);
    assert!(s.get_top_suspects(3).is_empty());
    let diagnosis = s.get_diagnosis();
    assert_eq!(diagnosis.primary.failure_id, "battery_weak");
    assert_eq!(diagnosis.evidence.len(), 1);
}

// ── Phases ────────────────────────────────────────────────────────────────

#[test]
fn strong_agreeing_evidence_reaches_confident() {
    let mut s = session();
    s.add_dtc("P0562").unwrap();
    assert_eq!(s.phase(), Phase::Confident);
    let top = &s.get_top_suspects(1)[0];
    assert_eq!(top.failure_id, "battery_weak");
    assert!(top.probability >= 0.6);
}

#[test]
fn confident_threshold_comes_from_config() {
    let kb = catalog::builtin().unwrap();
    let graph = Arc::new(CausalGraph::from_knowledge_base(&kb, GraphConfig::default()).unwrap());
    let config = SessionConfig {
        confident_threshold: 0.99,
        ..SessionConfig::default()
    };
    let mut s = DiagnosticSession::with_components(
        graph,
        Arc::new(SymptomMatcher::new()),
        Arc::new(SensorBands::default()),
        config,
    );
    s.add_dtc("P0562").unwrap();
    assert_eq!(s.phase(), Phase::Investigating);
}

#[test]
fn single_candidate_knowledge_base_is_confident_immediately() {
    let mut b = KnowledgeBase::builder();
    b.add_system(SystemDef::new("sys", "System", "")).unwrap();
    b.add_component(ComponentDef::new("comp", "Component", "sys"))
        .unwrap();
    b.add_failure(
        FailureMode::new("only", "Only Failure", "sys", "comp")
            .symptom("rough idle", Severity::Moderate)
            .repairs(&["Fix it"])
            .frequency(0.2),
    )
    .unwrap();
    let kb = b.build();
    let graph = Arc::new(CausalGraph::from_knowledge_base(&kb, GraphConfig::default()).unwrap());

    let mut s = DiagnosticSession::new(graph);
    s.add_symptom("it shakes at idle").unwrap();
    assert_eq!(s.phase(), Phase::Confident);
    let diagnosis = s.get_diagnosis();
    assert_eq!(diagnosis.primary.failure_id, "only");
    assert!((diagnosis.primary.confidence - 1.0).abs() < 1e-9);
    assert_eq!(diagnosis.repair_actions, vec!["Fix it"]);
}

#[test]
fn fallback_confidence_stays_in_unit_range_for_frequent_failures() {
    let mut b = KnowledgeBase::builder();
    b.add_system(SystemDef::new("sys", "System", "")).unwrap();
    b.add_component(ComponentDef::new("comp", "Component", "sys"))
        .unwrap();
    b.add_failure(
        FailureMode::new("common", "Common Failure", "sys", "comp")
            .symptom("rough idle", Severity::Moderate)
            .frequency(10.0),
    )
    .unwrap();
    let kb = b.build();
    let graph = Arc::new(CausalGraph::from_knowledge_base(&kb, GraphConfig::default()).unwrap());
    assert!(graph.highest_prior_failure().prior > 1.0);

    let s = DiagnosticSession::new(graph);
    let diagnosis = s.get_diagnosis();
    assert_eq!(diagnosis.phase, Phase::Initial);
    assert_eq!(diagnosis.primary.failure_id, "common");
    assert!((0.0..=1.0).contains(&diagnosis.primary.confidence));
    assert_eq!(diagnosis.primary.confidence, 1.0);
}

#[test]
fn concluded_session_rejects_evidence_and_freezes() {
    let mut s = session();
    s.add_dtc("P0217").unwrap();
    let concluded = s.conclude();
    assert_eq!(concluded.phase, Phase::Concluded);
    assert_eq!(s.phase(), Phase::Concluded);

    let err = s.add_symptom("white smoke").unwrap_err();
    assert_eq!(err.error_code(), "SESSION_CONCLUDED");
    assert!(s.add_dtc("P0300").is_err());
    assert!(s.add_sensor_reading("coolant_temp", 120.0, "C").is_err());

    let later = s.get_diagnosis();
    assert_eq!(later, concluded);
    assert_eq!(s.conclude(), concluded);
}

#[test]
fn get_diagnosis_does_not_mutate() {
    let mut s = session();
    s.add_dtc("P0300").unwrap();
    let activity = s.last_activity();
    let first = s.get_diagnosis();
    let second = s.get_diagnosis();
    assert_eq!(first.primary, second.primary);
    assert_eq!(first.alternatives, second.alternatives);
    assert_eq!(s.last_activity(), activity);
    assert!(s.created_at() <= s.last_activity());
}

// ── Test recommendation ───────────────────────────────────────────────────

#[test]
fn recommends_scan_tool_test_for_fan_ambiguity() {
    let mut s = session();
    s.add_symptom("engine is overheating").unwrap();
    s.add_symptom("the radiator fan doesn't turn on").unwrap();

    let rec = s.recommend_test().unwrap();
    assert_eq!(rec.test, "Command fan on with scan tool");
    assert_eq!(
        rec.splits.suggesting,
        vec!["cooling_fan_motor_failure", "fan_relay_failure"]
    );
    assert_eq!(rec.splits.not_suggesting.len(), 3);
    let expected_bits = 5f64.log2() * 0.8;
    assert!((rec.information_gain_bits - expected_bits).abs() < 1e-9);
    assert!(rec.description.starts_with("Command fan on with scan tool: "));
}

#[test]
fn no_recommendation_without_ambiguity() {
    let s = session();
    assert!(s.recommend_test().is_none());
}

// ── Reports ───────────────────────────────────────────────────────────────

#[test]
fn report_groups_serialize() {
    let mut s = session();
    s.add_dtc("P0480").unwrap();
    let diagnosis = s.get_diagnosis();
    let report = diagnosis.to_report();
    assert_eq!(report.diagnosis.failure, diagnosis.primary.failure_id);
    assert_eq!(report.alternatives.len(), diagnosis.alternatives.len());

    let json: serde_json::Value = serde_json::from_str(&diagnosis.to_json().unwrap()).unwrap();
    assert_eq!(json["diagnosis"]["failure"], "cooling_fan_motor_failure");
    assert_eq!(json["phase"], "investigating");
    assert_eq!(json["evidence"][0]["token"], "P0480");
    assert_eq!(json["evidence"][0]["source"]["kind"], "dtc");
    assert!(json["repair_actions"].as_array().unwrap().len() >= 1);
    assert!(json["alternatives"][0]["probability"].is_number());
}

// ── Engine ────────────────────────────────────────────────────────────────

#[test]
fn engine_sessions_keep_their_graph_across_reload() {
    let engine = DiagnosticEngine::from_config(TorqueConfig::default()).unwrap();
    let mut old = engine.new_session().unwrap();

    let mut b = KnowledgeBase::builder();
    b.add_system(SystemDef::new("sys", "System", "")).unwrap();
    b.add_component(ComponentDef::new("comp", "Component", "sys"))
        .unwrap();
    b.add_failure(FailureMode::new("only", "Only", "sys", "comp").frequency(1.0))
        .unwrap();
    engine.reload(&b.build()).unwrap();

    old.add_dtc("P0562").unwrap();
    assert_eq!(old.get_diagnosis().primary.failure_id, "battery_weak");

    let fresh = engine.new_session().unwrap();
    assert_eq!(fresh.get_diagnosis().primary.failure_id, "only");
    assert_eq!(engine.graph().unwrap().failure_count(), 1);
}

#[test]
fn engine_applies_configured_sensor_bands() {
    let config = TorqueConfig::from_toml(
        r#"
        [sensors.bands.coolant_temp]
        token = "coolant_temp"
        unit = "C"
        high = 95.0
        low = 70.0
        "#,
    )
    .unwrap();
    let engine = DiagnosticEngine::from_config(config).unwrap();
    let mut s = engine.new_session().unwrap();
    assert_eq!(s.add_sensor_reading("coolant_temp", 100.0, "C").unwrap(), vec!["coolant_temp_high"]);
}
