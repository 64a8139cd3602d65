use std::sync::Arc;
use std::thread;

use torque_core::TorqueConfig;
use torque_session::{DiagnosticEngine, Phase, SessionManager};

fn manager() -> SessionManager {
    let engine = DiagnosticEngine::from_config(TorqueConfig::default()).unwrap();
    SessionManager::new(Arc::new(engine))
}

#[test]
fn create_mutate_and_remove() {
    let m = manager();
    let id = m.create_session().unwrap();
    assert_eq!(m.session_count(), 1);
    assert_eq!(m.get_diagnosis(&id).unwrap().phase, Phase::Initial);

    m.with_session(&id, |s| s.add_dtc("P0562")).unwrap();
    let diagnosis = m.get_diagnosis(&id).unwrap();
    assert_eq!(diagnosis.primary.failure_id, "battery_weak");
    assert_eq!(diagnosis.session_id, id);

    let removed = m.remove_session(&id).unwrap();
    assert_eq!(removed.id(), id);
    assert!(m.get_diagnosis(&id).is_none());
    assert_eq!(m.session_count(), 0);
}

#[test]
fn unknown_session_is_an_error() {
    let m = manager();
    let err = m.with_session("missing", |s| s.add_dtc("P0300")).unwrap_err();
    assert_eq!(err.error_code(), "SESSION_NOT_FOUND");
}

#[test]
fn concluded_error_propagates_through_manager() {
    let m = manager();
    let id = m.create_session().unwrap();
    m.with_session(&id, |s| Ok(s.conclude())).unwrap();
    let err = m.with_session(&id, |s| s.add_symptom("misfire")).unwrap_err();
    assert_eq!(err.error_code(), "SESSION_CONCLUDED");
}

#[test]
fn concurrent_sessions_do_not_interfere() {
    let m = Arc::new(manager());
    let ids: Vec<String> = (0..8).map(|_| m.create_session().unwrap()).collect();

    let handles: Vec<_> = ids
        .iter()
        .enumerate()
        .map(|(i, id)| {
            let m = Arc::clone(&m);
            let id = id.clone();
            thread::spawn(move || {
                let code = if i % 2 == 0 { "P0562" } else { "P0171" };
                m.with_session(&id, |s| s.add_dtc(code)).unwrap();
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    for (i, id) in ids.iter().enumerate() {
        let expected = if i % 2 == 0 { "battery_weak" } else { "vacuum_leak" };
        let diagnosis = m.get_diagnosis(id).unwrap();
        assert_eq!(diagnosis.primary.failure_id, expected);
        assert_eq!(diagnosis.evidence.len(), if i % 2 == 0 { 2 } else { 1 });
    }
    let mut listed = m.session_ids();
    listed.sort();
    let mut created = ids.clone();
    created.sort();
    assert_eq!(listed, created);
}
