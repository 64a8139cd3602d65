//! Golden backward-query scenarios against the built-in catalog.

use torque_causal::CausalGraph;
use torque_core::config::GraphConfig;
use torque_knowledge::catalog;
use test_fixtures::{fixture_exists, load_fixture, load_fixture_value, load_scenarios, CausalScenario};

#[test]
fn golden_causal_scenarios() {
    let kb = catalog::builtin().unwrap();
    let graph = CausalGraph::from_knowledge_base(&kb, GraphConfig::default()).unwrap();
    let scenarios: Vec<CausalScenario> = load_scenarios("golden/causal");
    assert!(!scenarios.is_empty());

    for scenario in &scenarios {
        let ranked = graph.get_failures_for_symptoms(&scenario.symptoms, &scenario.dtcs);
        let expected = &scenario.expected;
        assert_eq!(ranked.len(), expected.candidate_count, "{}", scenario.name);

        let ids: Vec<&str> = ranked
            .iter()
            .take(expected.ranking_prefix.len())
            .map(|c| c.failure_id.as_str())
            .collect();
        assert_eq!(ids, expected.ranking_prefix, "{}", scenario.name);

        if let Some(top) = expected.top_probability {
            let actual = ranked[0].probability;
            assert!(
                (actual - top).abs() < 1e-3,
                "{}: top probability {actual} != {top}",
                scenario.name
            );
        }
    }
}

#[test]
fn golden_dtc_only_query_is_case_insensitive() {
    let path = "golden/causal/low_voltage_code.json";
    assert!(fixture_exists(path));

    // The fixture deliberately spells the code in lower case.
    let raw = load_fixture_value(path);
    assert_eq!(raw["dtcs"][0], "p0562");

    let scenario: CausalScenario = load_fixture(path);
    let kb = catalog::builtin().unwrap();
    let graph = CausalGraph::from_knowledge_base(&kb, GraphConfig::default()).unwrap();
    let lower = graph.get_failures_for_symptoms::<&str, _>(&[], &scenario.dtcs);
    let upper = graph.get_failures_for_symptoms::<&str, _>(&[], &["P0562"]);
    assert_eq!(lower, upper);
}
