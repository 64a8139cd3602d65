//! Property tests for torque-causal over randomly authored knowledge bases.

use proptest::prelude::*;

use torque_causal::{CausalGraph, GraphCompiler};
use torque_core::config::GraphConfig;
use torque_core::constants::PROBABILITY_EPSILON;
use torque_knowledge::{ComponentDef, FailureMode, KnowledgeBase, Severity, SystemDef};

const SYMPTOMS: [&str; 6] = ["alpha sign", "beta sign", "gamma sign", "delta sign", "epsilon sign", "zeta sign"];
const TESTS: [&str; 4] = ["test one", "test two", "test three", "test four"];

type FailureSpec = (Vec<usize>, Vec<usize>, f64);

fn build_kb(specs: &[FailureSpec]) -> KnowledgeBase {
    let mut b = KnowledgeBase::builder();
    b.add_system(SystemDef::new("sys", "System", "")).unwrap();
    b.add_component(ComponentDef::new("comp", "Component", "sys"))
        .unwrap();
    for (i, (symptoms, tests, frequency)) in specs.iter().enumerate() {
        let mut failure = FailureMode::new(&format!("f{i}"), &format!("Failure {i}"), "sys", "comp")
            .frequency(*frequency);
        for &s in symptoms {
            failure = failure.symptom(SYMPTOMS[s], Severity::Moderate);
        }
        let tests: Vec<&str> = tests.iter().map(|&t| TESTS[t]).collect();
        failure = failure.tests(&tests);
        b.add_failure(failure).unwrap();
    }
    b.build()
}

fn kb_strategy() -> impl Strategy<Value = Vec<FailureSpec>> {
    prop::collection::vec(
        (
            prop::collection::vec(0..SYMPTOMS.len(), 0..4),
            prop::collection::vec(0..TESTS.len(), 0..3),
            0.01_f64..1.0_f64,
        ),
        2..8,
    )
}

fn key(s: &str) -> String {
    s.replace(' ', "_")
}

proptest! {
    #[test]
    fn probabilities_are_normalized(
        specs in kb_strategy(),
        query in prop::collection::vec(0..SYMPTOMS.len(), 1..4),
    ) {
        let kb = build_kb(&specs);
        let graph = CausalGraph::from_knowledge_base(&kb, GraphConfig::default()).unwrap();
        let symptoms: Vec<String> = query.iter().map(|&i| key(SYMPTOMS[i])).collect();
        let none: &[&str] = &[];
        let ranked = graph.get_failures_for_symptoms(&symptoms, none);
        if !ranked.is_empty() {
            let total: f64 = ranked.iter().map(|c| c.probability).sum();
            prop_assert!((total - 1.0).abs() < PROBABILITY_EPSILON);
            for c in &ranked {
                prop_assert!((0.0..=1.0 + 1e-9).contains(&c.probability));
                prop_assert!(c.explained_evidence >= 1);
            }
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].probability >= pair[1].probability);
            }
        }
    }

    #[test]
    fn discriminating_split_is_consistent(specs in kb_strategy()) {
        let kb = build_kb(&specs);
        let graph = CausalGraph::from_knowledge_base(&kb, GraphConfig::default()).unwrap();
        let ids: Vec<String> = (0..specs.len()).map(|i| format!("f{i}")).collect();
        if let Some(test) = graph.get_discriminating_test(&ids) {
            prop_assert_eq!(test.candidate_count(), ids.len());
            prop_assert!(test.split_score >= 1);
            prop_assert_eq!(
                test.split_score,
                test.suggesting.len().min(test.not_suggesting.len())
            );
            // Same answer on every call.
            prop_assert_eq!(graph.get_discriminating_test(&ids), Some(test));
        }
    }

    #[test]
    fn recompilation_yields_identical_edges(specs in kb_strategy()) {
        let kb = build_kb(&specs);
        let mut a = GraphCompiler::new(GraphConfig::default());
        a.compile_knowledge_base(&kb);
        let mut b = GraphCompiler::new(GraphConfig::default());
        b.compile_knowledge_base(&kb).clear().compile_knowledge_base(&kb);
        prop_assert_eq!(a.build().unwrap().edges(), b.build().unwrap().edges());
    }
}
