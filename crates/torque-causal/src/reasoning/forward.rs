//! Forward reasoning: what a failure should produce.

use petgraph::Direction;

use crate::graph::stable_graph::CausalNode;
use crate::graph::CausalGraph;

impl CausalGraph {
    /// `(symptom id, forward strength)` for every symptom the failure
    /// produces, strongest first, ties by symptom id. Unknown ids yield an
    /// empty list.
    pub fn get_symptoms_for_failure(&self, failure_id: &str) -> Vec<(String, f64)> {
        let Some(&idx) = self.inner.failure_index.get(failure_id) else {
            return Vec::new();
        };
        let graph = &self.inner.graph;

        let mut symptoms: Vec<(String, f64)> = graph
            .neighbors_directed(idx, Direction::Outgoing)
            .filter_map(|neighbor| {
                let symptom = graph.node_weight(neighbor).and_then(CausalNode::as_symptom)?;
                let edge = graph.find_edge(idx, neighbor)?;
                let weight = graph.edge_weight(edge)?;
                Some((symptom.id.clone(), weight.forward_strength))
            })
            .collect();

        symptoms.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        symptoms
    }
}
