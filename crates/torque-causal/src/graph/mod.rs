//! The compiled, read-only causal graph.

pub mod compiler;
pub mod shared;
pub mod stable_graph;

use petgraph::Direction;
use torque_core::config::GraphConfig;
use torque_core::errors::{GraphError, TorqueResult};
use torque_knowledge::KnowledgeBase;

use compiler::GraphCompiler;
use stable_graph::{CausalEdge, CausalNode, FailureNode, IndexedGraph, SymptomNode};

/// Immutable bipartite graph of failures and the symptoms they produce.
///
/// Built once by [`GraphCompiler`]; all queries take `&self`, so a graph can
/// be shared across sessions behind an `Arc`.
#[derive(Debug, Clone)]
pub struct CausalGraph {
    pub(crate) inner: IndexedGraph,
    pub(crate) config: GraphConfig,
    fallback: FailureNode,
}

impl CausalGraph {
    pub(crate) fn from_parts(inner: IndexedGraph, config: GraphConfig) -> TorqueResult<Self> {
        let fallback = inner
            .graph
            .node_indices()
            .filter_map(|idx| inner.graph.node_weight(idx))
            .filter_map(CausalNode::as_failure)
            .max_by(|a, b| a.prior.total_cmp(&b.prior).then_with(|| b.id.cmp(&a.id)))
            .cloned()
            .ok_or(GraphError::EmptyKnowledgeBase)?;
        Ok(Self {
            inner,
            config,
            fallback,
        })
    }

    /// Compile a whole knowledge base in one step.
    pub fn from_knowledge_base(kb: &KnowledgeBase, config: GraphConfig) -> TorqueResult<Self> {
        let mut compiler = GraphCompiler::new(config);
        compiler.compile_knowledge_base(kb);
        compiler.build()
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn failure(&self, id: &str) -> Option<&FailureNode> {
        self.inner.failure(id)
    }

    /// Symptom by exact id, then by lower-case or upper-case id.
    pub fn symptom(&self, id: &str) -> Option<&SymptomNode> {
        self.resolve_symptom_id(id)
            .and_then(|key| self.inner.symptom(key))
    }

    pub(crate) fn resolve_symptom_id<'a>(&'a self, id: &str) -> Option<&'a str> {
        let trimmed = id.trim();
        [
            trimmed.to_string(),
            trimmed.to_lowercase(),
            trimmed.to_ascii_uppercase(),
        ]
        .into_iter()
        .find_map(|candidate| {
            self.inner
                .symptom_index
                .get_key_value(candidate.as_str())
                .map(|(k, _)| k.as_str())
        })
    }

    /// Failures in ascending id order.
    pub fn failures(&self) -> Vec<&FailureNode> {
        let mut failures: Vec<&FailureNode> = self
            .inner
            .graph
            .node_indices()
            .filter_map(|idx| self.inner.graph.node_weight(idx))
            .filter_map(CausalNode::as_failure)
            .collect();
        failures.sort_by(|a, b| a.id.cmp(&b.id));
        failures
    }

    /// Symptoms in ascending id order.
    pub fn symptoms(&self) -> Vec<&SymptomNode> {
        let mut symptoms: Vec<&SymptomNode> = self
            .inner
            .graph
            .node_indices()
            .filter_map(|idx| self.inner.graph.node_weight(idx))
            .filter_map(CausalNode::as_symptom)
            .collect();
        symptoms.sort_by(|a, b| a.id.cmp(&b.id));
        symptoms
    }

    /// Every edge, sorted by (failure id, symptom id).
    pub fn edges(&self) -> Vec<CausalEdge> {
        let graph = &self.inner.graph;
        let mut edges: Vec<CausalEdge> = graph
            .edge_indices()
            .filter_map(|e| {
                let (from, to) = graph.edge_endpoints(e)?;
                let failure = graph.node_weight(from)?.as_failure()?;
                let symptom = graph.node_weight(to)?.as_symptom()?;
                let weight = graph.edge_weight(e)?;
                Some(CausalEdge {
                    failure_id: failure.id.clone(),
                    symptom_id: symptom.id.clone(),
                    forward_strength: weight.forward_strength,
                    backward_strength: weight.backward_strength,
                    condition: weight.condition.clone(),
                })
            })
            .collect();
        edges.sort_by(|a, b| {
            a.failure_id
                .cmp(&b.failure_id)
                .then_with(|| a.symptom_id.cmp(&b.symptom_id))
        });
        edges
    }

    /// Failures with an edge into the given symptom, unordered.
    pub(crate) fn producers_of(&self, symptom_id: &str) -> Vec<&FailureNode> {
        let Some(&idx) = self.inner.symptom_index.get(symptom_id) else {
            return Vec::new();
        };
        self.inner
            .graph
            .neighbors_directed(idx, Direction::Incoming)
            .filter_map(|n| self.inner.graph.node_weight(n))
            .filter_map(CausalNode::as_failure)
            .collect()
    }

    /// Backward strength of the failure → symptom edge, if connected.
    pub(crate) fn backward_strength(&self, failure_id: &str, symptom_id: &str) -> Option<f64> {
        let from = *self.inner.failure_index.get(failure_id)?;
        let to = *self.inner.symptom_index.get(symptom_id)?;
        self.inner
            .graph
            .find_edge(from, to)
            .and_then(|e| self.inner.graph.edge_weight(e))
            .map(|w| w.backward_strength)
    }

    /// Highest-prior failure across the whole graph; ties go to the smaller id.
    pub fn highest_prior_failure(&self) -> &FailureNode {
        &self.fallback
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    pub fn failure_count(&self) -> usize {
        self.inner.failure_index.len()
    }

    pub fn symptom_count(&self) -> usize {
        self.inner.symptom_index.len()
    }
}
