//! petgraph::StableGraph wrapper with failure/symptom node and edge types.

use std::collections::HashMap;
use std::sync::Arc;

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::Directed;
use serde::{Deserialize, Serialize};
use torque_knowledge::{FailureMode, PidEffectKind};

/// A failure hypothesis, one per authored failure mode.
#[derive(Debug, Clone)]
pub struct FailureNode {
    pub id: String,
    pub name: String,
    pub system_id: String,
    pub component_id: String,
    /// Seed probability: relative frequency × prior scale. Never negative.
    pub prior: f64,
    /// The authored record this node was compiled from.
    pub source: Arc<FailureMode>,
}

/// What kind of observable a symptom node stands for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SymptomKind {
    /// A diagnostic trouble code.
    Dtc,
    /// A live sensor channel deviating in a known direction.
    Pid {
        pid: String,
        effect: PidEffectKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        threshold: Option<String>,
    },
    /// Something a driver or technician can see, hear, or feel.
    Observation,
}

impl SymptomKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Dtc => "dtc",
            Self::Pid { .. } => "pid",
            Self::Observation => "observation",
        }
    }
}

/// An observable symptom, shared by every failure that produces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomNode {
    pub id: String,
    pub name: String,
    pub kind: SymptomKind,
}

/// Graph node: the graph is bipartite, edges always run failure → symptom.
#[derive(Debug, Clone)]
pub enum CausalNode {
    Failure(FailureNode),
    Symptom(SymptomNode),
}

impl CausalNode {
    pub fn as_failure(&self) -> Option<&FailureNode> {
        match self {
            Self::Failure(f) => Some(f),
            Self::Symptom(_) => None,
        }
    }

    pub fn as_symptom(&self) -> Option<&SymptomNode> {
        match self {
            Self::Symptom(s) => Some(s),
            Self::Failure(_) => None,
        }
    }
}

/// Weight on a failure → symptom edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CausalEdgeWeight {
    /// How strongly the failure produces the symptom, 0.0–1.0.
    pub forward_strength: f64,
    /// How strongly the symptom implicates the failure, 0.0–1.0.
    pub backward_strength: f64,
    /// Condition under which the relationship holds, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

/// Flattened edge listing, used for audit and determinism checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CausalEdge {
    pub failure_id: String,
    pub symptom_id: String,
    pub forward_strength: f64,
    pub backward_strength: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

/// The underlying directed graph type.
pub type CausalStableGraph = StableGraph<CausalNode, CausalEdgeWeight, Directed>;

/// Graph plus id → index maps. Failure and symptom ids live in separate
/// namespaces so a failure may share an id with a symptom.
#[derive(Debug, Clone)]
pub struct IndexedGraph {
    pub graph: CausalStableGraph,
    pub failure_index: HashMap<String, NodeIndex>,
    pub symptom_index: HashMap<String, NodeIndex>,
}

impl IndexedGraph {
    pub fn new() -> Self {
        Self {
            graph: StableGraph::new(),
            failure_index: HashMap::new(),
            symptom_index: HashMap::new(),
        }
    }

    /// Insert or replace the node for a failure.
    pub fn upsert_failure(&mut self, node: FailureNode) -> NodeIndex {
        if let Some(&idx) = self.failure_index.get(&node.id) {
            if let Some(weight) = self.graph.node_weight_mut(idx) {
                *weight = CausalNode::Failure(node);
            }
            return idx;
        }
        let id = node.id.clone();
        let idx = self.graph.add_node(CausalNode::Failure(node));
        self.failure_index.insert(id, idx);
        idx
    }

    /// Get or create a symptom node. The first registration fixes its kind.
    pub fn ensure_symptom(&mut self, id: &str, name: &str, kind: SymptomKind) -> NodeIndex {
        if let Some(&idx) = self.symptom_index.get(id) {
            return idx;
        }
        let node = SymptomNode {
            id: id.to_string(),
            name: name.to_string(),
            kind,
        };
        let idx = self.graph.add_node(CausalNode::Symptom(node));
        self.symptom_index.insert(id.to_string(), idx);
        idx
    }

    /// Add an edge, replacing the weight if the pair is already connected.
    pub fn upsert_edge(&mut self, failure: NodeIndex, symptom: NodeIndex, weight: CausalEdgeWeight) {
        self.graph.update_edge(failure, symptom, weight);
    }

    pub fn failure(&self, id: &str) -> Option<&FailureNode> {
        self.failure_index
            .get(id)
            .and_then(|&idx| self.graph.node_weight(idx))
            .and_then(CausalNode::as_failure)
    }

    pub fn symptom(&self, id: &str) -> Option<&SymptomNode> {
        self.symptom_index
            .get(id)
            .and_then(|&idx| self.graph.node_weight(idx))
            .and_then(CausalNode::as_symptom)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn clear(&mut self) {
        self.graph.clear();
        self.failure_index.clear();
        self.symptom_index.clear();
    }
}

impl Default for IndexedGraph {
    fn default() -> Self {
        Self::new()
    }
}
