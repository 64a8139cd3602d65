//! # torque-causal
//!
//! The bipartite failure ↔ symptom graph. A [`GraphCompiler`] turns the
//! knowledge base into an immutable [`CausalGraph`] once; the graph then
//! answers forward queries (what a failure should produce), backward queries
//! (which failures explain the evidence), and picks discriminating tests.

pub mod graph;
pub mod narrative;
pub mod reasoning;

pub use graph::compiler::GraphCompiler;
pub use graph::shared::SharedGraph;
pub use graph::stable_graph::{CausalEdge, CausalEdgeWeight, FailureNode, SymptomKind, SymptomNode};
pub use graph::CausalGraph;
pub use narrative::{ExpectedSymptom, Manifestation};
pub use reasoning::backward::FailureProbability;
pub use reasoning::discrimination::DiscriminatingTest;
