//! Composition root: configuration, knowledge, graph, matcher and sensor
//! bands wired together once and shared by every session.

use std::sync::Arc;

use torque_causal::{CausalGraph, SharedGraph};
use torque_core::tracing_setup::init_tracing;
use torque_core::{TorqueConfig, TorqueResult};
use torque_knowledge::{catalog, KnowledgeBase};
use torque_symptoms::{SensorBands, SymptomMatcher};

use crate::session::DiagnosticSession;

/// Everything a session needs, built once per process.
#[derive(Debug)]
pub struct DiagnosticEngine {
    graph: SharedGraph,
    matcher: Arc<SymptomMatcher>,
    sensors: Arc<SensorBands>,
    config: TorqueConfig,
}

impl DiagnosticEngine {
    /// Engine over the built-in catalog. Also installs the global tracing
    /// subscriber on first call.
    pub fn from_config(config: TorqueConfig) -> TorqueResult<Self> {
        init_tracing(&config.observability);
        let kb = catalog::builtin()?;
        Self::with_knowledge_base(&kb, config)
    }

    pub fn with_knowledge_base(kb: &KnowledgeBase, config: TorqueConfig) -> TorqueResult<Self> {
        config.validate()?;
        let graph = CausalGraph::from_knowledge_base(kb, config.graph.clone())?;
        Ok(Self {
            graph: SharedGraph::new(graph),
            matcher: Arc::new(SymptomMatcher::with_config(config.matcher.clone())),
            sensors: Arc::new(SensorBands::from_config(&config.sensors)),
            config,
        })
    }

    pub fn config(&self) -> &TorqueConfig {
        &self.config
    }

    pub fn graph(&self) -> TorqueResult<Arc<CausalGraph>> {
        self.graph.current()
    }

    /// Start a session against the current graph.
    pub fn new_session(&self) -> TorqueResult<DiagnosticSession> {
        Ok(DiagnosticSession::with_components(
            self.graph.current()?,
            Arc::clone(&self.matcher),
            Arc::clone(&self.sensors),
            self.config.session.clone(),
        ))
    }

    /// Recompile from a new knowledge base. Open sessions keep the graph
    /// they started with.
    pub fn reload(&self, kb: &KnowledgeBase) -> TorqueResult<()> {
        let graph = CausalGraph::from_knowledge_base(kb, self.config.graph.clone())?;
        self.graph.swap(graph)?;
        Ok(())
    }
}
