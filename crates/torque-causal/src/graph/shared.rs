//! Hot-swappable handle to the current graph.

use std::sync::{Arc, RwLock};

use torque_core::errors::{TorqueError, TorqueResult};

use super::CausalGraph;

/// Holds the graph new sessions should use.
///
/// Sessions clone the inner `Arc`, so a [`swap`](Self::swap) only affects
/// sessions created afterwards.
#[derive(Debug)]
pub struct SharedGraph {
    inner: RwLock<Arc<CausalGraph>>,
}

impl SharedGraph {
    pub fn new(graph: CausalGraph) -> Self {
        Self {
            inner: RwLock::new(Arc::new(graph)),
        }
    }

    pub fn current(&self) -> TorqueResult<Arc<CausalGraph>> {
        let guard = self
            .inner
            .read()
            .map_err(|e| TorqueError::ConcurrencyError(e.to_string()))?;
        Ok(Arc::clone(&guard))
    }

    /// Install a new graph, returning the previous one.
    pub fn swap(&self, graph: CausalGraph) -> TorqueResult<Arc<CausalGraph>> {
        let mut guard = self
            .inner
            .write()
            .map_err(|e| TorqueError::ConcurrencyError(e.to_string()))?;
        let previous = std::mem::replace(&mut *guard, Arc::new(graph));
        tracing::info!(
            failures = guard.failure_count(),
            edges = guard.edge_count(),
            "causal graph swapped"
        );
        Ok(previous)
    }
}
