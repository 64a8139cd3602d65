//! Knowledge base → causal graph compilation.
//!
//! Edges are upserted, so compiling the same failure list twice yields the
//! same edge set. Failures removed from the list are not pruned: call
//! [`GraphCompiler::clear`] before recompiling a changed knowledge base.

use std::sync::Arc;

use torque_core::config::GraphConfig;
use torque_core::errors::{GraphError, TorqueResult};
use torque_knowledge::{FailureMode, KnowledgeBase, PidEffectKind};

use super::stable_graph::{CausalEdgeWeight, FailureNode, IndexedGraph, SymptomKind, SymptomNode};
use super::CausalGraph;

/// Symptom key for a diagnostic trouble code.
pub fn dtc_key(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// Symptom key for a PID deviation, e.g. `coolant_temp_high`.
pub fn pid_key(pid: &str, effect: PidEffectKind) -> String {
    format!("{}_{}", pid.trim().to_lowercase(), effect.as_str())
}

/// Symptom key for an authored observation.
pub fn observation_key(description: &str, max_len: usize) -> String {
    description
        .trim()
        .to_lowercase()
        .chars()
        .take(max_len)
        .map(|c| if c == ' ' { '_' } else { c })
        .collect()
}

/// Mutable builder for a [`CausalGraph`].
#[derive(Debug, Default)]
pub struct GraphCompiler {
    graph: IndexedGraph,
    config: GraphConfig,
}

impl GraphCompiler {
    pub fn new(config: GraphConfig) -> Self {
        Self {
            graph: IndexedGraph::new(),
            config,
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Compile every failure mode in input order.
    pub fn compile_from_failures(&mut self, failures: &[Arc<FailureMode>]) -> &mut Self {
        for failure in failures {
            self.compile_failure(failure);
        }
        tracing::debug!(
            failures = failures.len(),
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            "compiled failure modes"
        );
        self
    }

    pub fn compile_knowledge_base(&mut self, kb: &KnowledgeBase) -> &mut Self {
        self.compile_from_failures(kb.failures())
    }

    fn compile_failure(&mut self, failure: &Arc<FailureMode>) {
        let prior = (failure.relative_frequency * self.config.prior_scale).max(0.0);
        let failure_idx = self.graph.upsert_failure(FailureNode {
            id: failure.id.clone(),
            name: failure.name.clone(),
            system_id: failure.system_id.clone(),
            component_id: failure.component_id.clone(),
            prior,
            source: Arc::clone(failure),
        });

        let dtc = self.config.dtc_edge;
        for code in &failure.expected_dtcs {
            let key = dtc_key(code);
            let symptom_idx = self.graph.ensure_symptom(&key, &key, SymptomKind::Dtc);
            self.graph.upsert_edge(
                failure_idx,
                symptom_idx,
                CausalEdgeWeight {
                    forward_strength: dtc.forward,
                    backward_strength: dtc.backward,
                    condition: None,
                },
            );
        }

        let pid = self.config.pid_edge;
        for effect in &failure.pid_effects {
            let key = pid_key(&effect.pid, effect.effect);
            let kind = SymptomKind::Pid {
                pid: effect.pid.trim().to_lowercase(),
                effect: effect.effect,
                threshold: effect.typical_value.clone(),
            };
            let symptom_idx = self.graph.ensure_symptom(&key, &effect.description, kind);
            self.graph.upsert_edge(
                failure_idx,
                symptom_idx,
                CausalEdgeWeight {
                    forward_strength: pid.forward,
                    backward_strength: pid.backward,
                    condition: effect.typical_value.clone(),
                },
            );
        }

        for symptom in &failure.symptoms {
            let key = observation_key(&symptom.description, self.config.observation_key_len);
            if key.is_empty() {
                tracing::warn!(failure = %failure.id, "skipping blank symptom description");
                continue;
            }
            let symptom_idx =
                self.graph
                    .ensure_symptom(&key, &symptom.description, SymptomKind::Observation);
            self.graph.upsert_edge(
                failure_idx,
                symptom_idx,
                CausalEdgeWeight {
                    forward_strength: symptom.severity.forward_strength(),
                    backward_strength: self.config.observation_backward,
                    condition: None,
                },
            );
        }
    }

    /// Add or overwrite a single edge from an already-compiled failure.
    ///
    /// The symptom node is created if its id is new; an existing node keeps
    /// its original name and kind.
    pub fn add_edge(
        &mut self,
        failure_id: &str,
        symptom: SymptomNode,
        weight: CausalEdgeWeight,
    ) -> TorqueResult<&mut Self> {
        for strength in [weight.forward_strength, weight.backward_strength] {
            if !(0.0..=1.0).contains(&strength) {
                return Err(GraphError::InvalidStrength {
                    failure_id: failure_id.to_string(),
                    symptom_id: symptom.id,
                    strength,
                }
                .into());
            }
        }
        let failure_idx = *self.graph.failure_index.get(failure_id).ok_or_else(|| {
            GraphError::UnknownFailure {
                id: failure_id.to_string(),
            }
        })?;
        let symptom_idx = self
            .graph
            .ensure_symptom(&symptom.id, &symptom.name, symptom.kind);
        self.graph.upsert_edge(failure_idx, symptom_idx, weight);
        Ok(self)
    }

    /// Drop every node and edge compiled so far.
    pub fn clear(&mut self) -> &mut Self {
        self.graph.clear();
        self
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Freeze into a queryable graph. Fails when no failure was compiled.
    pub fn build(self) -> TorqueResult<CausalGraph> {
        let graph = CausalGraph::from_parts(self.graph, self.config)?;
        tracing::info!(
            failures = graph.failure_count(),
            symptoms = graph.symptom_count(),
            edges = graph.edge_count(),
            "causal graph built"
        );
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observation_key_truncates_then_underscores() {
        assert_eq!(observation_key("  Fan Not Running ", 40), "fan_not_running");
        assert_eq!(observation_key("abc def", 5), "abc_d");
    }

    #[test]
    fn pid_key_lowercases_pid() {
        assert_eq!(pid_key("Coolant_Temp", PidEffectKind::StuckLow), "coolant_temp_stuck_low");
    }

    #[test]
    fn dtc_key_uppercases() {
        assert_eq!(dtc_key(" p0217"), "P0217");
    }
}
