//! Human-readable manifestation summaries for explanation and audit.

use serde::Serialize;
use torque_core::errors::{GraphError, TorqueResult};

use crate::graph::CausalGraph;

/// One expected observation with its forward strength.
#[derive(Debug, Clone, Serialize)]
pub struct ExpectedSymptom {
    pub symptom_id: String,
    pub name: String,
    pub kind: &'static str,
    pub strength: f64,
}

/// How a failure shows itself, from root effect to observables.
#[derive(Debug, Clone, Serialize)]
pub struct Manifestation {
    pub failure_id: String,
    pub name: String,
    pub system_id: String,
    pub component_id: String,
    pub immediate_effect: String,
    pub cascade: Vec<String>,
    /// Strongest first.
    pub symptoms: Vec<ExpectedSymptom>,
}

impl Manifestation {
    pub fn render(&self) -> String {
        let mut out = format!(
            "{} ({})\nSystem: {} / component: {}\n",
            self.name, self.failure_id, self.system_id, self.component_id
        );
        if !self.immediate_effect.is_empty() {
            out.push_str(&format!("Immediate effect: {}\n", self.immediate_effect));
        }
        if !self.cascade.is_empty() {
            out.push_str("Cascade:\n");
            for (step, effect) in self.cascade.iter().enumerate() {
                out.push_str(&format!("  {}. {}\n", step + 1, effect));
            }
        }
        if self.symptoms.is_empty() {
            out.push_str("Expected symptoms: none recorded\n");
        } else {
            out.push_str("Expected symptoms:\n");
            for symptom in &self.symptoms {
                out.push_str(&format!(
                    "  - {} ({}: {:.0}%)\n",
                    symptom.name,
                    symptom.kind,
                    symptom.strength * 100.0
                ));
            }
        }
        out
    }
}

impl CausalGraph {
    pub fn manifestation(&self, failure_id: &str) -> TorqueResult<Manifestation> {
        let failure = self.failure(failure_id).ok_or_else(|| GraphError::UnknownFailure {
            id: failure_id.to_string(),
        })?;

        let symptoms = self
            .get_symptoms_for_failure(failure_id)
            .into_iter()
            .filter_map(|(id, strength)| {
                let node = self.symptom(&id)?;
                Some(ExpectedSymptom {
                    name: node.name.clone(),
                    kind: node.kind.label(),
                    symptom_id: id,
                    strength,
                })
            })
            .collect();

        Ok(Manifestation {
            failure_id: failure.id.clone(),
            name: failure.name.clone(),
            system_id: failure.system_id.clone(),
            component_id: failure.component_id.clone(),
            immediate_effect: failure.source.immediate_effect.clone(),
            cascade: failure.source.cascade_effects.clone(),
            symptoms,
        })
    }

    /// Rendered [`Manifestation`]: immediate effect, cascade, ranked symptoms.
    pub fn describe_failure_manifestation(&self, failure_id: &str) -> TorqueResult<String> {
        self.manifestation(failure_id).map(|m| m.render())
    }
}
