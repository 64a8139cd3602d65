//! Backward reasoning: which failures explain the evidence.
//!
//! ```text
//! score = prior × (1 + Σ backward strength) × (1 + explained / max(1, |symptoms| + |dtcs|))
//! ```
//!
//! Candidates explaining nothing keep their prior. Scores are then
//! normalized to sum to 1. This is an explainable ranking, not a calibrated
//! posterior.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::graph::compiler::dtc_key;
use crate::graph::stable_graph::FailureNode;
use crate::graph::CausalGraph;

/// One ranked candidate from a backward query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureProbability {
    pub failure_id: String,
    pub name: String,
    /// Normalized score; all candidates of one query sum to 1.
    pub probability: f64,
    pub prior: f64,
    /// How many of the supplied symptoms and DTCs this failure explains.
    pub explained_evidence: usize,
    /// Sum of backward strengths over the explained evidence.
    pub evidence_strength: f64,
    /// `explained / max(1, supplied)`; 0 when nothing is explained.
    pub coverage: f64,
}

impl CausalGraph {
    /// Rank every failure reachable from the given symptom ids or DTCs.
    ///
    /// Returns an empty list when nothing is reachable; the caller supplies
    /// the fallback.
    pub fn get_failures_for_symptoms<S, D>(&self, symptom_ids: &[S], dtcs: &[D]) -> Vec<FailureProbability>
    where
        S: AsRef<str>,
        D: AsRef<str>,
    {
        let symptom_keys: Vec<Option<&str>> = symptom_ids
            .iter()
            .map(|s| self.resolve_symptom_id(s.as_ref()))
            .collect();
        let dtc_codes: Vec<String> = dtcs.iter().map(|d| dtc_key(d.as_ref())).collect();

        // BTreeMap keeps candidate order independent of hash iteration.
        let mut candidates: BTreeMap<&str, &FailureNode> = BTreeMap::new();
        for key in symptom_keys.iter().flatten() {
            for failure in self.producers_of(key) {
                candidates.insert(failure.id.as_str(), failure);
            }
        }
        for code in &dtc_codes {
            for failure in self.producers_of(code) {
                candidates.insert(failure.id.as_str(), failure);
            }
        }

        if candidates.is_empty() {
            tracing::debug!(
                symptoms = symptom_ids.len(),
                dtcs = dtcs.len(),
                "no failure reachable from evidence"
            );
            return Vec::new();
        }

        let supplied = (symptom_ids.len() + dtcs.len()).max(1) as f64;
        let dtc_strength = self.config.dtc_evidence_strength;

        let mut ranked: Vec<FailureProbability> = candidates
            .values()
            .map(|failure| {
                let mut explained = 0usize;
                let mut strength = 0.0;

                for key in symptom_keys.iter().flatten() {
                    if let Some(backward) = self.backward_strength(&failure.id, key) {
                        explained += 1;
                        strength += backward;
                    }
                }
                for code in &dtc_codes {
                    if failure.source.expects_dtc(code) {
                        explained += 1;
                        strength += dtc_strength;
                    }
                }

                let (score, coverage) = if explained > 0 {
                    let coverage = explained as f64 / supplied;
                    (failure.prior * (1.0 + strength) * (1.0 + coverage), coverage)
                } else {
                    (failure.prior, 0.0)
                };

                FailureProbability {
                    failure_id: failure.id.clone(),
                    name: failure.name.clone(),
                    probability: score,
                    prior: failure.prior,
                    explained_evidence: explained,
                    evidence_strength: strength,
                    coverage,
                }
            })
            .collect();

        let total: f64 = ranked.iter().map(|c| c.probability).sum();
        if total > 0.0 {
            for candidate in &mut ranked {
                candidate.probability /= total;
            }
        }

        ranked.sort_by(|a, b| {
            b.probability
                .total_cmp(&a.probability)
                .then_with(|| a.failure_id.cmp(&b.failure_id))
        });
        ranked
    }

    /// Failures expecting the DTC as `(failure id, prior)`, highest prior
    /// first, ties by id.
    pub fn get_failures_for_dtc(&self, code: &str) -> Vec<(String, f64)> {
        let mut failures: Vec<(String, f64)> = self
            .producers_of(&dtc_key(code))
            .into_iter()
            .map(|f| (f.id.clone(), f.prior))
            .collect();
        failures.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        failures
    }
}
