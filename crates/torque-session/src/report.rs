//! Diagnosis snapshots and their serializable report form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use torque_causal::FailureProbability;
use torque_core::TorqueResult;
use torque_symptoms::Evidence;

use crate::phase::Phase;

/// The leading hypothesis of a diagnosis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryDiagnosis {
    pub failure_id: String,
    pub name: String,
    /// Normalized probability, or the prior (capped at 1) when no evidence matched.
    pub confidence: f64,
}

/// Point-in-time view of a session. Never mutates the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisResult {
    pub session_id: String,
    pub primary: PrimaryDiagnosis,
    /// Remaining leading candidates, best first.
    pub alternatives: Vec<FailureProbability>,
    pub evidence: Vec<Evidence>,
    pub repair_actions: Vec<String>,
    pub phase: Phase,
    pub generated_at: DateTime<Utc>,
}

/// `diagnosis` group of a [`DiagnosisReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDiagnosis {
    pub failure: String,
    pub failure_name: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportAlternative {
    pub failure: String,
    pub failure_name: String,
    pub probability: f64,
}

/// Flat, caller-facing report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisReport {
    pub diagnosis: ReportDiagnosis,
    pub alternatives: Vec<ReportAlternative>,
    pub repair_actions: Vec<String>,
    pub evidence: Vec<Evidence>,
    pub phase: Phase,
}

impl DiagnosisResult {
    pub fn to_report(&self) -> DiagnosisReport {
        DiagnosisReport {
            diagnosis: ReportDiagnosis {
                failure: self.primary.failure_id.clone(),
                failure_name: self.primary.name.clone(),
                confidence: self.primary.confidence,
            },
            alternatives: self
                .alternatives
                .iter()
                .map(|a| ReportAlternative {
                    failure: a.failure_id.clone(),
                    failure_name: a.name.clone(),
                    probability: a.probability,
                })
                .collect(),
            repair_actions: self.repair_actions.clone(),
            evidence: self.evidence.clone(),
            phase: self.phase,
        }
    }

    /// Pretty-printed JSON of [`to_report`](Self::to_report).
    pub fn to_json(&self) -> TorqueResult<String> {
        Ok(serde_json::to_string_pretty(&self.to_report())?)
    }
}

/// Which candidates a recommended test points toward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestSplit {
    pub suggesting: Vec<String>,
    pub not_suggesting: Vec<String>,
}

/// The next test worth running, with its expected value in bits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRecommendation {
    pub test: String,
    pub information_gain_bits: f64,
    pub description: String,
    pub splits: TestSplit,
}

/// `log2(k) × min(1, 2·split/k)`: a perfectly even split earns the full
/// `log2(k)`, skewed splits proportionally less.
pub fn information_gain_bits(candidates: usize, split_score: usize) -> f64 {
    if candidates < 2 || split_score == 0 {
        return 0.0;
    }
    let k = candidates as f64;
    let balance = (2.0 * split_score as f64 / k).min(1.0);
    k.log2() * balance
}
