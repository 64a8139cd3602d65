//! DiagnosticSession: evidence accumulation and belief over a shared graph.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use torque_causal::{CausalGraph, FailureProbability};
use torque_core::config::SessionConfig;
use torque_core::errors::{SessionError, TorqueResult};
use torque_symptoms::evidence::normalize_dtc;
use torque_symptoms::{dtc_to_evidence, Evidence, EvidenceSource, SensorBands, SymptomMatcher};

use crate::phase::Phase;
use crate::report::{information_gain_bits, DiagnosisResult, PrimaryDiagnosis, TestRecommendation, TestSplit};

/// One user interaction's worth of evidence and belief.
///
/// The graph is held by `Arc` and only ever read. Every mutation recomputes
/// the belief over the full accumulated evidence.
#[derive(Debug)]
pub struct DiagnosticSession {
    id: String,
    graph: Arc<CausalGraph>,
    matcher: Arc<SymptomMatcher>,
    sensors: Arc<SensorBands>,
    config: SessionConfig,
    evidence: Vec<Evidence>,
    symptom_tokens: Vec<String>,
    dtcs: Vec<String>,
    belief: Vec<FailureProbability>,
    phase: Phase,
    frozen: Option<DiagnosisResult>,
    created_at: DateTime<Utc>,
    last_activity: DateTime<Utc>,
}

impl DiagnosticSession {
    /// Session with the built-in matcher, default sensor bands and config.
    pub fn new(graph: Arc<CausalGraph>) -> Self {
        Self::with_components(
            graph,
            Arc::new(SymptomMatcher::new()),
            Arc::new(SensorBands::default()),
            SessionConfig::default(),
        )
    }

    pub fn with_components(
        graph: Arc<CausalGraph>,
        matcher: Arc<SymptomMatcher>,
        sensors: Arc<SensorBands>,
        config: SessionConfig,
    ) -> Self {
        let now = Utc::now();
        let id = uuid::Uuid::new_v4().to_string();
        tracing::debug!(session_id = %id, "session created");
        Self {
            id,
            graph,
            matcher,
            sensors,
            config,
            evidence: Vec::new(),
            symptom_tokens: Vec::new(),
            dtcs: Vec::new(),
            belief: Vec::new(),
            phase: Phase::Initial,
            frozen: None,
            created_at: now,
            last_activity: now,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_activity
    }

    pub fn graph(&self) -> &Arc<CausalGraph> {
        &self.graph
    }

    /// Accumulated evidence in arrival order.
    pub fn evidence(&self) -> &[Evidence] {
        &self.evidence
    }

    /// Normalize free text to a canonical symptom and add it.
    ///
    /// Returns the tokens newly recorded; blank text and repeats record nothing.
    pub fn add_symptom(&mut self, text: &str) -> TorqueResult<Vec<String>> {
        self.ensure_open()?;
        let Some((token, confidence)) = self.matcher.normalize_with_confidence(text) else {
            return Ok(Vec::new());
        };
        let source = EvidenceSource::Text {
            original: text.trim().to_string(),
            confidence,
        };
        let added = self.record_symptom(token, source);
        self.commit(added)
    }

    /// Add a trouble code. Codes with a fixed evidence mapping also add
    /// their symptom token. Malformed codes are ignored.
    pub fn add_dtc(&mut self, code: &str) -> TorqueResult<Vec<String>> {
        self.ensure_open()?;
        let Some(code) = normalize_dtc(code) else {
            tracing::warn!(session_id = %self.id, code = %code, "ignoring malformed DTC");
            return Ok(Vec::new());
        };
        let mut added = Vec::new();
        if !self.dtcs.contains(&code) {
            self.dtcs.push(code.clone());
            self.evidence.push(Evidence::new(
                code.clone(),
                EvidenceSource::Dtc { code: code.clone() },
            ));
            added.push(code.clone());
        }
        if let Some(token) = dtc_to_evidence(&code) {
            added.extend(self.record_symptom(
                token.to_string(),
                EvidenceSource::Dtc { code: code.clone() },
            ));
        }
        self.commit(added)
    }

    /// Convert a reading through the sensor bands; in-band readings and
    /// unknown sensors add nothing.
    pub fn add_sensor_reading(&mut self, name: &str, value: f64, unit: &str) -> TorqueResult<Vec<String>> {
        self.ensure_open()?;
        let Some(token) = self.sensors.evaluate(name, value, unit) else {
            tracing::debug!(session_id = %self.id, sensor = %name, value, "reading produced no evidence");
            return Ok(Vec::new());
        };
        let source = EvidenceSource::Sensor {
            name: name.trim().to_string(),
            value,
            unit: unit.trim().to_string(),
        };
        let added = self.record_symptom(token, source);
        self.commit(added)
    }

    /// The `n` most probable candidates from the cached belief.
    pub fn get_top_suspects(&self, n: usize) -> &[FailureProbability] {
        &self.belief[..n.min(self.belief.len())]
    }

    /// Test that best splits the current top candidates.
    pub fn recommend_test(&self) -> Option<TestRecommendation> {
        let candidates: Vec<&str> = self
            .get_top_suspects(self.config.top_n)
            .iter()
            .map(|c| c.failure_id.as_str())
            .collect();
        let test = self.graph.get_discriminating_test(&candidates)?;
        let gain = information_gain_bits(test.candidate_count(), test.split_score);
        let description = format!(
            "{}: a positive result points to {}; a negative result points to {}",
            test.test,
            test.suggesting.join(", "),
            test.not_suggesting.join(", ")
        );
        tracing::debug!(session_id = %self.id, test = %test.test, gain_bits = gain, "test recommended");
        Some(TestRecommendation {
            test: test.test,
            information_gain_bits: gain,
            description,
            splits: TestSplit {
                suggesting: test.suggesting,
                not_suggesting: test.not_suggesting,
            },
        })
    }

    /// Current diagnosis. Falls back to the highest-prior failure in the
    /// graph when no evidence reaches any candidate.
    pub fn get_diagnosis(&self) -> DiagnosisResult {
        if let Some(frozen) = &self.frozen {
            return frozen.clone();
        }

        let (primary, alternatives, repair_actions) = match self.belief.split_first() {
            Some((top, _)) => {
                let repairs = self
                    .graph
                    .failure(&top.failure_id)
                    .map(|f| f.source.repair_actions.clone())
                    .unwrap_or_default();
                let alternatives = self
                    .get_top_suspects(self.config.top_n)
                    .iter()
                    .skip(1)
                    .cloned()
                    .collect();
                (
                    PrimaryDiagnosis {
                        failure_id: top.failure_id.clone(),
                        name: top.name.clone(),
                        confidence: top.probability,
                    },
                    alternatives,
                    repairs,
                )
            }
            None => {
                let fallback = self.graph.highest_prior_failure();
                (
                    PrimaryDiagnosis {
                        failure_id: fallback.id.clone(),
                        name: fallback.name.clone(),
                        // Priors are unbounded above; confidence is not.
                        confidence: fallback.prior.clamp(0.0, 1.0),
                    },
                    Vec::new(),
                    fallback.source.repair_actions.clone(),
                )
            }
        };

        DiagnosisResult {
            session_id: self.id.clone(),
            primary,
            alternatives,
            evidence: self.evidence.clone(),
            repair_actions,
            phase: self.phase,
            generated_at: Utc::now(),
        }
    }

    /// Close the session and freeze its diagnosis. Repeated calls return the
    /// frozen result.
    pub fn conclude(&mut self) -> DiagnosisResult {
        if let Some(frozen) = &self.frozen {
            return frozen.clone();
        }
        self.phase = Phase::Concluded;
        self.last_activity = Utc::now();
        let result = self.get_diagnosis();
        tracing::info!(
            session_id = %self.id,
            primary = %result.primary.failure_id,
            confidence = result.primary.confidence,
            evidence = self.evidence.len(),
            "session concluded"
        );
        self.frozen = Some(result.clone());
        result
    }

    fn ensure_open(&self) -> TorqueResult<()> {
        if self.phase.is_terminal() {
            return Err(SessionError::Concluded {
                session_id: self.id.clone(),
            }
            .into());
        }
        Ok(())
    }

    fn record_symptom(&mut self, token: String, source: EvidenceSource) -> Option<String> {
        if self.symptom_tokens.contains(&token) {
            return None;
        }
        self.symptom_tokens.push(token.clone());
        self.evidence.push(Evidence::new(token.clone(), source));
        Some(token)
    }

    fn commit<I: IntoIterator<Item = String>>(&mut self, added: I) -> TorqueResult<Vec<String>> {
        let added: Vec<String> = added.into_iter().collect();
        if !added.is_empty() {
            self.last_activity = Utc::now();
            self.recompute();
        }
        Ok(added)
    }

    fn recompute(&mut self) {
        self.belief = self
            .graph
            .get_failures_for_symptoms(&self.symptom_tokens, &self.dtcs);

        let top = self.belief.first();
        let phase = if self.evidence.is_empty() {
            Phase::Initial
        } else if top.is_some_and(|t| t.probability >= self.config.confident_threshold) {
            Phase::Confident
        } else {
            Phase::Investigating
        };

        tracing::debug!(
            session_id = %self.id,
            symptoms = self.symptom_tokens.len(),
            dtcs = self.dtcs.len(),
            candidates = self.belief.len(),
            top = top.map(|t| t.failure_id.as_str()).unwrap_or("-"),
            top_probability = top.map(|t| t.probability).unwrap_or(0.0),
            phase = %phase,
            "belief recomputed"
        );

        if phase != self.phase {
            tracing::info!(session_id = %self.id, from = %self.phase, to = %phase, "phase changed");
            self.phase = phase;
        }
    }
}
