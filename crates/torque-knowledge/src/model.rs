//! Authored knowledge records: systems, components, and failure modes.

use serde::{Deserialize, Serialize};

/// A vehicle system (cooling, charging, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemDef {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl SystemDef {
    pub fn new(id: &str, name: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
        }
    }
}

/// A replaceable component owned by exactly one system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDef {
    pub id: String,
    pub name: String,
    pub system_id: String,
}

impl ComponentDef {
    pub fn new(id: &str, name: &str, system_id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            system_id: system_id.to_string(),
        }
    }
}

/// How visible a symptom is to the driver or technician.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Subtle,
    Moderate,
    Obvious,
    Severe,
}

impl Severity {
    pub const ALL: [Severity; 4] = [Self::Subtle, Self::Moderate, Self::Obvious, Self::Severe];

    /// Forward causal strength (failure → symptom) implied by this severity.
    pub fn forward_strength(&self) -> f64 {
        match self {
            Self::Subtle => 0.5,
            Self::Moderate => 0.7,
            Self::Obvious => 0.85,
            Self::Severe => 0.95,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Subtle => "subtle",
            Self::Moderate => "moderate",
            Self::Obvious => "obvious",
            Self::Severe => "severe",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction a PID deviates from its normal range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PidEffectKind {
    High,
    Low,
    Erratic,
    StuckHigh,
    StuckLow,
}

impl PidEffectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Low => "low",
            Self::Erratic => "erratic",
            Self::StuckHigh => "stuck_high",
            Self::StuckLow => "stuck_low",
        }
    }
}

impl std::fmt::Display for PidEffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Effect a failure has on a live sensor channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PidEffect {
    /// PID name, e.g. `coolant_temp`.
    pub pid: String,
    pub effect: PidEffectKind,
    pub description: String,
    /// Typical reading while the failure is present, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typical_value: Option<String>,
}

impl PidEffect {
    pub fn new(pid: &str, effect: PidEffectKind, description: &str) -> Self {
        Self {
            pid: pid.to_string(),
            effect,
            description: description.to_string(),
            typical_value: None,
        }
    }

    pub fn with_typical(mut self, typical_value: &str) -> Self {
        self.typical_value = Some(typical_value.to_string());
        self
    }
}

/// An observable symptom as authored on a failure mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symptom {
    pub description: String,
    pub severity: Severity,
}

impl Symptom {
    pub fn new(description: &str, severity: Severity) -> Self {
        Self {
            description: description.to_string(),
            severity,
        }
    }
}

/// One way a component can fail, with everything it is expected to produce.
///
/// `id` is globally unique and stable; it keys the causal graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureMode {
    pub id: String,
    pub name: String,
    pub system_id: String,
    pub component_id: String,
    pub immediate_effect: String,
    /// Downstream consequences, in the order they develop.
    #[serde(default)]
    pub cascade_effects: Vec<String>,
    #[serde(default)]
    pub expected_dtcs: Vec<String>,
    #[serde(default)]
    pub pid_effects: Vec<PidEffect>,
    #[serde(default)]
    pub symptoms: Vec<Symptom>,
    #[serde(default)]
    pub discriminating_tests: Vec<String>,
    #[serde(default)]
    pub repair_actions: Vec<String>,
    /// Relative field frequency; seeds the prior probability.
    pub relative_frequency: f64,
}

impl FailureMode {
    /// Start authoring a failure mode. Remaining fields are filled with the
    /// chained setters below.
    pub fn new(id: &str, name: &str, system_id: &str, component_id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            system_id: system_id.to_string(),
            component_id: component_id.to_string(),
            immediate_effect: String::new(),
            cascade_effects: Vec::new(),
            expected_dtcs: Vec::new(),
            pid_effects: Vec::new(),
            symptoms: Vec::new(),
            discriminating_tests: Vec::new(),
            repair_actions: Vec::new(),
            relative_frequency: 0.0,
        }
    }

    pub fn immediate(mut self, effect: &str) -> Self {
        self.immediate_effect = effect.to_string();
        self
    }

    pub fn cascade(mut self, effects: &[&str]) -> Self {
        self.cascade_effects.extend(effects.iter().map(|e| e.to_string()));
        self
    }

    pub fn dtcs(mut self, codes: &[&str]) -> Self {
        self.expected_dtcs
            .extend(codes.iter().map(|c| c.trim().to_ascii_uppercase()));
        self
    }

    pub fn pid(mut self, effect: PidEffect) -> Self {
        self.pid_effects.push(effect);
        self
    }

    pub fn symptom(mut self, description: &str, severity: Severity) -> Self {
        self.symptoms.push(Symptom::new(description, severity));
        self
    }

    pub fn tests(mut self, tests: &[&str]) -> Self {
        self.discriminating_tests
            .extend(tests.iter().map(|t| t.to_string()));
        self
    }

    pub fn repairs(mut self, actions: &[&str]) -> Self {
        self.repair_actions.extend(actions.iter().map(|a| a.to_string()));
        self
    }

    pub fn frequency(mut self, relative_frequency: f64) -> Self {
        self.relative_frequency = relative_frequency;
        self
    }

    /// Whether `code` is one of this failure's expected DTCs (case-insensitive).
    pub fn expects_dtc(&self, code: &str) -> bool {
        let code = code.trim();
        self.expected_dtcs
            .iter()
            .any(|c| c.eq_ignore_ascii_case(code))
    }
}
