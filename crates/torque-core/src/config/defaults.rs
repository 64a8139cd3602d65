//! Compiled default values for every config section.

// Graph
pub const DEFAULT_PRIOR_SCALE: f64 = 0.2;
pub const DEFAULT_DTC_FORWARD: f64 = 0.9;
pub const DEFAULT_DTC_BACKWARD: f64 = 0.7;
pub const DEFAULT_PID_FORWARD: f64 = 0.8;
pub const DEFAULT_PID_BACKWARD: f64 = 0.5;
pub const DEFAULT_OBSERVATION_BACKWARD: f64 = 0.4;
pub const DEFAULT_DTC_EVIDENCE_STRENGTH: f64 = 0.8;
pub const DEFAULT_OBSERVATION_KEY_LEN: usize = 40;

// Matcher
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.3;
pub const DEFAULT_PHRASE_BONUS: f64 = 0.6;
pub const DEFAULT_KEYWORD_WEIGHT: f64 = 0.2;
pub const DEFAULT_KEYWORD_CAP: f64 = 0.5;

// Session
pub const DEFAULT_CONFIDENT_THRESHOLD: f64 = 0.6;
pub const DEFAULT_TOP_N: usize = 5;

// Sensors
pub const DEFAULT_COOLANT_HIGH_C: f64 = 105.0;
pub const DEFAULT_COOLANT_LOW_C: f64 = 70.0;
pub const DEFAULT_OIL_PRESSURE_HIGH_PSI: f64 = 80.0;
pub const DEFAULT_OIL_PRESSURE_LOW_PSI: f64 = 20.0;
pub const DEFAULT_VOLTAGE_HIGH_V: f64 = 15.0;
pub const DEFAULT_VOLTAGE_LOW_V: f64 = 12.0;

// Observability
pub const DEFAULT_LOG_LEVEL: &str = "info";
