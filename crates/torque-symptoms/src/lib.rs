//! # torque-symptoms
//!
//! Turns raw inputs into canonical evidence tokens: free-text complaints via
//! keyword/phrase/negation rules, DTCs via a fixed table, and sensor readings
//! via per-sensor threshold bands.

pub mod evidence;
pub mod matcher;
pub mod patterns;

pub use evidence::{dtc_to_evidence, Evidence, EvidenceSource, SensorBands};
pub use matcher::{SymptomMatch, SymptomMatcher};
pub use patterns::SymptomPattern;
