//! # torque-session
//!
//! Per-interaction diagnostic state: evidence accumulates, belief is
//! recomputed against the shared graph after every mutation, and a phase
//! tracks how far the diagnosis has come.

pub mod engine;
pub mod manager;
pub mod phase;
pub mod report;
pub mod session;

pub use engine::DiagnosticEngine;
pub use manager::SessionManager;
pub use phase::Phase;
pub use report::{DiagnosisReport, DiagnosisResult, PrimaryDiagnosis, TestRecommendation, TestSplit};
pub use session::DiagnosticSession;
