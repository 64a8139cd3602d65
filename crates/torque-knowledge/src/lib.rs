//! # torque-knowledge
//!
//! Static, read-only failure-mode knowledge. Records are authored once,
//! validated by [`KnowledgeBaseBuilder`], and frozen into a [`KnowledgeBase`]
//! that answers lookups by id, system, component, DTC, and symptom text.

pub mod catalog;
pub mod model;
pub mod registry;

pub use model::{ComponentDef, FailureMode, PidEffect, PidEffectKind, Severity, Symptom, SystemDef};
pub use registry::{KnowledgeBase, KnowledgeBaseBuilder};
