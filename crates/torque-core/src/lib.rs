//! # torque-core
//!
//! Foundation crate for the Torque diagnostic engine.
//! Defines config, errors, constants, and tracing setup.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing_setup;

// Re-export the most commonly used types at the crate root.
pub use config::TorqueConfig;
pub use errors::{TorqueError, TorqueResult};
