/// Torque engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable consulted for the tracing filter.
pub const LOG_ENV_VAR: &str = "TORQUE_LOG";

/// Tolerance used when checking that a belief distribution sums to one.
pub const PROBABILITY_EPSILON: f64 = 1e-6;
