//! Error handling for Torque.
//! One error enum per subsystem, aggregated into `TorqueError`.

pub mod graph_error;
pub mod knowledge_error;
pub mod session_error;

pub use graph_error::GraphError;
pub use knowledge_error::KnowledgeError;
pub use session_error::SessionError;

/// Top-level error aggregating all subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum TorqueError {
    #[error("knowledge error: {0}")]
    Knowledge(#[from] KnowledgeError),

    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("session error: {0}")]
    Session(#[from] SessionError),

    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    #[error("concurrency error: {0}")]
    ConcurrencyError(String),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl TorqueError {
    /// Stable machine-readable code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Knowledge(e) => e.error_code(),
            Self::Graph(e) => e.error_code(),
            Self::Session(e) => e.error_code(),
            Self::ConfigError { .. } => "CONFIG_INVALID",
            Self::ConcurrencyError(_) => "CONCURRENCY",
            Self::SerializationError(_) => "SERIALIZATION",
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type TorqueResult<T> = Result<T, TorqueError>;
