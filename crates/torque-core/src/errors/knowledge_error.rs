/// Knowledge registry errors. All of these are raised at load time.
#[derive(Debug, thiserror::Error)]
pub enum KnowledgeError {
    #[error("duplicate failure mode id: {id}")]
    DuplicateFailure { id: String },

    #[error("duplicate system id: {id}")]
    DuplicateSystem { id: String },

    #[error("duplicate component id: {id}")]
    DuplicateComponent { id: String },

    #[error("{owner} references unknown system: {system_id}")]
    UnknownSystem { owner: String, system_id: String },

    #[error("{owner} references unknown component: {component_id}")]
    UnknownComponent { owner: String, component_id: String },

    #[error("component {component_id} belongs to {actual}, not {expected} (failure {failure_id})")]
    ComponentSystemMismatch {
        failure_id: String,
        component_id: String,
        expected: String,
        actual: String,
    },

    #[error("invalid relative frequency for {id}: {value}")]
    InvalidFrequency { id: String, value: f64 },
}

impl KnowledgeError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateFailure { .. } => "KB_DUPLICATE_FAILURE",
            Self::DuplicateSystem { .. } => "KB_DUPLICATE_SYSTEM",
            Self::DuplicateComponent { .. } => "KB_DUPLICATE_COMPONENT",
            Self::UnknownSystem { .. } => "KB_UNKNOWN_SYSTEM",
            Self::UnknownComponent { .. } => "KB_UNKNOWN_COMPONENT",
            Self::ComponentSystemMismatch { .. } => "KB_COMPONENT_MISMATCH",
            Self::InvalidFrequency { .. } => "KB_INVALID_FREQUENCY",
        }
    }
}
