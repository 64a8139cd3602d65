/// Causal graph errors.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("cannot build a causal graph with no failure modes")]
    EmptyKnowledgeBase,

    #[error("unknown failure id: {id}")]
    UnknownFailure { id: String },

    #[error("edge strength out of range for {failure_id} -> {symptom_id}: {strength}")]
    InvalidStrength {
        failure_id: String,
        symptom_id: String,
        strength: f64,
    },
}

impl GraphError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyKnowledgeBase => "GRAPH_EMPTY",
            Self::UnknownFailure { .. } => "GRAPH_UNKNOWN_FAILURE",
            Self::InvalidStrength { .. } => "GRAPH_INVALID_STRENGTH",
        }
    }
}
