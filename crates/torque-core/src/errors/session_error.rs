/// Diagnostic session errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session {session_id} is concluded and accepts no further evidence")]
    Concluded { session_id: String },

    #[error("session not found: {session_id}")]
    NotFound { session_id: String },
}

impl SessionError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Concluded { .. } => "SESSION_CONCLUDED",
            Self::NotFound { .. } => "SESSION_NOT_FOUND",
        }
    }
}
