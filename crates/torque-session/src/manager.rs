//! SessionManager: concurrent per-session access via DashMap.

use dashmap::DashMap;
use std::sync::Arc;

use torque_core::errors::{SessionError, TorqueResult};

use crate::engine::DiagnosticEngine;
use crate::report::DiagnosisResult;
use crate::session::DiagnosticSession;

/// Thread-safe registry of open sessions. Mutations of one session are
/// serialized by its map shard lock; distinct sessions proceed in parallel.
pub struct SessionManager {
    engine: Arc<DiagnosticEngine>,
    sessions: DashMap<String, DiagnosticSession>,
}

impl SessionManager {
    pub fn new(engine: Arc<DiagnosticEngine>) -> Self {
        Self {
            engine,
            sessions: DashMap::new(),
        }
    }

    pub fn engine(&self) -> &Arc<DiagnosticEngine> {
        &self.engine
    }

    /// Open a session and return its id.
    pub fn create_session(&self) -> TorqueResult<String> {
        let session = self.engine.new_session()?;
        let id = session.id().to_string();
        self.sessions.insert(id.clone(), session);
        Ok(id)
    }

    /// Diagnosis snapshot of a session.
    pub fn get_diagnosis(&self, session_id: &str) -> Option<DiagnosisResult> {
        self.sessions.get(session_id).map(|s| s.get_diagnosis())
    }

    /// Run `f` with exclusive access to one session.
    pub fn with_session<R>(
        &self,
        session_id: &str,
        f: impl FnOnce(&mut DiagnosticSession) -> TorqueResult<R>,
    ) -> TorqueResult<R> {
        let mut entry = self
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| SessionError::NotFound {
                session_id: session_id.to_string(),
            })?;
        f(entry.value_mut())
    }

    pub fn remove_session(&self, session_id: &str) -> Option<DiagnosticSession> {
        self.sessions.remove(session_id).map(|(_, v)| v)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn session_ids(&self) -> Vec<String> {
        self.sessions.iter().map(|r| r.key().clone()).collect()
    }
}
