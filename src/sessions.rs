use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use uuid::Uuid;

use crate::cognition::{
    AdaptedResponse, BiometricSample, CognitiveEngine, CognitiveLoadMetrics, CognitiveState,
    EngineConfig, SessionSnapshot, TutorResponse,
};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SessionError {
    #[error("unknown session: {0}")]
    UnknownSession(String),
}

/// One engine per learning session. The map lock is held only to look up
/// or insert a session; each engine has its own lock so sessions never
/// contend with each other.
pub struct SessionRegistry {
    config: EngineConfig,
    sessions: RwLock<HashMap<String, Arc<Mutex<CognitiveEngine>>>>,
}

impl SessionRegistry {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn open_session(&self) -> String {
        let id = Uuid::new_v4().to_string();
        let engine = CognitiveEngine::new(self.config.clone());
        self.sessions
            .write()
            .insert(id.clone(), Arc::new(Mutex::new(engine)));
        tracing::info!(session_id = %id, "cognitive session opened");
        id
    }

    pub fn close_session(&self, session_id: &str) -> Result<SessionSnapshot, SessionError> {
        let engine = self
            .sessions
            .write()
            .remove(session_id)
            .ok_or_else(|| SessionError::UnknownSession(session_id.to_string()))?;
        let snapshot = engine.lock().snapshot();
        tracing::info!(
            session_id,
            samples_seen = snapshot.samples_seen,
            "cognitive session closed"
        );
        Ok(snapshot)
    }

    fn engine(&self, session_id: &str) -> Result<Arc<Mutex<CognitiveEngine>>, SessionError> {
        self.sessions
            .read()
            .get(session_id)
            .cloned()
            .ok_or_else(|| SessionError::UnknownSession(session_id.to_string()))
    }

    pub fn analyze(
        &self,
        session_id: &str,
        sample: BiometricSample,
    ) -> Result<CognitiveState, SessionError> {
        let engine = self.engine(session_id)?;
        let state = engine.lock().analyze(sample);
        Ok(state)
    }

    pub fn tick(&self, session_id: &str, now: i64) -> Result<CognitiveLoadMetrics, SessionError> {
        let engine = self.engine(session_id)?;
        let metrics = engine.lock().tick(now);
        Ok(metrics)
    }

    pub fn metrics(&self, session_id: &str) -> Result<CognitiveLoadMetrics, SessionError> {
        Ok(self.engine(session_id)?.lock().metrics())
    }

    pub fn snapshot(&self, session_id: &str) -> Result<SessionSnapshot, SessionError> {
        Ok(self.engine(session_id)?.lock().snapshot())
    }

    pub fn adapt(
        &self,
        session_id: &str,
        base: TutorResponse,
    ) -> Result<AdaptedResponse, SessionError> {
        Ok(self.engine(session_id)?.lock().adapt(base))
    }

    pub fn reset(&self, session_id: &str) -> Result<(), SessionError> {
        self.engine(session_id)?.lock().reset();
        Ok(())
    }

    pub fn session_count(&self) -> usize {
        self.sessions.read().len()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sessions_are_isolated() {
        let registry = SessionRegistry::default();
        let a = registry.open_session();
        let b = registry.open_session();
        assert_ne!(a, b);

        let stressed = BiometricSample {
            heart_rate: Some(130.0),
            pupil_dilation: Some(1.0),
            ..BiometricSample::at(1)
        };
        registry.analyze(&a, stressed).unwrap();

        assert_eq!(registry.snapshot(&a).unwrap().history_len, 1);
        assert_eq!(registry.snapshot(&b).unwrap().history_len, 0);
    }

    #[test]
    fn unknown_session_is_an_error() {
        let registry = SessionRegistry::default();
        assert_eq!(
            registry.metrics("missing"),
            Err(SessionError::UnknownSession("missing".into()))
        );
    }

    #[test]
    fn close_removes_session() {
        let registry = SessionRegistry::default();
        let id = registry.open_session();
        assert_eq!(registry.session_count(), 1);
        let snapshot = registry.close_session(&id).unwrap();
        assert_eq!(snapshot.samples_seen, 0);
        assert_eq!(registry.session_count(), 0);
        assert!(registry.reset(&id).is_err());
    }
}
