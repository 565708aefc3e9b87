//! In-memory registry of mounted sessions.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use playground_core::error::DomainError;
use uuid::Uuid;

use crate::domain::session::PlaygroundSession;

/// Shared handle to every mounted session, keyed by session id.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<Mutex<HashMap<Uuid, PlaygroundSession>>>,
}

impl SessionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a mounted session.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the id is already registered, or
    /// `DomainError::Infrastructure` if the registry lock is poisoned.
    pub fn insert(&self, session: PlaygroundSession) -> Result<(), DomainError> {
        let mut sessions = self.lock()?;
        if sessions.contains_key(&session.id) {
            return Err(DomainError::Validation(format!(
                "session {} is already mounted",
                session.id
            )));
        }
        sessions.insert(session.id, session);
        Ok(())
    }

    /// Runs `f` with exclusive access to one session.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SessionNotFound` if no session has `id`, whatever
    /// `f` returns, or `DomainError::Infrastructure` if the lock is poisoned.
    pub fn with_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut PlaygroundSession) -> Result<T, DomainError>,
    ) -> Result<T, DomainError> {
        let mut sessions = self.lock()?;
        let session = sessions
            .get_mut(&id)
            .ok_or(DomainError::SessionNotFound(id))?;
        f(session)
    }

    /// Removes a session and hands it back to the caller.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SessionNotFound` if no session has `id`.
    pub fn remove(&self, id: Uuid) -> Result<PlaygroundSession, DomainError> {
        self.lock()?
            .remove(&id)
            .ok_or(DomainError::SessionNotFound(id))
    }

    /// Number of mounted sessions.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the registry lock is poisoned.
    pub fn len(&self) -> Result<usize, DomainError> {
        Ok(self.lock()?.len())
    }

    /// Returns `true` if no session is mounted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the registry lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, DomainError> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Uuid, PlaygroundSession>>, DomainError> {
        self.sessions
            .lock()
            .map_err(|_| DomainError::Infrastructure("session registry lock poisoned".into()))
    }
}
