use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info};

use crate::errors::ClientError;
use crate::models::session::Session;
use crate::storage::{read_json, remove_if_exists, write_json_atomic};

/// Token store: the single owner of the signed-in session.
///
/// Cheap to clone; clones share state. Every mutation is written through to
/// the backing file (when there is one) while the write lock is held, so the
/// file always matches the last writer.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

struct Inner {
    path: Option<PathBuf>,
    session: RwLock<Option<Session>>,
}

impl SessionStore {
    /// Opens the store backed by `path`, loading a previous session if present.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ClientError> {
        let path = path.into();
        let session: Option<Session> = read_json(&path)?;
        debug!(path = %path.display(), loaded = session.is_some(), "Session store opened");
        Ok(Self {
            inner: Arc::new(Inner {
                path: Some(path),
                session: RwLock::new(session),
            }),
        })
    }

    /// A store that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(Inner {
                path: None,
                session: RwLock::new(None),
            }),
        }
    }

    pub fn current(&self) -> Option<Session> {
        self.read().clone()
    }

    /// The current session, or `NotAuthenticated` when nobody is signed in.
    pub fn require(&self) -> Result<Session, ClientError> {
        self.current().ok_or(ClientError::NotAuthenticated)
    }

    pub fn access_token(&self) -> Option<String> {
        self.read()
            .as_ref()
            .map(|s| s.access_token.clone())
            .filter(|t| !t.is_empty())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read()
            .as_ref()
            .and_then(|s| s.refresh_token.clone())
            .filter(|t| !t.is_empty())
    }

    /// Replaces whatever session was stored with a fresh one.
    pub fn begin(&self, session: Session) -> Result<(), ClientError> {
        let mut guard = self.write();
        self.persist(Some(&session))?;
        info!(user_id = %session.user_id, role = %session.role, "Session started");
        *guard = Some(session);
        Ok(())
    }

    /// Writes renewed tokens into the current session. The refresh token is
    /// only replaced when the backend rotated it. Returns `false` when there is
    /// no session to update (it was cleared in the meantime).
    pub fn update_tokens(
        &self,
        access_token: String,
        refresh_token: Option<String>,
    ) -> Result<bool, ClientError> {
        let mut guard = self.write();
        let Some(current) = guard.as_ref() else {
            return Ok(false);
        };
        let mut updated = current.clone();
        updated.access_token = access_token;
        if let Some(rt) = refresh_token.filter(|t| !t.is_empty()) {
            updated.refresh_token = Some(rt);
        }
        self.persist(Some(&updated))?;
        *guard = Some(updated);
        debug!("Session tokens updated");
        Ok(true)
    }

    pub fn set_name(&self, name: &str) -> Result<(), ClientError> {
        let mut guard = self.write();
        let Some(current) = guard.as_ref() else {
            return Err(ClientError::NotAuthenticated);
        };
        let mut updated = current.clone();
        updated.name = Some(name.to_string());
        self.persist(Some(&updated))?;
        *guard = Some(updated);
        Ok(())
    }

    /// Drops every session field and deletes the backing file.
    pub fn clear(&self) -> Result<(), ClientError> {
        let mut guard = self.write();
        *guard = None;
        self.persist(None)?;
        info!("Session cleared");
        Ok(())
    }

    fn persist(&self, session: Option<&Session>) -> Result<(), ClientError> {
        let Some(path) = self.inner.path.as_deref() else {
            return Ok(());
        };
        match session {
            Some(s) => write_json_atomic(path, s)?,
            None => remove_if_exists(path)?,
        }
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<Session>> {
        self.inner
            .session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Session>> {
        self.inner
            .session
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
