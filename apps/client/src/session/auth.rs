use std::future::Future;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::refresh::TokenRefresher;
use super::store::SessionStore;
use crate::errors::ClientError;

/// Runs API calls with the stored access token and renews it once on 401.
///
/// Concurrent callers that hit 401 together share one refresh: the gate
/// serializes them, and a caller that finds the token already replaced by a
/// peer retries without calling the refresh endpoint again.
pub struct Authenticator {
    store: SessionStore,
    refresher: Arc<dyn TokenRefresher>,
    refresh_gate: Mutex<()>,
}

impl Authenticator {
    pub fn new(store: SessionStore, refresher: Arc<dyn TokenRefresher>) -> Self {
        Self {
            store,
            refresher,
            refresh_gate: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Invokes `op` with the current access token.
    ///
    /// - success or any non-401 failure is returned as is;
    /// - on 401 the token is refreshed and `op` runs exactly once more, its
    ///   outcome returned unchanged;
    /// - if the refresh fails the session is cleared and
    ///   `ClientError::SessionExpired` is returned.
    ///
    /// `op` may run twice, so non-idempotent calls can be repeated.
    pub async fn with_auth<T, F, Fut>(&self, op: F) -> Result<T, ClientError>
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        let token = self
            .store
            .access_token()
            .ok_or(ClientError::NotAuthenticated)?;

        let rejection = match op(token.clone()).await {
            Err(e) if e.is_unauthorized() => e,
            other => return other,
        };

        debug!("Access token rejected, attempting refresh");
        if !self.renew(&token).await {
            warn!("Session could not be renewed, clearing stored credentials");
            if let Err(e) = self.store.clear() {
                warn!(error = %e, "Failed to clear session store");
            }
            return Err(ClientError::SessionExpired(rejection.to_string()));
        }

        let token = self
            .store
            .access_token()
            .ok_or(ClientError::NotAuthenticated)?;
        op(token).await
    }

    /// Returns `true` when the store now holds a token other than `rejected`.
    async fn renew(&self, rejected: &str) -> bool {
        let _gate = self.refresh_gate.lock().await;
        match self.store.access_token() {
            Some(current) if current != rejected => {
                debug!("Token already renewed by a concurrent call");
                true
            }
            _ => self.refresher.refresh(&self.store).await,
        }
    }
}
