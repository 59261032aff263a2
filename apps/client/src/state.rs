use std::sync::Arc;

use crate::api_client::ApiClient;
use crate::config::Config;
use crate::errors::ClientError;
use crate::session::{Authenticator, HttpRefresher, SessionStore};

/// Shared client state handed to every command handler.
#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub auth: Arc<Authenticator>,
    pub config: Config,
}

impl AppState {
    /// Builds the HTTP client, opens the persisted session and wires the
    /// refresh path between them.
    pub fn build(config: Config) -> Result<Self, ClientError> {
        let api = ApiClient::new(&config.api_url, &config.chat_url, config.http_timeout)?;
        let store = SessionStore::open(config.session_path())?;
        Ok(Self::with_store(api, store, config))
    }

    pub fn with_store(api: ApiClient, store: SessionStore, config: Config) -> Self {
        let refresher = Arc::new(HttpRefresher::new(api.clone()));
        Self {
            auth: Arc::new(Authenticator::new(store, refresher)),
            api,
            config,
        }
    }

    pub fn session(&self) -> &SessionStore {
        self.auth.store()
    }
}
