use async_trait::async_trait;
use tracing::{debug, warn};

use super::store::SessionStore;
use crate::api_client::ApiClient;

/// Exchanges the stored refresh token for new credentials.
///
/// Implementations never fail: any problem is reported as `false` so the
/// caller can apply one fallback path. On `true` the store already holds the
/// new access token.
#[async_trait]
pub trait TokenRefresher: Send + Sync {
    async fn refresh(&self, store: &SessionStore) -> bool;
}

/// Refresher backed by `POST /refresh`.
pub struct HttpRefresher {
    api: ApiClient,
}

impl HttpRefresher {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl TokenRefresher for HttpRefresher {
    async fn refresh(&self, store: &SessionStore) -> bool {
        let Some(refresh_token) = store.refresh_token() else {
            debug!("No refresh token stored, skipping refresh");
            return false;
        };

        let response = match self.api.refresh(&refresh_token).await {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "Token refresh failed");
                return false;
            }
        };

        let Some(access_token) = response.access_token.filter(|t| !t.is_empty()) else {
            warn!("Refresh response carried no access token");
            return false;
        };

        match store.update_tokens(access_token, response.refresh_token) {
            Ok(updated) => {
                if updated {
                    debug!("Access token refreshed");
                }
                updated
            }
            Err(e) => {
                warn!(error = %e, "Could not store refreshed tokens");
                false
            }
        }
    }
}
