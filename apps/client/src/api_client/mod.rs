//! API client for the recruitment backend.
//!
//! One method per endpoint, grouped by area in the submodules. Methods that
//! need authorization take the bearer token as their first argument and never
//! retry on their own; recovery from an expired token is the job of
//! [`crate::session::Authenticator::with_auth`].
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::ClientError;

pub mod auth;
pub mod chat;
pub mod jobs;
pub mod ranking;
pub mod resumes;

/// Header used to correlate a client request with backend logs.
const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    chat_url: String,
}

impl ApiClient {
    /// `chat_url` hosts the `/rasa/webhook` endpoint; it is usually the same
    /// server as `base_url`.
    pub fn new(base_url: &str, chat_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        Ok(Self {
            client: Client::builder()
                .timeout(timeout)
                .user_agent(concat!("hireflow/", env!("CARGO_PKG_VERSION")))
                .build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            chat_url: chat_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.url(path))
    }

    fn authed(&self, method: Method, path: &str, token: &str) -> RequestBuilder {
        self.request(method, path).bearer_auth(token)
    }

    /// Sends the request and decodes a JSON body.
    /// Non-2xx responses become `ClientError::Api` with the backend's detail.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let request_id = Uuid::new_v4();
        let response = request
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .send()
            .await?;

        let status = response.status();
        let url = response.url().path().to_string();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status.is_server_error() {
                warn!(%request_id, path = %url, status = status.as_u16(), "Backend error");
            } else {
                debug!(%request_id, path = %url, status = status.as_u16(), "Request rejected");
            }
            return Err(api_error(status.as_u16(), &body));
        }

        let body = response.text().await?;
        debug!(%request_id, path = %url, status = status.as_u16(), bytes = body.len(), "Request succeeded");

        // Some mutating endpoints answer with an empty body.
        let body = if body.trim().is_empty() { "{}" } else { body.as_str() };
        serde_json::from_str(body).map_err(ClientError::Parse)
    }
}

#[derive(Debug, Deserialize)]
struct ValidationIssue {
    msg: String,
    #[serde(default)]
    loc: Vec<Value>,
}

/// Builds an API error from a failed response body.
///
/// Understands FastAPI's `{"detail": "..."}` and `{"detail": [{"msg": ...}]}`
/// shapes, plus `{"error": {"message": ...}}` and `{"message": ...}`.
/// Falls back to the raw body, then to the status reason.
pub(crate) fn api_error(status: u16, body: &str) -> ClientError {
    ClientError::Api {
        status,
        message: extract_detail(body).unwrap_or_else(|| fallback_message(status, body)),
    }
}

fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    match value.get("detail") {
        Some(Value::String(s)) => return Some(s.clone()),
        Some(Value::Array(items)) => {
            let issues: Vec<String> = items
                .iter()
                .filter_map(|item| serde_json::from_value::<ValidationIssue>(item.clone()).ok())
                .map(|issue| match issue.loc.last().and_then(Value::as_str) {
                    Some(field) => format!("{field}: {}", issue.msg),
                    None => issue.msg,
                })
                .collect();
            if !issues.is_empty() {
                return Some(issues.join("; "));
            }
        }
        _ => {}
    }

    value
        .pointer("/error/message")
        .or_else(|| value.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn fallback_message(status: u16, body: &str) -> String {
    let body = body.trim();
    if !body.is_empty() && body.len() <= 200 {
        return body.to_string();
    }
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Request failed with status {status}"))
}
