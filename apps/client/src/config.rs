use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration loaded from environment variables (and `.env`).
/// Nothing is required; every value has a development default.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    /// Host of the chat webhook. Defaults to `api_url`.
    pub chat_url: String,
    /// Directory holding `session.json` and chat transcripts.
    pub state_dir: PathBuf,
    pub http_timeout: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let api_url = env_or("API_URL", DEFAULT_API_URL);
        let chat_url = std::env::var("CHAT_URL").unwrap_or_else(|_| api_url.clone());
        let timeout_secs = match std::env::var("HTTP_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .context("HTTP_TIMEOUT_SECS must be a whole number of seconds")?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Config {
            api_url,
            chat_url,
            state_dir: state_dir_from_env(),
            http_timeout: Duration::from_secs(timeout_secs),
            rust_log: env_or("RUST_LOG", "warn"),
        })
    }

    /// Overrides the API host (and the chat host when it was following it).
    pub fn with_api_url(mut self, api_url: &str) -> Self {
        if self.chat_url == self.api_url {
            self.chat_url = api_url.to_string();
        }
        self.api_url = api_url.to_string();
        self
    }

    pub fn session_path(&self) -> PathBuf {
        self.state_dir.join("session.json")
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn state_dir_from_env() -> PathBuf {
    if let Ok(dir) = std::env::var("HIREFLOW_STATE_DIR") {
        return PathBuf::from(dir);
    }
    match std::env::var("HOME") {
        Ok(home) => PathBuf::from(home).join(".hireflow"),
        Err(_) => PathBuf::from(".hireflow"),
    }
}
