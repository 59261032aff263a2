use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use super::optional_id;
use crate::errors::ClientError;

/// Account role. The backend uses several spellings for the same two roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "HR", alias = "hr", alias = "demo_hr")]
    Hr,
    #[serde(
        rename = "Candidate",
        alias = "candidate",
        alias = "job_seeker",
        alias = "demo_candidate"
    )]
    Candidate,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Hr => "HR",
            Role::Candidate => "Candidate",
        }
    }

    /// Maps whatever role string the backend returned. Anything that is not
    /// an HR spelling lands on the candidate side.
    pub fn from_backend(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "hr" | "demo_hr" => Role::Hr,
            _ => Role::Candidate,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hr" => Ok(Role::Hr),
            "candidate" => Ok(Role::Candidate),
            other => Err(format!("unknown role '{other}' (expected HR or Candidate)")),
        }
    }
}

/// The signed-in user's credentials and identity, persisted between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user_id: String,
    pub role: Role,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl Session {
    /// Builds a session from a login response. `email` comes from the login
    /// input because the backend does not echo it.
    ///
    /// The login endpoints may answer with only `{access_token, token_type}`;
    /// the user id and role then come from the access token's claims.
    pub fn from_login(resp: LoginResponse, email: &str) -> Result<Self, ClientError> {
        let claims = TokenClaims::from_token(&resp.access_token).unwrap_or_default();
        let metadata = claims.user_metadata.unwrap_or_default();
        let user_id = resp.user_id.or(claims.sub).ok_or_else(|| {
            ClientError::Validation("Login response did not include a user id".to_string())
        })?;
        Ok(Session {
            access_token: resp.access_token,
            refresh_token: resp.refresh_token.filter(|t| !t.is_empty()),
            user_id,
            role: resp
                .role
                .or(metadata.role)
                .as_deref()
                .map(Role::from_backend)
                .unwrap_or(Role::Candidate),
            email: email.to_string(),
            name: resp.name.or(metadata.name).filter(|n| !n.trim().is_empty()),
        })
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

/// Identity claims carried in a JWT access token.
#[derive(Debug, Default, Deserialize)]
pub struct TokenClaims {
    #[serde(default, deserialize_with = "optional_id")]
    pub sub: Option<String>,
    #[serde(default)]
    pub user_metadata: Option<UserMetadata>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl TokenClaims {
    /// Reads the payload segment of a JWT. The signature is not checked; the
    /// backend does that on every request. Opaque tokens yield `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        let payload = token.split('.').nth(1)?;
        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SignupRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub role: Role,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default, deserialize_with = "optional_id")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RefreshResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChangePasswordRequest<'a> {
    pub current_password: &'a str,
    pub new_password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct UpdateNameRequest<'a> {
    pub name: &'a str,
}
