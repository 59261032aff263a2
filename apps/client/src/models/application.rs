use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::job::JobDescriptionRef;
use super::{lenient_datetime, optional_id, string_or_number};

/// HR's verdict on an application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Selected,
    Rejected,
    #[default]
    #[serde(other)]
    Pending,
}

impl Decision {
    pub fn as_str(self) -> &'static str {
        match self {
            Decision::Selected => "selected",
            Decision::Rejected => "rejected",
            Decision::Pending => "pending",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Decision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "selected" | "select" | "accept" | "accepted" => Ok(Decision::Selected),
            "rejected" | "reject" => Ok(Decision::Rejected),
            "pending" => Ok(Decision::Pending),
            other => Err(format!(
                "unknown decision '{other}' (expected selected, rejected or pending)"
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    #[serde(deserialize_with = "string_or_number")]
    pub jd_id: String,
    #[serde(default, deserialize_with = "optional_id")]
    pub application_id: Option<String>,
    #[serde(default, deserialize_with = "optional_id")]
    pub resume_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub decision: Option<Decision>,
    #[serde(default)]
    pub match_score: Option<f64>,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub job_descriptions: Option<JobDescriptionRef>,
}

impl Application {
    pub fn job_title(&self) -> &str {
        self.job_descriptions
            .as_ref()
            .and_then(|jd| jd.title.as_deref())
            .unwrap_or("Untitled position")
    }

    /// Decision if HR made one, otherwise the raw application status.
    pub fn display_status(&self) -> String {
        match self.decision {
            Some(decision) if decision != Decision::Pending => decision.to_string(),
            _ => self
                .status
                .clone()
                .unwrap_or_else(|| Decision::Pending.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default, deserialize_with = "optional_id")]
    pub jd_id: Option<String>,
    #[serde(default)]
    pub read: bool,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Response of `POST /upload-resume/{jd_id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadReceipt {
    #[serde(default)]
    pub message: String,
    #[serde(default, deserialize_with = "optional_id")]
    pub resume_id: Option<String>,
}

/// Notification preferences. The backend owns the schema, so keys are kept
/// as an open map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Preferences(pub Map<String, Value>);

impl Preferences {
    /// Sets `key` from a CLI value. JSON literals (`true`, `3`, `["a"]`) are
    /// kept typed; anything else is stored as a string.
    pub fn set(&mut self, key: &str, raw: &str) {
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        self.0.insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}
