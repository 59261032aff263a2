use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{lenient_datetime, optional_id, string_or_number};

/// Requirements arrive either as a JSON list or as one comma-separated string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Requirements {
    List(Vec<String>),
    Text(String),
}

impl Requirements {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Requirements::List(items) => items
                .iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            Requirements::Text(text) => split_requirements(text),
        }
    }
}

/// Splits a comma-separated requirement list, trimming and dropping blanks.
pub fn split_requirements(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Job description fields embedded in joined records
/// (`applications.job_descriptions`, candidate lists).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobDescriptionRef {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub requirements: Option<Requirements>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    #[serde(deserialize_with = "string_or_number")]
    pub jd_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    requirements: Option<Requirements>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "optional_id")]
    pub hr_user_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub job_descriptions: Option<JobDescriptionRef>,
}

impl Job {
    /// Requirements from the record itself, or from the nested job
    /// description when the top-level field is absent.
    pub fn requirements(&self) -> Vec<String> {
        self.requirements
            .as_ref()
            .or_else(|| {
                self.job_descriptions
                    .as_ref()
                    .and_then(|jd| jd.requirements.as_ref())
            })
            .map(Requirements::to_vec)
            .unwrap_or_default()
    }

    pub fn description(&self) -> &str {
        self.description
            .as_deref()
            .or_else(|| {
                self.job_descriptions
                    .as_ref()
                    .and_then(|jd| jd.description.as_deref())
            })
            .unwrap_or("")
    }

    pub fn is_closed(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case("closed"))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub deadline: Option<String>,
}

/// Partial update for `PATCH /jobs/{id}`; unset fields are omitted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct JobUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl JobUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.requirements.is_none()
            && self.deadline.is_none()
            && self.status.is_none()
    }
}
