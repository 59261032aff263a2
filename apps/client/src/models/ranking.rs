use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::application::Decision;
use super::{optional_id, string_or_number};

/// One candidate row as returned for an HR job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateRanking {
    #[serde(deserialize_with = "string_or_number")]
    pub resume_id: String,
    #[serde(default, deserialize_with = "optional_id")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Match score in 0.0..=1.0, absent until the job has been ranked.
    #[serde(default, alias = "score")]
    pub match_score: Option<f64>,
    #[serde(default)]
    pub decision: Option<Decision>,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl CandidateRanking {
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.resume_id)
    }
}

/// Orders candidates by score, highest first; unscored candidates last.
pub fn sort_by_score(candidates: &mut [CandidateRanking]) {
    candidates.sort_by(|a, b| match (a.match_score, b.match_score) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Formats a 0..1 score as a whole percentage.
pub fn format_score(score: Option<f64>) -> String {
    match score {
        Some(s) => format!("{:.0}%", (s.clamp(0.0, 1.0) * 100.0)),
        None => "unranked".to_string(),
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub years: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default)]
    pub degree: Option<String>,
}

/// Parsed resume as stored by the backend (`GET /resumes/{jd_id}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub resume_id: String,
    #[serde(default, deserialize_with = "optional_id")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
}

impl ResumeRecord {
    pub fn total_years(&self) -> u32 {
        self.experience.iter().filter_map(|e| e.years).sum()
    }
}

/// Response of `GET /explain-ranking/{resume_id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankingExplanation {
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub matched_skills: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
    #[serde(default)]
    pub explanation: Option<String>,
    /// Per-component contribution (semantic, keyword, experience, ...).
    #[serde(default)]
    pub breakdown: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DecisionRequest {
    pub decision: Decision,
}
