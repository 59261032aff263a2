//! HR workflow: posting jobs, ranking applicants and recording decisions.
//!
//! Scoring itself happens server-side; this module only triggers it and
//! orders what comes back.

use chrono::NaiveDate;
use tracing::info;

use crate::api_client::jobs::DecisionItem;
use crate::api_client::ApiClient;
use crate::errors::ClientError;
use crate::models::application::Decision;
use crate::models::job::{split_requirements, Job, JobUpdate, NewJob};
use crate::models::ranking::{sort_by_score, CandidateRanking, RankingExplanation, ResumeRecord};
use crate::models::session::{Role, Session};
use crate::models::MessageResponse;
use crate::session::Authenticator;

/// Input for a new posting as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct JobDraft {
    pub title: String,
    pub description: String,
    /// Comma-separated.
    pub requirements: String,
    /// `YYYY-MM-DD`, optional.
    pub deadline: Option<String>,
}

fn require_hr(auth: &Authenticator) -> Result<Session, ClientError> {
    let session = auth.store().require()?;
    if session.role != Role::Hr {
        return Err(ClientError::Forbidden(
            "This action requires an HR account.".to_string(),
        ));
    }
    Ok(session)
}

fn validate_deadline(deadline: Option<&str>) -> Result<Option<String>, ClientError> {
    match deadline.map(str::trim).filter(|d| !d.is_empty()) {
        None => Ok(None),
        Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d")
            .map(|date| Some(date.format("%Y-%m-%d").to_string()))
            .map_err(|_| ClientError::Validation(format!("Deadline '{d}' must be YYYY-MM-DD."))),
    }
}

impl JobDraft {
    pub fn into_new_job(self) -> Result<NewJob, ClientError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(ClientError::Validation("Job title is required.".to_string()));
        }
        Ok(NewJob {
            title,
            description: self.description.trim().to_string(),
            requirements: split_requirements(&self.requirements),
            deadline: validate_deadline(self.deadline.as_deref())?,
        })
    }
}

pub async fn create_job(
    api: &ApiClient,
    auth: &Authenticator,
    draft: JobDraft,
) -> Result<Job, ClientError> {
    require_hr(auth)?;
    let job = draft.into_new_job()?;
    let job = &job;
    let created = auth
        .with_auth(|token| async move { api.create_job(&token, job).await })
        .await?;
    info!(jd_id = %created.jd_id, "Job posted");
    Ok(created)
}

pub async fn update_job(
    api: &ApiClient,
    auth: &Authenticator,
    jd_id: &str,
    mut update: JobUpdate,
) -> Result<Job, ClientError> {
    require_hr(auth)?;
    update.deadline = validate_deadline(update.deadline.as_deref())?;
    if update.is_empty() {
        return Err(ClientError::Validation("Nothing to update.".to_string()));
    }
    let update = &update;
    auth.with_auth(|token| async move { api.update_job(&token, jd_id, update).await })
        .await
}

pub async fn my_jobs(api: &ApiClient, auth: &Authenticator) -> Result<Vec<Job>, ClientError> {
    require_hr(auth)?;
    auth.with_auth(|token| async move { api.hr_jobs(&token).await })
        .await
}

/// Candidates for a posting, best match first.
pub async fn candidates(
    api: &ApiClient,
    auth: &Authenticator,
    jd_id: &str,
) -> Result<Vec<CandidateRanking>, ClientError> {
    require_hr(auth)?;
    let mut list = auth
        .with_auth(|token| async move { api.job_candidates(&token, jd_id).await })
        .await?;
    sort_by_score(&mut list);
    Ok(list)
}

/// Asks the backend to score every resume for `jd_id`, then returns the
/// refreshed ranking.
pub async fn rank(
    api: &ApiClient,
    auth: &Authenticator,
    jd_id: &str,
) -> Result<(MessageResponse, Vec<CandidateRanking>), ClientError> {
    require_hr(auth)?;
    let ack = auth
        .with_auth(|token| async move { api.rank_resumes(&token, jd_id).await })
        .await?;
    info!(jd_id, "Resumes ranked");
    let ranking = candidates(api, auth, jd_id).await?;
    Ok((ack, ranking))
}

pub async fn resumes(
    api: &ApiClient,
    auth: &Authenticator,
    jd_id: &str,
) -> Result<Vec<ResumeRecord>, ClientError> {
    require_hr(auth)?;
    auth.with_auth(|token| async move { api.resumes_for_job(&token, jd_id).await })
        .await
}

pub async fn decide(
    api: &ApiClient,
    auth: &Authenticator,
    resume_id: &str,
    decision: Decision,
) -> Result<MessageResponse, ClientError> {
    require_hr(auth)?;
    auth.with_auth(|token| async move { api.record_decision(&token, resume_id, decision).await })
        .await
}

/// Parses `resume_id=decision` pairs as given on the command line.
pub fn parse_decision_pairs(pairs: &[String]) -> Result<Vec<DecisionItem>, ClientError> {
    pairs
        .iter()
        .map(|pair| {
            let (resume_id, decision) = pair.split_once('=').ok_or_else(|| {
                ClientError::Validation(format!("Expected resume_id=decision, got '{pair}'."))
            })?;
            let resume_id = resume_id.trim();
            if resume_id.is_empty() {
                return Err(ClientError::Validation(format!(
                    "Missing resume id in '{pair}'."
                )));
            }
            let decision = decision.parse::<Decision>().map_err(ClientError::Validation)?;
            Ok(DecisionItem {
                resume_id: resume_id.to_string(),
                decision,
            })
        })
        .collect()
}

/// Sends all decisions for a posting at once; the backend notifies the
/// candidates.
pub async fn submit_decisions(
    api: &ApiClient,
    auth: &Authenticator,
    jd_id: &str,
    decisions: &[DecisionItem],
) -> Result<MessageResponse, ClientError> {
    require_hr(auth)?;
    if decisions.is_empty() {
        return Err(ClientError::Validation(
            "No decisions to submit.".to_string(),
        ));
    }
    auth.with_auth(|token| async move { api.submit_decisions(&token, jd_id, decisions).await })
        .await
}

pub async fn explain(
    api: &ApiClient,
    auth: &Authenticator,
    resume_id: &str,
) -> Result<RankingExplanation, ClientError> {
    require_hr(auth)?;
    auth.with_auth(|token| async move { api.explain_ranking(&token, resume_id).await })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_client::test_support::client_for;
    use crate::session::testing::{session_with, signed_in_store, FakeRefresher};
    use crate::session::SessionStore;
    use std::sync::Arc;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn hr_auth(access: &str, refresher: FakeRefresher) -> Authenticator {
        let store = SessionStore::in_memory();
        store
            .begin(session_with(access, Some("rt"), Role::Hr))
            .unwrap();
        Authenticator::new(store, Arc::new(refresher))
    }

    #[test]
    fn test_draft_splits_requirements_and_checks_deadline() {
        let job = JobDraft {
            title: "  Platform Engineer ".to_string(),
            description: "Build things".to_string(),
            requirements: "Rust, Kubernetes, ".to_string(),
            deadline: Some("2026-01-31".to_string()),
        }
        .into_new_job()
        .unwrap();
        assert_eq!(job.title, "Platform Engineer");
        assert_eq!(job.requirements, vec!["Rust", "Kubernetes"]);
        assert_eq!(job.deadline.as_deref(), Some("2026-01-31"));
    }

    #[test]
    fn test_draft_rejects_bad_input() {
        let missing_title = JobDraft::default().into_new_job().unwrap_err();
        assert_eq!(missing_title.user_message(), "Job title is required.");

        let bad_deadline = JobDraft {
            title: "X".to_string(),
            deadline: Some("31/01/2026".to_string()),
            ..Default::default()
        }
        .into_new_job()
        .unwrap_err();
        assert!(bad_deadline.user_message().contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_parse_decision_pairs() {
        let pairs = vec!["r1=selected".to_string(), "r2 = reject".to_string()];
        let items = parse_decision_pairs(&pairs).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].resume_id, "r2");
        assert_eq!(items[1].decision, Decision::Rejected);

        assert!(parse_decision_pairs(&["r1".to_string()]).is_err());
        assert!(parse_decision_pairs(&["=selected".to_string()]).is_err());
        assert!(parse_decision_pairs(&["r1=maybe".to_string()]).is_err());
    }

    #[tokio::test]
    async fn test_candidate_cannot_post_jobs() {
        let server = MockServer::start().await;
        let auth = Authenticator::new(
            signed_in_store("tok", None),
            Arc::new(FakeRefresher::failing()),
        );
        let draft = JobDraft {
            title: "X".to_string(),
            ..Default::default()
        };
        let err = create_job(&client_for(&server), &auth, draft)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_rank_then_sorted_candidates_after_refresh() {
        let server = MockServer::start().await;
        // First ranking call carries an expired token.
        Mock::given(method("POST"))
            .and(path("/rank-resumes/j1"))
            .and(wiremock::matchers::header("authorization", "Bearer expired"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({"detail": "Invalid token"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/rank-resumes/j1"))
            .and(wiremock::matchers::header("authorization", "Bearer fresh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "Resumes ranked successfully"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/hr/jobs/j1/candidates"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"resume_id": "r1", "match_score": 0.31},
                {"resume_id": "r2"},
                {"resume_id": "r3", "match_score": 0.88}
            ])))
            .mount(&server)
            .await;

        let auth = hr_auth("expired", FakeRefresher::succeeding("fresh", None));
        let (ack, ranking) = rank(&client_for(&server), &auth, "j1").await.unwrap();
        assert_eq!(ack.message, "Resumes ranked successfully");
        let order: Vec<&str> = ranking.iter().map(|c| c.resume_id.as_str()).collect();
        assert_eq!(order, vec!["r3", "r1", "r2"]);
    }

    #[tokio::test]
    async fn test_update_job_close() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/jobs/j1"))
            .and(body_json(serde_json::json!({"status": "closed"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "jd_id": "j1", "title": "Old role", "status": "closed"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let auth = hr_auth("tok", FakeRefresher::failing());
        let update = JobUpdate {
            status: Some("closed".to_string()),
            ..Default::default()
        };
        let job = update_job(&client_for(&server), &auth, "j1", update)
            .await
            .unwrap();
        assert!(job.is_closed());
    }

    #[tokio::test]
    async fn test_update_job_requires_changes() {
        let server = MockServer::start().await;
        let auth = hr_auth("tok", FakeRefresher::failing());
        let err = update_job(&client_for(&server), &auth, "j1", JobUpdate::default())
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Nothing to update.");
    }
}
