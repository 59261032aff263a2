use reqwest::Method;
use serde::Serialize;

use super::ApiClient;
use crate::errors::ClientError;
use crate::models::application::Decision;
use crate::models::job::{Job, JobUpdate, NewJob};
use crate::models::ranking::CandidateRanking;
use crate::models::MessageResponse;

/// Body of `POST /hr/jobs/{id}/submit-decisions`.
#[derive(Debug, Serialize)]
pub struct DecisionBatch<'a> {
    pub decisions: &'a [DecisionItem],
}

#[derive(Debug, Clone, Serialize)]
pub struct DecisionItem {
    pub resume_id: String,
    pub decision: Decision,
}

impl ApiClient {
    /// GET /jobs
    pub async fn list_jobs(&self, token: &str) -> Result<Vec<Job>, ClientError> {
        self.send(self.authed(Method::GET, "/jobs", token)).await
    }

    /// POST /jobs
    pub async fn create_job(&self, token: &str, job: &NewJob) -> Result<Job, ClientError> {
        self.send(self.authed(Method::POST, "/jobs", token).json(job))
            .await
    }

    /// PATCH /jobs/{id}
    pub async fn update_job(
        &self,
        token: &str,
        jd_id: &str,
        update: &JobUpdate,
    ) -> Result<Job, ClientError> {
        let path = format!("/jobs/{jd_id}");
        self.send(self.authed(Method::PATCH, &path, token).json(update))
            .await
    }

    /// GET /hr/jobs: postings owned by the signed-in HR user.
    pub async fn hr_jobs(&self, token: &str) -> Result<Vec<Job>, ClientError> {
        self.send(self.authed(Method::GET, "/hr/jobs", token)).await
    }

    /// GET /hr/jobs/{id}/candidates
    pub async fn job_candidates(
        &self,
        token: &str,
        jd_id: &str,
    ) -> Result<Vec<CandidateRanking>, ClientError> {
        let path = format!("/hr/jobs/{jd_id}/candidates");
        self.send(self.authed(Method::GET, &path, token)).await
    }

    /// POST /hr/jobs/{id}/submit-decisions
    pub async fn submit_decisions(
        &self,
        token: &str,
        jd_id: &str,
        decisions: &[DecisionItem],
    ) -> Result<MessageResponse, ClientError> {
        let path = format!("/hr/jobs/{jd_id}/submit-decisions");
        let request = self
            .authed(Method::POST, &path, token)
            .json(&DecisionBatch { decisions });
        self.send(request).await
    }
}
