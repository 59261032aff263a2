use reqwest::Method;

use super::ApiClient;
use crate::errors::ClientError;
use crate::models::application::Decision;
use crate::models::ranking::{DecisionRequest, RankingExplanation, ResumeRecord};
use crate::models::MessageResponse;

impl ApiClient {
    /// POST /rank-resumes/{jd_id}. Scoring runs server-side; the response
    /// only acknowledges it.
    pub async fn rank_resumes(&self, token: &str, jd_id: &str) -> Result<MessageResponse, ClientError> {
        let path = format!("/rank-resumes/{jd_id}");
        self.send(self.authed(Method::POST, &path, token)).await
    }

    /// GET /resumes/{jd_id}
    pub async fn resumes_for_job(
        &self,
        token: &str,
        jd_id: &str,
    ) -> Result<Vec<ResumeRecord>, ClientError> {
        let path = format!("/resumes/{jd_id}");
        self.send(self.authed(Method::GET, &path, token)).await
    }

    /// POST /decisions/{resume_id}
    pub async fn record_decision(
        &self,
        token: &str,
        resume_id: &str,
        decision: Decision,
    ) -> Result<MessageResponse, ClientError> {
        let path = format!("/decisions/{resume_id}");
        let request = self
            .authed(Method::POST, &path, token)
            .json(&DecisionRequest { decision });
        self.send(request).await
    }

    /// GET /explain-ranking/{resume_id}
    pub async fn explain_ranking(
        &self,
        token: &str,
        resume_id: &str,
    ) -> Result<RankingExplanation, ClientError> {
        let path = format!("/explain-ranking/{resume_id}");
        self.send(self.authed(Method::GET, &path, token)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_client::test_support::client_for;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_record_decision_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/decisions/r1"))
            .and(body_json(serde_json::json!({"decision": "rejected"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "ok"})))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .record_decision("tok", "r1", Decision::Rejected)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_explain_ranking_defaults() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/explain-ranking/r1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "score": 0.72,
                "matched_skills": ["rust", "sql"],
                "breakdown": {"keyword": 0.5, "semantic": 0.22}
            })))
            .mount(&server)
            .await;

        let explanation = client_for(&server).explain_ranking("tok", "r1").await.unwrap();
        assert_eq!(explanation.matched_skills, vec!["rust", "sql"]);
        assert!(explanation.missing_skills.is_empty());
        assert!(explanation.explanation.is_none());
        assert_eq!(explanation.breakdown.len(), 2);
    }

    #[tokio::test]
    async fn test_rank_resumes_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rank-resumes/j1"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({"detail": "Database error: timeout"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).rank_resumes("tok", "j1").await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.user_message(), "Database error: timeout");
    }
}
