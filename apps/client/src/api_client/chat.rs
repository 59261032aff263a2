use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ApiClient;
use crate::errors::ClientError;
use crate::models::job::Requirements;

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub sender: &'a str,
    pub message: &'a str,
    pub metadata: ChatMetadata<'a>,
}

#[derive(Debug, Serialize)]
pub struct ChatMetadata<'a> {
    pub user_id: &'a str,
    pub jd_id: Option<&'a str>,
}

/// One element of the webhook's reply array.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BotReply {
    #[serde(default)]
    pub text: Option<String>,
}

/// What the chatbot knows about a candidate for one posting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateContext {
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub requirements: Option<Requirements>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiClient {
    /// POST {chat_url}/rasa/webhook, unauthenticated.
    /// A reply that is not a JSON array is treated as "no replies".
    pub async fn send_chat_message(
        &self,
        request: &ChatRequest<'_>,
    ) -> Result<Vec<BotReply>, ClientError> {
        let url = format!("{}/rasa/webhook", self.chat_url);
        let raw: Value = self
            .send(self.client.request(Method::POST, url).json(request))
            .await?;
        Ok(match raw {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
            _ => Vec::new(),
        })
    }

    /// GET /chatbot/candidate-context/{user_id}/{jd_id}
    pub async fn candidate_context(
        &self,
        token: &str,
        user_id: &str,
        jd_id: &str,
    ) -> Result<CandidateContext, ClientError> {
        let path = format!("/chatbot/candidate-context/{user_id}/{jd_id}");
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
    async fn test_webhook_payload_and_replies() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rasa/webhook"))
            .and(body_json(serde_json::json!({
                "sender": "u1", "message": "start interview",
                "metadata": {"user_id": "u1", "jd_id": "j1"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"recipient_id": "u1", "text": "Question 1"},
                {"recipient_id": "u1", "image": "https://example.com/x.png"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let request = ChatRequest {
            sender: "u1",
            message: "start interview",
            metadata: ChatMetadata {
                user_id: "u1",
                jd_id: Some("j1"),
            },
        };
        let replies = client_for(&server).send_chat_message(&request).await.unwrap();
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0].text.as_deref(), Some("Question 1"));
        assert!(replies[1].text.is_none());
    }

    #[tokio::test]
    async fn test_webhook_non_array_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rasa/webhook"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "ok"})))
            .mount(&server)
            .await;

        let request = ChatRequest {
            sender: "u1",
            message: "hm",
            metadata: ChatMetadata {
                user_id: "u1",
                jd_id: None,
            },
        };
        let replies = client_for(&server).send_chat_message(&request).await.unwrap();
        assert!(replies.is_empty());
    }

    #[tokio::test]
    async fn test_candidate_context_keeps_unknown_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/chatbot/candidate-context/u1/j1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "job_title": "ML Engineer", "skills": ["python"], "years": 3
            })))
            .mount(&server)
            .await;

        let ctx = client_for(&server)
            .candidate_context("tok", "u1", "j1")
            .await
            .unwrap();
        assert_eq!(ctx.job_title.as_deref(), Some("ML Engineer"));
        assert_eq!(ctx.extra.get("years"), Some(&serde_json::json!(3)));
    }
}
