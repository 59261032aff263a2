use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Method};

use super::ApiClient;
use crate::errors::ClientError;
use crate::models::application::{Application, Notification, Preferences, UploadReceipt};

/// A resume ready to be sent as the `file` field of a multipart upload.
/// Contents are shared, so retrying an upload does not copy the file.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub file_name: String,
    pub mime: &'static str,
    pub contents: Bytes,
}

impl ResumeFile {
    fn to_part(&self) -> Result<Part, ClientError> {
        let len = self.contents.len() as u64;
        Ok(
            Part::stream_with_length(Body::from(self.contents.clone()), len)
                .file_name(self.file_name.clone())
                .mime_str(self.mime)?,
        )
    }
}

impl ApiClient {
    /// POST /upload-resume/{jd_id}
    pub async fn upload_resume(
        &self,
        token: &str,
        jd_id: &str,
        file: &ResumeFile,
    ) -> Result<UploadReceipt, ClientError> {
        let path = format!("/upload-resume/{jd_id}");
        let form = Form::new().part("file", file.to_part()?);
        self.send(self.authed(Method::POST, &path, token).multipart(form))
            .await
    }

    /// GET /applications/{user_id}
    pub async fn applications(
        &self,
        token: &str,
        user_id: &str,
    ) -> Result<Vec<Application>, ClientError> {
        let path = format!("/applications/{user_id}");
        self.send(self.authed(Method::GET, &path, token)).await
    }

    /// GET /notifications/{user_id}
    pub async fn notifications(
        &self,
        token: &str,
        user_id: &str,
    ) -> Result<Vec<Notification>, ClientError> {
        let path = format!("/notifications/{user_id}");
        self.send(self.authed(Method::GET, &path, token)).await
    }

    /// GET /preferences
    pub async fn preferences(&self, token: &str) -> Result<Preferences, ClientError> {
        self.send(self.authed(Method::GET, "/preferences", token))
            .await
    }

    /// PUT /preferences
    pub async fn update_preferences(
        &self,
        token: &str,
        prefs: &Preferences,
    ) -> Result<Preferences, ClientError> {
        self.send(self.authed(Method::PUT, "/preferences", token).json(prefs))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_client::test_support::client_for;
    use wiremock::matchers::{header, header_regex, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_upload_resume_multipart() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/upload-resume/j1"))
            .and(header("authorization", "Bearer tok"))
            .and(header_regex("content-type", "^multipart/form-data; boundary="))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "Resume uploaded successfully", "resume_id": "r7"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let file = ResumeFile {
            file_name: "cv.pdf".to_string(),
            mime: "application/pdf",
            contents: Bytes::from_static(b"%PDF-1.4 fake"),
        };
        let receipt = client_for(&server)
            .upload_resume("tok", "j1", &file)
            .await
            .unwrap();
        assert_eq!(receipt.resume_id.as_deref(), Some("r7"));

        let requests = server.received_requests().await.unwrap();
        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(body.contains("name=\"file\""));
        assert!(body.contains("filename=\"cv.pdf\""));
        assert!(body.contains("%PDF-1.4 fake"));
    }

    #[tokio::test]
    async fn test_applications_and_notifications() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/applications/u1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"jd_id": "j1", "status": "applied", "job_descriptions": {"title": "Engineer"}}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/notifications/u1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"message": "You have been shortlisted", "created_at": "2025-01-02T10:00:00Z"}
            ])))
            .mount(&server)
            .await;

        let api = client_for(&server);
        let apps = api.applications("tok", "u1").await.unwrap();
        assert_eq!(apps[0].job_title(), "Engineer");
        let notes = api.notifications("tok", "u1").await.unwrap();
        assert_eq!(notes[0].message, "You have been shortlisted");
        assert!(notes[0].created_at.is_some());
    }

    #[tokio::test]
    async fn test_preferences_round_trip_through_server() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/preferences"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "email_notifications": false
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut prefs = Preferences::default();
        prefs.set("email_notifications", "false");
        let saved = client_for(&server)
            .update_preferences("tok", &prefs)
            .await
            .unwrap();
        assert_eq!(saved, prefs);
    }
}
