//! Candidate workflow: browsing postings, applying with a resume, and
//! following applications and notifications.

pub mod upload;

use std::path::Path;

use tracing::info;

use crate::api_client::ApiClient;
use crate::errors::ClientError;
use crate::models::application::{Application, Notification, Preferences, UploadReceipt};
use crate::models::job::Job;
use crate::models::session::{Role, Session};
use crate::session::Authenticator;

pub const ALREADY_APPLIED_MESSAGE: &str = "Already applied to this job.";

fn require_candidate(auth: &Authenticator) -> Result<Session, ClientError> {
    let session = auth.store().require()?;
    if session.role != Role::Candidate {
        return Err(ClientError::Forbidden(
            "This action requires a candidate account.".to_string(),
        ));
    }
    Ok(session)
}

pub async fn list_jobs(api: &ApiClient, auth: &Authenticator) -> Result<Vec<Job>, ClientError> {
    auth.with_auth(|token| async move { api.list_jobs(&token).await })
        .await
}

pub async fn applications(
    api: &ApiClient,
    auth: &Authenticator,
) -> Result<Vec<Application>, ClientError> {
    let session = auth.store().require()?;
    let user_id = session.user_id.as_str();
    auth.with_auth(|token| async move { api.applications(&token, user_id).await })
        .await
}

pub async fn notifications(
    api: &ApiClient,
    auth: &Authenticator,
) -> Result<Vec<Notification>, ClientError> {
    let session = auth.store().require()?;
    let user_id = session.user_id.as_str();
    auth.with_auth(|token| async move { api.notifications(&token, user_id).await })
        .await
}

pub fn has_applied(applications: &[Application], jd_id: &str) -> bool {
    applications.iter().any(|app| app.jd_id == jd_id)
}

/// Uploads a resume for `jd_id`.
///
/// The file is validated locally and the candidate's applications are checked
/// for a previous application to the same posting before anything is sent.
pub async fn apply(
    api: &ApiClient,
    auth: &Authenticator,
    jd_id: &str,
    resume_path: &Path,
) -> Result<UploadReceipt, ClientError> {
    require_candidate(auth)?;
    let file = upload::load_resume(resume_path).await?;

    let existing = applications(api, auth).await?;
    if has_applied(&existing, jd_id) {
        return Err(ClientError::Validation(ALREADY_APPLIED_MESSAGE.to_string()));
    }

    let file = &file;
    let receipt = auth
        .with_auth(|token| async move { api.upload_resume(&token, jd_id, file).await })
        .await?;
    info!(jd_id, resume_id = ?receipt.resume_id, "Resume uploaded");
    Ok(receipt)
}

pub async fn preferences(api: &ApiClient, auth: &Authenticator) -> Result<Preferences, ClientError> {
    auth.with_auth(|token| async move { api.preferences(&token).await })
        .await
}

/// Reads the current preferences, sets one key and writes them back.
pub async fn set_preference(
    api: &ApiClient,
    auth: &Authenticator,
    key: &str,
    value: &str,
) -> Result<Preferences, ClientError> {
    if key.trim().is_empty() {
        return Err(ClientError::Validation(
            "Preference key cannot be empty.".to_string(),
        ));
    }
    let mut prefs = preferences(api, auth).await?;
    prefs.set(key.trim(), value);
    let prefs = &prefs;
    auth.with_auth(|token| async move { api.update_preferences(&token, prefs).await })
        .await
}
