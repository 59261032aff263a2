use std::path::Path;

use bytes::Bytes;
use tracing::debug;

use crate::api_client::resumes::ResumeFile;
use crate::errors::ClientError;

/// Largest resume the backend accepts.
pub const MAX_RESUME_BYTES: u64 = 10 * 1024 * 1024;

pub const INVALID_TYPE_MESSAGE: &str = "Invalid file type. Use PDF, DOC, DOCX, PNG, or JPG.";
pub const TOO_LARGE_MESSAGE: &str = "File exceeds 10MB limit.";

/// Extension → MIME type for the formats the backend can parse.
const ALLOWED_TYPES: &[(&str, &str)] = &[
    ("pdf", "application/pdf"),
    ("doc", "application/msword"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
];

/// MIME type for an allowed resume file, by extension (case-insensitive).
pub fn mime_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    ALLOWED_TYPES
        .iter()
        .find(|(allowed, _)| *allowed == ext)
        .map(|(_, mime)| *mime)
}

/// Checks type and size, returning the MIME type to upload with.
pub fn validate_resume(path: &Path, size: u64) -> Result<&'static str, ClientError> {
    let mime = mime_for(path).ok_or_else(|| ClientError::Validation(INVALID_TYPE_MESSAGE.to_string()))?;
    if size > MAX_RESUME_BYTES {
        return Err(ClientError::Validation(TOO_LARGE_MESSAGE.to_string()));
    }
    Ok(mime)
}

/// Validates and reads a resume from disk.
pub async fn load_resume(path: &Path) -> Result<ResumeFile, ClientError> {
    let size = tokio::fs::metadata(path).await?.len();
    let mime = validate_resume(path, size)?;
    let contents = tokio::fs::read(path).await?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("resume")
        .to_string();
    debug!(file = %file_name, mime, bytes = contents.len(), "Resume loaded");

    Ok(ResumeFile {
        file_name,
        mime,
        contents: Bytes::from(contents),
    })
}
