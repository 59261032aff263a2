//! Interview-prep chat assistant.
//!
//! Conversations are kept per user on disk. Greetings and "yes" are answered
//! locally; everything else goes to the chatbot webhook together with the
//! posting the candidate applied to.

pub mod shortcuts;
pub mod transcript;

use std::path::Path;

use tracing::{debug, info, warn};

use crate::api_client::chat::{BotReply, CandidateContext, ChatMetadata, ChatRequest};
use crate::api_client::ApiClient;
use crate::errors::{ClientError, ErrorCategory};
use crate::session::Authenticator;

pub use shortcuts::Shortcut;
pub use transcript::{ChatMessage, Sender, Transcript};

pub const NOT_UNDERSTOOD_MESSAGE: &str = "I'm sorry, I didn't understand that. Could you rephrase?";
pub const CONNECTION_ERROR_MESSAGE: &str = "Sorry, I'm having trouble connecting. Please try again.";

/// Bot messages produced for one webhook exchange.
fn replies_to_messages(replies: Vec<BotReply>) -> Vec<ChatMessage> {
    let messages: Vec<ChatMessage> = replies
        .into_iter()
        .filter_map(|r| r.text.filter(|t| !t.is_empty()))
        .map(ChatMessage::bot)
        .collect();
    if messages.is_empty() {
        vec![ChatMessage::bot(NOT_UNDERSTOOD_MESSAGE)]
    } else {
        messages
    }
}

/// The posting the conversation is about: the cached one, else the most
/// recent application. Lookup failures leave it unknown, except losing the
/// session, which the caller has to report.
async fn resolve_jd_id(
    api: &ApiClient,
    auth: &Authenticator,
    user_id: &str,
    transcript: &mut Transcript,
) -> Result<Option<String>, ClientError> {
    if transcript.jd_id.is_some() {
        return Ok(transcript.jd_id.clone());
    }
    let found = auth
        .with_auth(|token| async move { api.applications(&token, user_id).await })
        .await;
    match found {
        Ok(apps) => {
            let Some(jd_id) = apps.into_iter().next().map(|app| app.jd_id) else {
                return Ok(None);
            };
            info!(%jd_id, "Detected job for chat from applications");
            transcript.jd_id = Some(jd_id.clone());
            Ok(Some(jd_id))
        }
        Err(e) if e.category() == ErrorCategory::SessionLost => Err(e),
        Err(e) => {
            warn!(error = %e, "Could not look up applications for chat");
            Ok(None)
        }
    }
}

async fn forward(
    api: &ApiClient,
    auth: &Authenticator,
    user_id: &str,
    message: &str,
    transcript: &mut Transcript,
) -> Result<Vec<ChatMessage>, ClientError> {
    let jd_id = resolve_jd_id(api, auth, user_id, transcript).await?;
    let request = ChatRequest {
        sender: user_id,
        message,
        metadata: ChatMetadata {
            user_id,
            jd_id: jd_id.as_deref(),
        },
    };
    Ok(match api.send_chat_message(&request).await {
        Ok(replies) => {
            debug!(count = replies.len(), "Chatbot replied");
            replies_to_messages(replies)
        }
        Err(e) => {
            warn!(error = %e, "Chatbot request failed");
            vec![ChatMessage::bot(CONNECTION_ERROR_MESSAGE)]
        }
    })
}

/// Sends one user input and returns the messages it added to the
/// transcript. Blank input adds nothing.
pub async fn send(
    api: &ApiClient,
    auth: &Authenticator,
    state_dir: &Path,
    input: &str,
) -> Result<Vec<ChatMessage>, ClientError> {
    let session = auth.store().require()?;
    let input = input.trim();
    if input.is_empty() {
        return Ok(Vec::new());
    }

    let path = Transcript::path_for(state_dir, &session.user_id);
    let mut transcript = Transcript::load(&path)?;
    let mut added = Vec::new();

    match Shortcut::detect(input) {
        Some(shortcut) => {
            added.push(ChatMessage::bot(shortcut.reply()));
            if let Some(message) = shortcut.forward() {
                added.extend(forward(api, auth, &session.user_id, message, &mut transcript).await?);
            }
        }
        None => {
            added.push(ChatMessage::user(input));
            added.extend(forward(api, auth, &session.user_id, input, &mut transcript).await?);
        }
    }

    transcript.append(&added);
    transcript.save(&path)?;
    Ok(added)
}

pub fn history(auth: &Authenticator, state_dir: &Path) -> Result<Transcript, ClientError> {
    let session = auth.store().require()?;
    Transcript::load(&Transcript::path_for(state_dir, &session.user_id))
}

pub fn clear_history(auth: &Authenticator, state_dir: &Path) -> Result<Transcript, ClientError> {
    let session = auth.store().require()?;
    let path = Transcript::path_for(state_dir, &session.user_id);
    let mut transcript = Transcript::load(&path)?;
    transcript.reset();
    transcript.save(&path)?;
    Ok(transcript)
}

/// What the chatbot knows about the signed-in candidate for `jd_id`, or for
/// the detected posting when none is given.
pub async fn context(
    api: &ApiClient,
    auth: &Authenticator,
    state_dir: &Path,
    jd_id: Option<&str>,
) -> Result<CandidateContext, ClientError> {
    let session = auth.store().require()?;
    let user_id = session.user_id.as_str();
    let jd_id = match jd_id {
        Some(id) => id.to_string(),
        None => {
            let path = Transcript::path_for(state_dir, user_id);
            let mut transcript = Transcript::load(&path)?;
            let id = resolve_jd_id(api, auth, user_id, &mut transcript)
                .await?
                .ok_or_else(|| {
                    ClientError::Validation(
                        "No application found. Pass a job id or apply to a job first.".to_string(),
                    )
                })?;
            transcript.save(&path)?;
            id
        }
    };
    let jd_id = jd_id.as_str();
    auth.with_auth(|token| async move { api.candidate_context(&token, user_id, jd_id).await })
        .await
}
