use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::ClientError;
use crate::storage::{read_json, write_json_atomic};

pub const WELCOME_MESSAGE: &str = "Hi! I'm your interview prep assistant. I'll ask you personalized screening questions based on your resume and the job you applied to. Type 'yes' when you're ready to start!";
pub const WELCOME_WITH_JOB: &str = "Hi! I'm your interview prep assistant. I'll ask personalized questions based on your resume and the job. Ready to practice? (Type 'yes' to start)";
pub const WELCOME_WITHOUT_JOB: &str = "Hi! I'm your interview prep assistant. Upload a resume first to get personalized interview questions, or type 'yes' for general practice questions.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Bot,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

impl ChatMessage {
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }
}

/// A user's conversation with the assistant, plus the posting it is about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jd_id: Option<String>,
}

impl Default for Transcript {
    fn default() -> Self {
        Self {
            messages: vec![ChatMessage::bot(WELCOME_MESSAGE)],
            jd_id: None,
        }
    }
}

impl Transcript {
    pub fn path_for(state_dir: &Path, user_id: &str) -> PathBuf {
        state_dir.join(format!("chat_history_{user_id}.json"))
    }

    /// Loads the transcript at `path`; missing or unreadable files start a
    /// fresh conversation.
    pub fn load(path: &Path) -> Result<Self, ClientError> {
        Ok(read_json(path)?.unwrap_or_default())
    }

    pub fn save(&self, path: &Path) -> Result<(), ClientError> {
        write_json_atomic(path, self)?;
        Ok(())
    }

    pub fn append(&mut self, messages: &[ChatMessage]) {
        self.messages.extend_from_slice(messages);
    }

    /// Drops every message and starts over with a welcome that reflects
    /// whether a posting is known. The cached `jd_id` survives.
    pub fn reset(&mut self) {
        let welcome = if self.jd_id.is_some() {
            WELCOME_WITH_JOB
        } else {
            WELCOME_WITHOUT_JOB
        };
        self.messages = vec![ChatMessage::bot(welcome)];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_welcome() {
        let dir = tempfile::tempdir().unwrap();
        let path = Transcript::path_for(dir.path(), "u1");
        let transcript = Transcript::load(&path).unwrap();
        assert_eq!(transcript.messages, vec![ChatMessage::bot(WELCOME_MESSAGE)]);
        assert!(transcript.jd_id.is_none());
    }

    #[test]
    fn test_corrupt_file_gives_welcome() {
        let dir = tempfile::tempdir().unwrap();
        let path = Transcript::path_for(dir.path(), "u1");
        std::fs::write(&path, "not json").unwrap();
        assert_eq!(Transcript::load(&path).unwrap(), Transcript::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = Transcript::path_for(dir.path(), "u7");
        assert!(path.ends_with("chat_history_u7.json"));

        let mut transcript = Transcript::default();
        transcript.append(&[ChatMessage::user("Tell me about the role")]);
        transcript.jd_id = Some("j3".to_string());
        transcript.save(&path).unwrap();

        let reloaded = Transcript::load(&path).unwrap();
        assert_eq!(reloaded, transcript);
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains(r#""sender": "user""#));
    }

    #[test]
    fn test_reset_wording_depends_on_job() {
        let mut transcript = Transcript::default();
        transcript.append(&[ChatMessage::user("hello?")]);
        transcript.reset();
        assert_eq!(transcript.messages, vec![ChatMessage::bot(WELCOME_WITHOUT_JOB)]);

        transcript.jd_id = Some("j1".to_string());
        transcript.reset();
        assert_eq!(transcript.messages, vec![ChatMessage::bot(WELCOME_WITH_JOB)]);
        assert_eq!(transcript.jd_id.as_deref(), Some("j1"));
    }
}
