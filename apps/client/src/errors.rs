use thiserror::Error;

/// Client-level error type.
/// Every workflow and CLI handler returns `Result<T, ClientError>`; the CLI
/// turns it into a display string through [`ClientError::user_message`].
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Session expired: {0}")]
    SessionExpired(String),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Coarse grouping used to decide how an error is surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Expired access token. Recovered by the refresh wrapper.
    AuthExpired,
    /// Rejected input or a business rule (duplicate application, bad file).
    Business,
    /// Transport failure before a response arrived.
    Network,
    /// Session wiped or never present; the user must log in.
    SessionLost,
    Internal,
}

impl ClientError {
    /// HTTP status of an API error, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ClientError::Api { status: 401, .. } => ErrorCategory::AuthExpired,
            ClientError::Api { status, .. } if *status < 500 => ErrorCategory::Business,
            ClientError::Api { .. } => ErrorCategory::Internal,
            ClientError::Validation(_) | ClientError::Forbidden(_) => ErrorCategory::Business,
            ClientError::NotAuthenticated | ClientError::SessionExpired(_) => {
                ErrorCategory::SessionLost
            }
            ClientError::Http(e) if e.is_decode() => ErrorCategory::Internal,
            ClientError::Http(_) => ErrorCategory::Network,
            ClientError::Parse(_) | ClientError::Storage(_) | ClientError::Internal(_) => {
                ErrorCategory::Internal
            }
        }
    }

    /// Collapses the error into a message fit for an end user.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Validation(msg) | ClientError::Forbidden(msg) => msg.clone(),
            ClientError::NotAuthenticated => {
                "You are not logged in. Run `hireflow login` first.".to_string()
            }
            ClientError::SessionExpired(_) => {
                "Your session has expired. Please log in again.".to_string()
            }
            ClientError::Http(e) if e.is_decode() => {
                "Unexpected response from server.".to_string()
            }
            ClientError::Http(_) => "Network error. Please check your connection.".to_string(),
            ClientError::Parse(_) => "Unexpected response from server.".to_string(),
            ClientError::Storage(e) => format!("Could not access local state: {e}"),
            ClientError::Internal(e) => format!("{e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_only_for_401() {
        let err = ClientError::Api {
            status: 401,
            message: "Invalid token".to_string(),
        };
        assert!(err.is_unauthorized());
        assert_eq!(err.category(), ErrorCategory::AuthExpired);

        let err = ClientError::Api {
            status: 403,
            message: "Not authorized".to_string(),
        };
        assert!(!err.is_unauthorized());
        assert_eq!(err.category(), ErrorCategory::Business);
    }

    #[test]
    fn test_server_error_is_internal() {
        let err = ClientError::Api {
            status: 500,
            message: "Database error".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Internal);
        assert_eq!(err.user_message(), "Database error");
    }

    #[test]
    fn test_session_errors_are_session_lost() {
        assert_eq!(
            ClientError::NotAuthenticated.category(),
            ErrorCategory::SessionLost
        );
        let expired = ClientError::SessionExpired("Invalid token".to_string());
        assert_eq!(expired.category(), ErrorCategory::SessionLost);
        assert!(expired.user_message().contains("log in again"));
    }

    #[test]
    fn test_validation_message_passes_through() {
        let err = ClientError::Validation("File exceeds 10MB limit.".to_string());
        assert_eq!(err.user_message(), "File exceeds 10MB limit.");
        assert_eq!(err.status(), None);
    }
}
