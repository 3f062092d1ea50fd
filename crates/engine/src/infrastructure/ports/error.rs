//! Error types for port operations.

/// Repository operation errors with context for debugging.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RepoError {
    /// Backing store failed (file unreadable, database locked, ...).
    #[error("Storage error in {operation}: {message}")]
    Storage {
        operation: &'static str,
        message: String,
    },

    /// Serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RepoError {
    /// Create a Storage error with operation context.
    pub fn storage(operation: &'static str, message: impl ToString) -> Self {
        Self::Storage {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }
}

/// Everything that can go wrong while asking the model for text.
///
/// Callers branch on the variant; [`LlmError::display_text`] renders the
/// sentence shown to authors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LlmError {
    #[error("LLM request timed out")]
    Timeout,
    #[error("Could not connect to the LLM server")]
    ConnectionRefused,
    #[error("LLM server returned status code {status}")]
    ServerError { status: u16 },
    #[error("Malformed LLM response: {0}")]
    Malformed(String),
    #[error("LLM request failed: {0}")]
    RequestFailed(String),
    #[error("Generation cancelled")]
    Cancelled,
}

impl LlmError {
    /// Human-readable sentence, always starting with `Error:`.
    pub fn display_text(&self) -> String {
        match self {
            LlmError::ServerError { status } => {
                format!("Error: API returned status code {}", status)
            }
            LlmError::Timeout => {
                "Error: Request timed out. The generation may be too long.".to_string()
            }
            LlmError::ConnectionRefused => {
                "Error: Could not connect to Ollama. Make sure it's running.".to_string()
            }
            LlmError::Cancelled => "Error: Generation was cancelled.".to_string(),
            LlmError::Malformed(message) | LlmError::RequestFailed(message) => {
                format!("Error: {}", message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_text_always_starts_with_error_marker() {
        let errors = [
            LlmError::Timeout,
            LlmError::ConnectionRefused,
            LlmError::ServerError { status: 503 },
            LlmError::Malformed("expected value".into()),
            LlmError::RequestFailed("builder error".into()),
            LlmError::Cancelled,
        ];
        for err in errors {
            assert!(err.display_text().starts_with("Error:"), "{err:?}");
        }
    }

    #[test]
    fn server_error_mentions_status() {
        let err = LlmError::ServerError { status: 500 };
        assert!(err.display_text().contains("500"));
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn connection_error_mentions_connect() {
        assert!(LlmError::ConnectionRefused.display_text().contains("connect"));
    }

    #[test]
    fn repo_storage_error_carries_operation() {
        let err = RepoError::storage("load_bundle", "permission denied");
        assert_eq!(err.to_string(), "Storage error in load_bundle: permission denied");
    }
}
