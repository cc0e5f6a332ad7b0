//! Error types for the home-screen chat engine.

use std::fmt;

/// Why an in-flight request was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CancelReason {
    /// The request ran past its deadline.
    Timeout,
    /// A newer utterance replaced it.
    Superseded,
    /// The conversation was reset.
    Reset,
    /// The hosting session was torn down.
    Teardown,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CancelReason::Timeout => "timeout",
            CancelReason::Superseded => "superseded",
            CancelReason::Reset => "reset",
            CancelReason::Teardown => "teardown",
        };
        f.write_str(s)
    }
}

/// Errors from the chat engine.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),
    #[error("request cancelled: {0}")]
    Cancelled(CancelReason),
    #[error("backend error: {0}")]
    Backend(String),
    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl ChatError {
    /// Whether this error came from cancellation rather than a failure.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, ChatError::Cancelled(_))
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(err: serde_json::Error) -> Self {
        ChatError::MalformedResponse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_error_display() {
        assert_eq!(ChatError::EmptyMessage.to_string(), "message cannot be empty");
        assert_eq!(
            ChatError::MessageTooLong(2000).to_string(),
            "message exceeds maximum length of 2000 characters"
        );
        assert_eq!(
            ChatError::Cancelled(CancelReason::Timeout).to_string(),
            "request cancelled: timeout"
        );
        assert_eq!(
            ChatError::Backend("connection refused".to_string()).to_string(),
            "backend error: connection refused"
        );
        assert_eq!(
            ChatError::Status {
                status: 502,
                body: "bad gateway".to_string()
            }
            .to_string(),
            "backend returned status 502: bad gateway"
        );
    }

    #[test]
    fn test_cancellation_is_distinguishable() {
        assert!(ChatError::Cancelled(CancelReason::Superseded).is_cancellation());
        assert!(!ChatError::Backend("boom".into()).is_cancellation());
        assert!(!ChatError::MalformedResponse("eof".into()).is_cancellation());
    }

    #[test]
    fn test_from_json_error_is_malformed() {
        let err: ChatError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, ChatError::MalformedResponse(_)));
    }

    #[test]
    fn test_cancel_reason_display() {
        assert_eq!(CancelReason::Superseded.to_string(), "superseded");
        assert_eq!(CancelReason::Reset.to_string(), "reset");
        assert_eq!(CancelReason::Teardown.to_string(), "teardown");
    }
}
