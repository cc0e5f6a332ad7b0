use kroaddy_chat::ChatError;
use thiserror::Error;

/// Errors from the HTTP clients.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The request never produced a response (connect, DNS, TLS, body read).
    #[error("request failed: {0}")]
    Request(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP error! status: {status}")]
    Status { status: u16, body: String },

    /// The response body was not the JSON we expected.
    #[error("response parse failed: {0}")]
    Parse(String),

    #[error("unsupported social login provider: {0}")]
    UnsupportedProvider(String),
}

impl From<ClientError> for ChatError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Status { status, body } => ChatError::Status { status, body },
            ClientError::Parse(msg) => ChatError::MalformedResponse(msg),
            other => ChatError::Backend(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_maps_to_chat_status() {
        let err: ChatError = ClientError::Status {
            status: 503,
            body: "down".into(),
        }
        .into();
        assert!(matches!(err, ChatError::Status { status: 503, .. }));
    }

    #[test]
    fn test_parse_maps_to_malformed() {
        let err: ChatError = ClientError::Parse("eof".into()).into();
        assert!(matches!(err, ChatError::MalformedResponse(m) if m == "eof"));
    }

    #[test]
    fn test_request_maps_to_backend() {
        let err: ChatError = ClientError::Request("connection refused".into()).into();
        assert!(matches!(err, ChatError::Backend(m) if m.contains("connection refused")));
        assert!(!ChatError::from(ClientError::Request("x".into())).is_cancellation());
    }

    #[test]
    fn test_status_display() {
        let err = ClientError::Status {
            status: 404,
            body: String::new(),
        };
        assert_eq!(err.to_string(), "HTTP error! status: 404");
    }
}
