use thiserror::Error;

/// Top-level error type shared by the kroaddy crates.
///
/// Subsystem crates define their own error types and implement
/// `From<SubsystemError> for KroaddyError` where they need `?` to cross
/// crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KroaddyError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
}

impl From<toml::de::Error> for KroaddyError {
    fn from(err: toml::de::Error) -> Self {
        KroaddyError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for KroaddyError {
    fn from(err: toml::ser::Error) -> Self {
        KroaddyError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for KroaddyError {
    fn from(err: serde_json::Error) -> Self {
        KroaddyError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for kroaddy operations.
pub type Result<T> = std::result::Result<T, KroaddyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = KroaddyError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");

        let err = KroaddyError::UnsupportedLanguage("fr".to_string());
        assert_eq!(err.to_string(), "Unsupported language: fr");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: KroaddyError = io_err.into();
        assert!(matches!(err, KroaddyError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("this is = = not toml").unwrap_err();
        let err: KroaddyError = toml_err.into();
        assert!(matches!(err, KroaddyError::Config(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: KroaddyError = json_err.into();
        assert!(matches!(err, KroaddyError::Serialization(_)));
    }
}
