//! Result and error types for Escriba.

use thiserror::Error;

/// Result type for Escriba operations
pub type EscribaResult<T> = Result<T, EscribaError>;

/// Errors that can occur in Escriba
#[derive(Debug, Error)]
pub enum EscribaError {
    /// Instruction text was empty or whitespace-only
    #[error("Empty instruction: nothing to resolve")]
    EmptyInstruction,

    /// Base URL could not be used
    #[error("Invalid base URL '{url}': {message}")]
    InvalidBaseUrl {
        /// The offending URL
        url: String,
        /// Why it was rejected
        message: String,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl EscribaError {
    /// Create an invalid-base-URL error
    #[must_use]
    pub fn invalid_base_url(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidBaseUrl {
            url: url.into(),
            message: message.into(),
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_base_url_display() {
        let err = EscribaError::invalid_base_url("not a url", "missing scheme");
        assert!(err.to_string().contains("not a url"));
        assert!(err.to_string().contains("missing scheme"));
    }

    #[test]
    fn json_error_converts() {
        let err: EscribaError = serde_json::from_str::<i32>("not json").unwrap_err().into();
        assert!(matches!(err, EscribaError::Json(_)));
    }
}
