//! Error types for `escriba-codegen`.

use thiserror::Error;

use crate::options::{Framework, Language};

/// Result type alias for codegen operations.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that can occur during code generation.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// The framework/language combination has no renderer
    #[error("Unsupported target: {framework} does not support {language}")]
    UnsupportedTarget {
        /// Requested framework
        framework: Framework,
        /// Requested language
        language: Language,
    },

    /// Manifest verification failed (file was manually modified)
    #[error("Manifest verification failed for '{path}': {reason}")]
    ManifestError {
        /// Path to the file
        path: String,
        /// Why verification failed
        reason: String,
    },

    /// Hash mismatch (generated file was modified)
    #[error("Hash mismatch for '{path}': expected {expected}, got {actual}")]
    HashMismatch {
        /// Path to the file
        path: String,
        /// Expected hash
        expected: String,
        /// Actual hash
        actual: String,
    },

    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_target_display() {
        let err = CodegenError::UnsupportedTarget {
            framework: Framework::Selenium,
            language: Language::TypeScript,
        };
        assert_eq!(
            err.to_string(),
            "Unsupported target: selenium does not support typescript"
        );
    }

    #[test]
    fn hash_mismatch_display() {
        let err = CodegenError::HashMismatch {
            path: "login.spec.ts".to_string(),
            expected: "abc123".to_string(),
            actual: "def456".to_string(),
        };
        assert!(err.to_string().contains("Hash mismatch"));
        assert!(err.to_string().contains("login.spec.ts"));
    }
}
