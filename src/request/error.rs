//! Error types for export request validation.

use thiserror::Error;

/// Errors that can occur while validating raw export input.
///
/// Every variant is detected locally, before any network call, and is
/// recoverable by correcting the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A CRN entry did not parse as an integer.
    #[error("some CRN entries are not valid: '{token}' is not an integer\n  Suggestion: enter comma-separated CRNs (e.g. 70851,71022)")]
    InvalidCrn {
        /// The offending token, trimmed.
        token: String,
    },

    /// The semester config name is empty.
    #[error("config name must not be empty\n  Suggestion: pass the semester config id shown by your institution (e.g. fall2022)")]
    EmptyConfig,
}

impl ValidationError {
    /// Creates an `InvalidCrn` error for a token that failed integer parsing.
    #[must_use]
    pub fn invalid_crn(token: &str) -> Self {
        Self::InvalidCrn {
            token: token.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_crn_message_names_token() {
        let err = ValidationError::invalid_crn("abc");
        let msg = err.to_string();
        assert!(msg.contains("not valid"), "should state invalidity: {msg}");
        assert!(msg.contains("'abc'"), "should name the token: {msg}");
        assert!(msg.contains("comma-separated"), "should carry suggestion: {msg}");
    }

    #[test]
    fn test_empty_config_message() {
        let msg = ValidationError::EmptyConfig.to_string();
        assert!(msg.contains("config name"), "should name the field: {msg}");
    }
}
