//! Validation error types

use std::fmt;

/// Validation error for request input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more required fields are missing or empty
    Required { fields: &'static str },

    /// Query parameter is not an integer
    InvalidNumber { field: &'static str, value: String },

    /// Path id is not an integer
    InvalidId { value: String },

    /// Request body could not be read as JSON
    MalformedBody { reason: String },

    /// Query string could not be parsed (e.g. a repeated parameter)
    MalformedQuery { reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required { fields } => write!(f, "{} are required", fields),
            Self::InvalidNumber { field, value } => {
                write!(f, "{} must be an integer, got '{}'", field, value)
            }
            Self::InvalidId { value } => write!(f, "Invalid ID: '{}'", value),
            Self::MalformedBody { .. } => write!(f, "Invalid request body"),
            Self::MalformedQuery { .. } => write!(f, "Invalid query string"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::Required {
            fields: "Title and content",
        };
        assert_eq!(err.to_string(), "Title and content are required");

        let err = ValidationError::InvalidNumber {
            field: "page",
            value: "abc".into(),
        };
        assert_eq!(err.to_string(), "page must be an integer, got 'abc'");
    }

    #[test]
    fn malformed_body_hides_reason_from_message() {
        let err = ValidationError::MalformedBody {
            reason: "expected value at line 1 column 1".into(),
        };
        assert_eq!(err.to_string(), "Invalid request body");
    }
}
