//! Validation error types

use std::fmt;

/// Validation error for incoming domain payloads
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Numeric field is outside its allowed range
    OutOfRange { field: &'static str, reason: &'static str },

    /// Date range is inverted (end before start)
    InvertedRange { field: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::OutOfRange { field, reason } => write!(f, "{}: {}", field, reason),
            Self::InvertedRange { field } => {
                write!(f, "{} must not end before it starts", field)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::OutOfRange {
            field: "cost",
            reason: "must be a non-negative, finite number",
        };
        assert_eq!(err.to_string(), "cost: must be a non-negative, finite number");
    }
}
