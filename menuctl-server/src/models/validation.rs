//! Validation error types
//!
//! Every field failure is reported as a `{field, reason}` pair. A request
//! collects all of its failures into [`ValidationErrors`] before any store
//! access happens.

use std::fmt;

use serde::Serialize;

/// Validation error for a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field was not supplied
    Missing { field: &'static str },

    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Value doesn't match required format
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Numeric value outside the accepted range
    OutOfRange { field: &'static str, reason: &'static str },

    /// Value is not a member of a fixed label set
    InvalidVariant {
        field: &'static str,
        value: String,
        allowed: &'static [&'static str],
    },
}

impl ValidationError {
    /// Name of the offending field, in wire (camelCase) form.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Missing { field }
            | Self::Empty { field }
            | Self::TooLong { field, .. }
            | Self::InvalidFormat { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::InvalidVariant { field, .. } => field,
        }
    }

    /// Human-readable reason, without the field name.
    pub fn reason(&self) -> String {
        match self {
            Self::Missing { .. } => "is required".to_owned(),
            Self::Empty { .. } => "cannot be empty".to_owned(),
            Self::TooLong { max, .. } => {
                format!("exceeds maximum length of {} characters", max)
            }
            Self::InvalidFormat { reason, .. } | Self::OutOfRange { reason, .. } => {
                (*reason).to_owned()
            }
            Self::InvalidVariant { value, allowed, .. } => {
                format!("'{}' is not one of: {}", value, allowed.join(", "))
            }
        }
    }

    /// Enum membership failures surface as `InvalidArgument` rather than
    /// `ValidationFailed`.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidVariant { .. })
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field(), self.reason())
    }
}

impl std::error::Error for ValidationError {}

/// `{field, reason}` pair as it appears in error response bodies
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub reason: String,
}

impl From<&ValidationError> for FieldError {
    fn from(e: &ValidationError) -> Self {
        Self {
            field: e.field(),
            reason: e.reason(),
        }
    }
}

/// All validation failures for one request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    /// Record the error half of a field check, keeping the value on success.
    pub fn check<T>(&mut self, result: Result<T, ValidationError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.0.push(e);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// True when every failure is an enum membership failure.
    pub fn is_invalid_argument(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(ValidationError::is_invalid_argument)
    }

    pub fn field_errors(&self) -> Vec<FieldError> {
        self.0.iter().map(FieldError::from).collect()
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(e: ValidationError) -> Self {
        Self(vec![e])
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "name",
            max: 100,
        };
        assert_eq!(
            err.to_string(),
            "name exceeds maximum length of 100 characters"
        );
    }

    #[test]
    fn invalid_variant_lists_allowed_values() {
        let err = ValidationError::InvalidVariant {
            field: "category",
            value: "pizza".into(),
            allowed: &["mains", "desserts"],
        };
        assert_eq!(err.reason(), "'pizza' is not one of: mains, desserts");
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn mixed_errors_are_not_invalid_argument() {
        let mut errors = ValidationErrors::new();
        errors.push(ValidationError::InvalidVariant {
            field: "category",
            value: "x".into(),
            allowed: &["mains"],
        });
        assert!(errors.is_invalid_argument());

        errors.push(ValidationError::Missing { field: "price" });
        assert!(!errors.is_invalid_argument());
        assert_eq!(errors.field_errors().len(), 2);
        assert_eq!(errors.field_errors()[1].field, "price");
    }

    #[test]
    fn empty_collection_is_ok() {
        assert!(ValidationErrors::new().into_result().is_ok());
        assert!(!ValidationErrors::new().is_invalid_argument());
    }
}
