//! Validation error types

use std::fmt;

/// Validation error for submitted school data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field is absent or blank
    Missing { field: &'static str },

    /// Field holds a NUL character, which text columns can't store
    InvalidCharacters { field: &'static str },

    /// Field exceeds the column width
    TooLong { field: &'static str, max: usize },

    /// Email doesn't look like `x@y.z`
    InvalidEmail,

    /// Contact isn't 7-15 digits
    InvalidContact,

    /// No image file (or an empty one) was uploaded
    MissingImage,
}

impl ValidationError {
    /// The form field this error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Missing { field }
            | Self::InvalidCharacters { field }
            | Self::TooLong { field, .. } => field,
            Self::InvalidEmail => "email",
            Self::InvalidContact => "contact",
            Self::MissingImage => "image",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "Missing field: {}", field),
            Self::InvalidCharacters { field } => write!(f, "{} contains invalid characters", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidEmail => f.write_str("Invalid email"),
            Self::InvalidContact => f.write_str("Invalid contact number"),
            Self::MissingImage => f.write_str("Image is required"),
        }
    }
}

impl std::error::Error for ValidationError {}
