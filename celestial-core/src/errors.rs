//! Error types for coordinate formatting.
//!
//! Rendering a number never fails; only the two text-facing operations do:
//! turning a format string such as `"dd:mm:ss.s"` into a [`FormatSpec`] and
//! reading a formatted coordinate back into a number.
//!
//! | Variant | Raised by |
//! |---------|-----------|
//! | [`InvalidFormat`](FormatError::InvalidFormat) | [`FormatSpec::parse`] |
//! | [`Parse`](FormatError::Parse) | [`parse_coordinate`](crate::parse_coordinate) |
//!
//! [`FormatSpec::parse`]: crate::FormatSpec::parse

use thiserror::Error;

/// Failure to understand a format string or a formatted coordinate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    /// The format string is not part of the format grammar.
    #[error("Invalid format '{format}': {message}")]
    InvalidFormat { format: String, message: String },

    /// A formatted coordinate could not be read back.
    #[error("Cannot parse '{input}': {message}")]
    Parse { input: String, message: String },
}

/// Convenience alias for `Result<T, FormatError>`.
pub type FormatResult<T> = Result<T, FormatError>;

impl FormatError {
    /// Creates an [`InvalidFormat`](Self::InvalidFormat) error.
    pub fn invalid_format(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            format: format.into(),
            message: message.into(),
        }
    }

    /// Creates a [`Parse`](Self::Parse) error.
    pub fn parse(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            input: input.into(),
            message: message.into(),
        }
    }
}
