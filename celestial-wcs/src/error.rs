use thiserror::Error;

pub type WcsResult<T> = Result<T, WcsError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WcsError {
    #[error("Missing required WCS keyword: {keyword}")]
    MissingKeyword { keyword: String },

    #[error("Invalid WCS keyword '{keyword}': {message}")]
    InvalidKeyword { keyword: String, message: String },

    #[error("Dimension mismatch: expected {expected} values, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Invalid slice: {message}")]
    InvalidSlice { message: String },

    #[error("Coordinate out of bounds: {message}")]
    OutOfBounds { message: String },

    #[error("Singularity in transformation: {message}")]
    Singularity { message: String },

    #[error("Non-invertible matrix (determinant = {determinant})")]
    NonInvertibleMatrix { determinant: f64 },

    #[error("Unknown coordinate frame: {name}")]
    UnknownFrame { name: String },
}

impl WcsError {
    pub fn missing_keyword(keyword: impl Into<String>) -> Self {
        Self::MissingKeyword {
            keyword: keyword.into(),
        }
    }

    pub fn invalid_keyword(keyword: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidKeyword {
            keyword: keyword.into(),
            message: message.into(),
        }
    }

    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    pub fn invalid_slice(message: impl Into<String>) -> Self {
        Self::InvalidSlice {
            message: message.into(),
        }
    }

    pub fn out_of_bounds(message: impl Into<String>) -> Self {
        Self::OutOfBounds {
            message: message.into(),
        }
    }

    pub fn singularity(message: impl Into<String>) -> Self {
        Self::Singularity {
            message: message.into(),
        }
    }

    pub fn non_invertible_matrix(determinant: f64) -> Self {
        Self::NonInvertibleMatrix { determinant }
    }

    pub fn unknown_frame(name: impl Into<String>) -> Self {
        Self::UnknownFrame { name: name.into() }
    }

    /// `true` for failures caused by where the pointer is rather than by how
    /// the transform was configured.
    pub fn is_domain_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. } | Self::Singularity { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keyword() {
        let err = WcsError::missing_keyword("CRPIX1");
        assert!(err.to_string().contains("CRPIX1"));
    }

    #[test]
    fn test_invalid_keyword() {
        let err = WcsError::invalid_keyword("NAXIS", "must be positive");
        assert!(err.to_string().contains("NAXIS"));
        assert!(err.to_string().contains("must be positive"));
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = WcsError::dimension_mismatch(3, 2);
        assert_eq!(
            err.to_string(),
            "Dimension mismatch: expected 3 values, got 2"
        );
    }

    #[test]
    fn test_invalid_slice() {
        let err = WcsError::invalid_slice("expected one 'x' marker");
        assert!(err.to_string().contains("expected one 'x' marker"));
    }

    #[test]
    fn test_unknown_frame() {
        let err = WcsError::unknown_frame("fk9");
        assert!(err.to_string().contains("fk9"));
    }

    #[test]
    fn test_domain_errors() {
        assert!(WcsError::out_of_bounds("outside projection").is_domain_error());
        assert!(WcsError::singularity("pole").is_domain_error());
        assert!(!WcsError::invalid_slice("bad").is_domain_error());
        assert!(!WcsError::non_invertible_matrix(0.0).is_domain_error());
    }
}
