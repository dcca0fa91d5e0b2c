//! Error types for the coordinate display.
//!
//! | Variant | Cause | Handling |
//! |---------|-------|----------|
//! | [`InvalidSlice`](AxesError::InvalidSlice) | Malformed slice at construction | Raised, caller bug |
//! | [`Transform`](AxesError::Transform) | Other construction-time transform failure | Raised |
//! | [`OverlayNotFound`](AxesError::OverlayNotFound) | Overlay index out of range | Raised, caller bug |
//! | [`CoordinateUnavailable`](AxesError::CoordinateUnavailable) | Pointer outside the transform's domain | Replaced by a placeholder in [`readout`](crate::WorldCoordinateDisplay::readout) |
//! | [`Frame`](AxesError::Frame) | Overlay frame could not be built | Raised with the resolver's error as source |
//! | [`Format`](AxesError::Format) | Bad format pattern | Raised |
//! | [`Config`](AxesError::Config) | Invalid configuration | Raised |

use celestial_core::FormatError;
use celestial_wcs::WcsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AxesError {
    #[error("Invalid slice: {message}")]
    InvalidSlice { message: String },

    #[error("Transform error: {source}")]
    Transform {
        #[source]
        source: WcsError,
    },

    #[error("Overlay {index} not found ({count} registered)")]
    OverlayNotFound { index: usize, count: usize },

    #[error("Coordinates unavailable: {source}")]
    CoordinateUnavailable {
        #[source]
        source: WcsError,
    },

    #[error("Cannot create overlay for frame '{frame}': {source}")]
    Frame {
        frame: String,
        #[source]
        source: WcsError,
    },

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("Invalid configuration: {message}")]
    Config { message: String },
}

pub type AxesResult<T> = Result<T, AxesError>;

impl AxesError {
    pub fn overlay_not_found(index: usize, count: usize) -> Self {
        Self::OverlayNotFound { index, count }
    }

    pub fn coordinate_unavailable(source: WcsError) -> Self {
        Self::CoordinateUnavailable { source }
    }

    pub fn frame(frame: impl Into<String>, source: WcsError) -> Self {
        Self::Frame {
            frame: frame.into(),
            source,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

impl From<WcsError> for AxesError {
    /// Construction-time conversion: slice problems keep their own variant.
    fn from(err: WcsError) -> Self {
        match err {
            WcsError::InvalidSlice { message } => Self::InvalidSlice { message },
            other => Self::Transform { source: other },
        }
    }
}
