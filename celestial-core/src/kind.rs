//! What a world axis measures.

use crate::format::FormatSpec;

/// Physical meaning of one world axis.
///
/// The kind decides how raw values are normalized before formatting and
/// which [`FormatSpec`] an axis starts out with.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CoordinateKind {
    /// Cyclic angle in degrees, wrapped into `[wrap - 360, wrap)`.
    Longitude { wrap: f64 },
    /// Angle in degrees, `[-90, 90]`.
    Latitude,
    /// Plain number with no angular meaning.
    Scalar,
    /// Spectral value (frequency, wavelength, velocity).
    Spectral,
}

impl CoordinateKind {
    /// Longitude wrapped at 360 degrees, i.e. `[0, 360)`.
    pub fn longitude() -> Self {
        Self::Longitude { wrap: 360.0 }
    }

    pub fn is_angle(&self) -> bool {
        matches!(self, Self::Longitude { .. } | Self::Latitude)
    }

    /// Format an axis of this kind uses before anyone configures it.
    ///
    /// Angles render as whole-arcsecond `dd:mm:ss`; scalars and spectral
    /// values as their shortest exact decimal.
    pub fn default_format(&self) -> FormatSpec {
        if self.is_angle() {
            FormatSpec::dms(3, 0)
        } else {
            FormatSpec::plain()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FormatBase;

    #[test]
    fn test_angle_kinds() {
        assert!(CoordinateKind::longitude().is_angle());
        assert!(CoordinateKind::Latitude.is_angle());
        assert!(!CoordinateKind::Scalar.is_angle());
        assert!(!CoordinateKind::Spectral.is_angle());
    }

    #[test]
    fn test_default_formats() {
        let spec = CoordinateKind::Latitude.default_format();
        assert_eq!(spec, FormatSpec::dms(3, 0));
        let spec = CoordinateKind::Spectral.default_format();
        assert_eq!(spec.base, FormatBase::Plain);
    }
}
