//! Wrapping of cyclic angles.
//!
//! Longitudes are shown in a window `[wrap - 360, wrap)`. Right ascension
//! and galactic longitude on a full-sky map use `wrap = 360` (`[0, 360)`);
//! maps centred on longitude zero use `wrap = 180` (`[-180, 180)`).
//!
//! ```
//! use celestial_core::angle::wrap_at;
//!
//! assert_eq!(wrap_at(-10.0, 360.0), 350.0);
//! assert_eq!(wrap_at(350.0, 180.0), -10.0);
//! ```

use crate::math::fmod;

/// Wraps `degrees` into `[wrap - 360, wrap)`.
pub fn wrap_at(degrees: f64, wrap: f64) -> f64 {
    if !degrees.is_finite() {
        return degrees;
    }
    let lower = wrap - 360.0;
    let mut offset = fmod(degrees - lower, 360.0);
    if offset < 0.0 {
        offset += 360.0;
    }
    let wrapped = lower + offset;
    if wrapped >= wrap {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Signed difference `to - from` folded into `[-180, 180)`.
pub fn wrapped_delta(from: f64, to: f64) -> f64 {
    wrap_at(to - from, 180.0)
}
