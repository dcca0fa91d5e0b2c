//! Sky frames for coordinate overlays.
//!
//! An overlay shows a second celestial frame on the same pixels. Its world
//! values are the main frame's world values pushed through a
//! [`FrameConversion`]. Conversions come from a [`FrameResolver`], so the
//! host application can plug in a full astrometry library; the built-in
//! [`SkyFrameResolver`] covers ICRS, FK5 and galactic coordinates with a
//! fixed rotation.

use core::fmt;
use core::str::FromStr;
use std::rc::Rc;

use celestial_core::CoordinateKind;

use crate::coordinate::WorldCoord;
use crate::error::{WcsError, WcsResult};

/// Rotation taking ICRS unit vectors to galactic unit vectors (row-major).
///
/// Liu, Zhu & Zhang (2011), A&A 526, A16; the same matrix as ERFA's
/// `eraIcrs2g`. Its transpose goes the other way.
#[allow(clippy::excessive_precision)]
pub const ICRS_TO_GALACTIC: [[f64; 3]; 3] = [
    [
        -0.054875560416215368492398900454,
        -0.873437090234885048760383168409,
        -0.483835015548713226831774175116,
    ],
    [
        0.494109427875583673525222371358,
        -0.444829629960011178146614061616,
        0.746982244497218890527388004556,
    ],
    [
        -0.867666149019004701181616534570,
        -0.198076373431201528180486091412,
        0.455983776175066922272100478348,
    ],
];

/// Converts a (longitude, latitude) pair, in degrees, between two frames.
pub trait FrameConversion: fmt::Debug {
    fn forward(&self, world: WorldCoord) -> WcsResult<WorldCoord>;

    fn inverse(&self, world: WorldCoord) -> WcsResult<WorldCoord>;

    /// Kinds of the converted axes.
    fn kinds(&self) -> [CoordinateKind; 2] {
        [CoordinateKind::longitude(), CoordinateKind::Latitude]
    }
}

/// Builds the conversion from the main frame to a named frame.
///
/// Failures are reported as-is to whoever asked for the overlay.
pub trait FrameResolver: fmt::Debug {
    fn resolve(&self, frame: &str) -> WcsResult<Rc<dyn FrameConversion>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkyFrame {
    Icrs,
    /// Treated as ICRS; the two agree to well under the readout resolution.
    Fk5,
    Galactic,
}

impl SkyFrame {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Icrs => "icrs",
            Self::Fk5 => "fk5",
            Self::Galactic => "galactic",
        }
    }

    fn is_equatorial(&self) -> bool {
        matches!(self, Self::Icrs | Self::Fk5)
    }
}

impl FromStr for SkyFrame {
    type Err = WcsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "icrs" => Ok(Self::Icrs),
            "fk5" => Ok(Self::Fk5),
            "galactic" | "gal" => Ok(Self::Galactic),
            _ => Err(WcsError::unknown_frame(s)),
        }
    }
}

impl fmt::Display for SkyFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed rotation between two [`SkyFrame`]s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRotation {
    from: SkyFrame,
    to: SkyFrame,
    matrix: [[f64; 3]; 3],
}

impl FrameRotation {
    pub fn new(from: SkyFrame, to: SkyFrame) -> Self {
        let matrix = match (from.is_equatorial(), to.is_equatorial()) {
            (true, false) => ICRS_TO_GALACTIC,
            (false, true) => transpose(&ICRS_TO_GALACTIC),
            _ => [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        };
        Self { from, to, matrix }
    }

    #[inline]
    pub fn from_frame(&self) -> SkyFrame {
        self.from
    }

    #[inline]
    pub fn to_frame(&self) -> SkyFrame {
        self.to
    }
}

impl FrameConversion for FrameRotation {
    fn forward(&self, world: WorldCoord) -> WcsResult<WorldCoord> {
        rotate(&self.matrix, world)
    }

    fn inverse(&self, world: WorldCoord) -> WcsResult<WorldCoord> {
        rotate(&transpose(&self.matrix), world)
    }
}

/// Resolves frame names to [`FrameRotation`]s from a fixed main frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkyFrameResolver {
    base: SkyFrame,
}

impl SkyFrameResolver {
    pub fn new(base: SkyFrame) -> Self {
        Self { base }
    }

    #[inline]
    pub fn base(&self) -> SkyFrame {
        self.base
    }
}

impl FrameResolver for SkyFrameResolver {
    fn resolve(&self, frame: &str) -> WcsResult<Rc<dyn FrameConversion>> {
        let rotation = FrameRotation::new(self.base(), frame.parse()?);
        tracing::debug!(
            from = %rotation.from_frame(),
            to = %rotation.to_frame(),
            "resolved frame rotation"
        );
        Ok(Rc::new(rotation))
    }
}

fn transpose(m: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let mut t = [[0.0; 3]; 3];
    for (i, row) in m.iter().enumerate() {
        for (j, value) in row.iter().enumerate() {
            t[j][i] = *value;
        }
    }
    t
}

fn rotate(m: &[[f64; 3]; 3], world: WorldCoord) -> WcsResult<WorldCoord> {
    if !world.is_finite() {
        return Err(WcsError::out_of_bounds("non-finite sky position"));
    }
    let (sin_lon, cos_lon) = libm::sincos(world.get(0).to_radians());
    let (sin_lat, cos_lat) = libm::sincos(world.get(1).to_radians());
    let v = [cos_lon * cos_lat, sin_lon * cos_lat, sin_lat];

    let r: Vec<f64> = m
        .iter()
        .map(|row| row[0] * v[0] + row[1] * v[1] + row[2] * v[2])
        .collect();

    let d2 = r[0] * r[0] + r[1] * r[1];
    let lon = if d2 != 0.0 { libm::atan2(r[1], r[0]) } else { 0.0 };
    let lat = libm::atan2(r[2], libm::sqrt(d2));
    Ok(WorldCoord::new(
        celestial_core::angle::wrap_at(lon.to_degrees(), 360.0),
        lat.to_degrees(),
    ))
}
