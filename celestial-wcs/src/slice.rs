//! Reducing an N-dimensional WCS to the 2D display.
//!
//! A [`SliceSpec`] has one entry per pixel axis of the transform. Exactly one
//! entry is [`SliceEntry::X`] (the horizontal display axis), exactly one is
//! [`SliceEntry::Y`] (vertical), and every other axis is pinned to a fixed
//! pixel value.
//!
//! ```
//! use celestial_wcs::{SliceEntry, SliceSpec};
//!
//! // a cube shown with axis 2 horizontal, axis 0 vertical, plane 50 of axis 1
//! let slice: SliceSpec = "y 50 x".parse().unwrap();
//! assert_eq!(slice.x_index(), 2);
//! assert_eq!(slice.y_index(), 0);
//! assert_eq!(slice.full_pixel(1.5, 7.0), vec![7.0, 50.0, 1.5]);
//! assert_eq!(slice.entries()[1], SliceEntry::Fixed(50.0));
//! ```

use core::str::FromStr;

use crate::error::{WcsError, WcsResult};
use crate::transform::Transform;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SliceEntry {
    /// Displayed horizontally.
    X,
    /// Displayed vertically.
    Y,
    /// Pinned to this pixel value.
    Fixed(f64),
}

impl FromStr for SliceEntry {
    type Err = WcsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "x" | "X" => Ok(Self::X),
            "y" | "Y" => Ok(Self::Y),
            other => other
                .parse::<f64>()
                .map(Self::Fixed)
                .map_err(|_| WcsError::invalid_slice(format!("unrecognized entry '{other}'"))),
        }
    }
}

/// Validated, immutable slice specification.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceSpec {
    entries: Vec<SliceEntry>,
    x_index: usize,
    y_index: usize,
}

impl SliceSpec {
    pub fn new(entries: Vec<SliceEntry>) -> WcsResult<Self> {
        let mut x_index = None;
        let mut y_index = None;
        for (index, entry) in entries.iter().enumerate() {
            match entry {
                SliceEntry::X if x_index.is_some() => {
                    return Err(WcsError::invalid_slice("more than one 'x' display axis"))
                }
                SliceEntry::Y if y_index.is_some() => {
                    return Err(WcsError::invalid_slice("more than one 'y' display axis"))
                }
                SliceEntry::X => x_index = Some(index),
                SliceEntry::Y => y_index = Some(index),
                SliceEntry::Fixed(value) if !value.is_finite() => {
                    return Err(WcsError::invalid_slice(format!(
                        "fixed value of axis {index} is not finite"
                    )))
                }
                SliceEntry::Fixed(_) => {}
            }
        }

        match (x_index, y_index) {
            (Some(x_index), Some(y_index)) => Ok(Self {
                entries,
                x_index,
                y_index,
            }),
            _ => Err(WcsError::invalid_slice(
                "exactly one 'x' and one 'y' display axis are required",
            )),
        }
    }

    /// `[X, Y]`, the slice of a plain 2D transform.
    pub fn identity() -> Self {
        Self {
            entries: vec![SliceEntry::X, SliceEntry::Y],
            x_index: 0,
            y_index: 1,
        }
    }

    #[inline]
    pub fn entries(&self) -> &[SliceEntry] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn x_index(&self) -> usize {
        self.x_index
    }

    #[inline]
    pub fn y_index(&self) -> usize {
        self.y_index
    }

    /// Fails unless the slice has one entry per axis of a `dims`-dimensional transform.
    pub fn check_dims(&self, dims: usize) -> WcsResult<()> {
        if self.len() != dims {
            return Err(WcsError::invalid_slice(format!(
                "slice has {} entries but the transform has {dims} axes",
                self.len()
            )));
        }
        Ok(())
    }

    /// Full pixel vector for display position `(x, y)`, in original axis order.
    pub fn full_pixel(&self, x: f64, y: f64) -> Vec<f64> {
        self.entries
            .iter()
            .map(|entry| match entry {
                SliceEntry::X => x,
                SliceEntry::Y => y,
                SliceEntry::Fixed(value) => *value,
            })
            .collect()
    }
}

impl FromStr for SliceSpec {
    type Err = WcsError;

    /// Whitespace or comma separated entries, e.g. `"y, 50, x"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let entries = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(str::parse)
            .collect::<WcsResult<Vec<SliceEntry>>>()?;
        Self::new(entries)
    }
}

/// Maps display position `pixel` through `transform` with the hidden axes
/// pinned by `slice`, returning the full world vector.
pub fn reduce(transform: &dyn Transform, slice: &SliceSpec, pixel: (f64, f64)) -> WcsResult<Vec<f64>> {
    slice.check_dims(transform.dims())?;
    transform.pixel_to_world(&slice.full_pixel(pixel.0, pixel.1))
}
