//! The pixel/world boundary.
//!
//! A [`Transform`] is whatever WCS implementation the host application
//! provides. This workspace never looks inside one: it only calls the two
//! mapping functions and asks what each world axis measures.

use core::fmt;

use celestial_core::CoordinateKind;

use crate::error::WcsResult;

/// An N-dimensional pixel to world mapping.
///
/// Pixel and world vectors have the same length, [`dims`](Self::dims),
/// fixed at construction. Pixel coordinates are 0-based. Implementations
/// report positions outside their valid domain with a domain error
/// ([`WcsError::is_domain_error`](crate::WcsError::is_domain_error)).
pub trait Transform: fmt::Debug {
    fn dims(&self) -> usize;

    /// What each world axis measures, in axis order.
    fn world_kinds(&self) -> Vec<CoordinateKind>;

    fn pixel_to_world(&self, pixel: &[f64]) -> WcsResult<Vec<f64>>;

    fn world_to_pixel(&self, world: &[f64]) -> WcsResult<Vec<f64>>;
}
