//! Overlay coordinate sets.
//!
//! Overlays are created on first request for a frame name and live as long
//! as the display. Their indices follow creation order, start at 0 and
//! never change.

use std::collections::HashMap;
use std::ops::{Index, IndexMut};

use celestial_wcs::{DisplayTransform, FrameResolver};

use crate::coords::{CoordinateAxis, CoordinateSet};
use crate::error::{AxesError, AxesResult};

/// A second set of world coordinates drawn over the same pixels.
#[derive(Debug, Clone)]
pub struct Overlay {
    index: usize,
    frame: String,
    coords: CoordinateSet,
}

impl Overlay {
    pub fn index(&self) -> usize {
        self.index
    }

    /// Frame name the overlay was requested with.
    pub fn frame(&self) -> &str {
        &self.frame
    }

    pub fn coords(&self) -> &CoordinateSet {
        &self.coords
    }

    pub fn coords_mut(&mut self) -> &mut CoordinateSet {
        &mut self.coords
    }
}

impl Index<usize> for Overlay {
    type Output = CoordinateAxis;

    fn index(&self, axis: usize) -> &CoordinateAxis {
        &self.coords[axis]
    }
}

impl IndexMut<usize> for Overlay {
    fn index_mut(&mut self, axis: usize) -> &mut CoordinateAxis {
        &mut self.coords[axis]
    }
}

/// Append-only list of overlays, looked up by index or frame name.
#[derive(Debug, Clone, Default)]
pub struct OverlayRegistry {
    overlays: Vec<Overlay>,
    by_frame: HashMap<String, usize>,
}

impl OverlayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Overlay> {
        self.overlays.iter()
    }

    pub fn get(&self, index: usize) -> AxesResult<&Overlay> {
        let count = self.overlays.len();
        self.overlays
            .get(index)
            .ok_or_else(|| AxesError::overlay_not_found(index, count))
    }

    pub fn get_mut(&mut self, index: usize) -> AxesResult<&mut Overlay> {
        let count = self.overlays.len();
        self.overlays
            .get_mut(index)
            .ok_or_else(|| AxesError::overlay_not_found(index, count))
    }

    /// Index of the overlay registered for `frame`, ignoring case and
    /// surrounding whitespace.
    pub fn find(&self, frame: &str) -> Option<usize> {
        self.by_frame.get(&frame_key(frame)).copied()
    }

    /// Returns the overlay for `frame`, creating it on top of `base` if it
    /// does not exist yet.
    ///
    /// Resolver failures leave the registry unchanged.
    pub fn get_or_create(
        &mut self,
        frame: &str,
        base: &DisplayTransform,
        resolver: &dyn FrameResolver,
    ) -> AxesResult<&mut Overlay> {
        let index = match self.find(frame) {
            Some(index) => index,
            None => {
                let conversion = resolver
                    .resolve(frame)
                    .map_err(|source| AxesError::frame(frame, source))?;
                let index = self.overlays.len();
                let transform = DisplayTransform::overlay(base.clone(), conversion);
                self.overlays.push(Overlay {
                    index,
                    frame: frame.to_string(),
                    coords: CoordinateSet::new(transform),
                });
                self.by_frame.insert(frame_key(frame), index);
                tracing::debug!(frame, index, "overlay created");
                index
            }
        };
        self.get_mut(index)
    }
}

fn frame_key(frame: &str) -> String {
    frame.trim().to_ascii_lowercase()
}
