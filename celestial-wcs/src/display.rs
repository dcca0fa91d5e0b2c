//! Transforms as the 2D display sees them.
//!
//! Whatever the shape of the underlying WCS, the display needs one thing:
//! a display pixel `(x, y)` in, the two world values of the displayed axes
//! out, and the way back for gridlines. [`DisplayTransform`] is the closed
//! set of ways to get that:
//!
//! - [`Main`](DisplayTransform::Main): a 2D transform used as is,
//! - [`Sliced`](DisplayTransform::Sliced): an N-dimensional transform with
//!   its hidden axes pinned by a [`SliceSpec`],
//! - [`Overlay`](DisplayTransform::Overlay): another display transform
//!   followed by a [`FrameConversion`].

use std::rc::Rc;

use celestial_core::CoordinateKind;

use crate::coordinate::{PixelCoord, WorldCoord};
use crate::error::{WcsError, WcsResult};
use crate::frame::FrameConversion;
use crate::slice::{reduce, SliceSpec};
use crate::transform::Transform;

#[derive(Debug, Clone)]
pub enum DisplayTransform {
    Main(Rc<dyn Transform>),
    Sliced(SlicedTransform),
    Overlay(OverlayTransform),
}

impl DisplayTransform {
    /// Wraps a transform for display.
    ///
    /// Without a slice the transform must be 2D. With a slice, the slice
    /// must have one entry per transform axis.
    pub fn new(transform: Rc<dyn Transform>, slice: Option<SliceSpec>) -> WcsResult<Self> {
        match slice {
            Some(slice) => Ok(Self::Sliced(SlicedTransform::new(transform, slice)?)),
            None if transform.dims() == 2 => Ok(Self::Main(transform)),
            None => Err(WcsError::invalid_slice(format!(
                "a {}-dimensional transform needs a slice",
                transform.dims()
            ))),
        }
    }

    pub fn overlay(base: DisplayTransform, conversion: Rc<dyn FrameConversion>) -> Self {
        Self::Overlay(OverlayTransform {
            base: Box::new(base),
            conversion,
        })
    }

    /// Kinds of the horizontal and vertical world axes.
    pub fn kinds(&self) -> [CoordinateKind; 2] {
        match self {
            Self::Main(t) => {
                let kinds = t.world_kinds();
                [kind_at(&kinds, 0), kind_at(&kinds, 1)]
            }
            Self::Sliced(s) => s.kinds(),
            Self::Overlay(o) => o.conversion.kinds(),
        }
    }

    pub fn pixel_to_world(&self, pixel: PixelCoord) -> WcsResult<WorldCoord> {
        match self {
            Self::Main(t) => {
                let world = t.pixel_to_world(&[pixel.x(), pixel.y()])?;
                pair(&world, 0, 1)
            }
            Self::Sliced(s) => s.pixel_to_world(pixel),
            Self::Overlay(o) => o.pixel_to_world(pixel),
        }
    }

    /// Inverse mapping, with sliced hidden axes read at display pixel `(0, 0)`.
    ///
    /// Use [`world_to_pixel_near`](Self::world_to_pixel_near) when that
    /// pixel may lie outside the transform domain.
    pub fn world_to_pixel(&self, world: WorldCoord) -> WcsResult<PixelCoord> {
        self.world_to_pixel_near(world, PixelCoord::ORIGIN)
    }

    /// Inverse mapping, with sliced hidden axes read at display pixel `hint`.
    ///
    /// `hint` must be a pixel whose forward mapping succeeds. It is ignored
    /// for transforms without hidden axes.
    pub fn world_to_pixel_near(&self, world: WorldCoord, hint: PixelCoord) -> WcsResult<PixelCoord> {
        match self {
            Self::Main(t) => {
                let pixel = t.world_to_pixel(&world.values())?;
                let p = pair(&pixel, 0, 1)?;
                Ok(PixelCoord::new(p.get(0), p.get(1)))
            }
            Self::Sliced(s) => s.world_to_pixel_near(world, hint),
            Self::Overlay(o) => o.world_to_pixel_near(world, hint),
        }
    }
}

/// An N-dimensional transform seen through a [`SliceSpec`].
#[derive(Debug, Clone)]
pub struct SlicedTransform {
    inner: Rc<dyn Transform>,
    slice: SliceSpec,
}

impl SlicedTransform {
    pub fn new(inner: Rc<dyn Transform>, slice: SliceSpec) -> WcsResult<Self> {
        slice.check_dims(inner.dims())?;
        Ok(Self { inner, slice })
    }

    #[inline]
    pub fn slice(&self) -> &SliceSpec {
        &self.slice
    }

    pub fn kinds(&self) -> [CoordinateKind; 2] {
        let kinds = self.inner.world_kinds();
        [
            kind_at(&kinds, self.slice.x_index()),
            kind_at(&kinds, self.slice.y_index()),
        ]
    }

    /// Full world vector at display position `pixel`.
    pub fn full_world(&self, pixel: PixelCoord) -> WcsResult<Vec<f64>> {
        reduce(self.inner.as_ref(), &self.slice, (pixel.x(), pixel.y()))
    }

    pub fn pixel_to_world(&self, pixel: PixelCoord) -> WcsResult<WorldCoord> {
        let world = self.full_world(pixel)?;
        pair(&world, self.slice.x_index(), self.slice.y_index())
    }

    pub fn world_to_pixel(&self, world: WorldCoord) -> WcsResult<PixelCoord> {
        self.world_to_pixel_near(world, PixelCoord::ORIGIN)
    }

    /// Inverse mapping with hidden world axes taken from the slice plane at
    /// display pixel `hint`.
    ///
    /// Exact when the hidden axes do not mix with the displayed ones.
    pub fn world_to_pixel_near(&self, world: WorldCoord, hint: PixelCoord) -> WcsResult<PixelCoord> {
        let mut full = self.full_world(hint)?;
        full[self.slice.x_index()] = world.get(0);
        full[self.slice.y_index()] = world.get(1);
        let pixel = self.inner.world_to_pixel(&full)?;
        let p = pair(&pixel, self.slice.x_index(), self.slice.y_index())?;
        Ok(PixelCoord::new(p.get(0), p.get(1)))
    }
}

/// A display transform followed by a frame conversion.
#[derive(Debug, Clone)]
pub struct OverlayTransform {
    base: Box<DisplayTransform>,
    conversion: Rc<dyn FrameConversion>,
}

impl OverlayTransform {
    pub fn pixel_to_world(&self, pixel: PixelCoord) -> WcsResult<WorldCoord> {
        let base = self.base.pixel_to_world(pixel)?;
        self.conversion.forward(base)
    }

    pub fn world_to_pixel(&self, world: WorldCoord) -> WcsResult<PixelCoord> {
        self.world_to_pixel_near(world, PixelCoord::ORIGIN)
    }

    pub fn world_to_pixel_near(&self, world: WorldCoord, hint: PixelCoord) -> WcsResult<PixelCoord> {
        let base = self.conversion.inverse(world)?;
        self.base.world_to_pixel_near(base, hint)
    }
}

fn kind_at(kinds: &[CoordinateKind], index: usize) -> CoordinateKind {
    kinds.get(index).copied().unwrap_or(CoordinateKind::Scalar)
}

fn pair(values: &[f64], first: usize, second: usize) -> WcsResult<WorldCoord> {
    let needed = first.max(second) + 1;
    if values.len() < needed {
        return Err(WcsError::dimension_mismatch(needed, values.len()));
    }
    Ok(WorldCoord::new(values[first], values[second]))
}
