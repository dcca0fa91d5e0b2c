//! Interactive world coordinate readout.
//!
//! [`WorldCoordinateDisplay`] turns a pointer position into the string shown
//! in a viewer's status bar. It owns the main [`CoordinateSet`], the
//! overlays and the current [`DisplayMode`], and reacts to the toggle key.
//!
//! ```
//! use std::rc::Rc;
//!
//! use celestial_axes::{AxesConfig, WorldCoordinateDisplay};
//! use celestial_wcs::{CoordinateKind, LinearTransform, SkyFrame, SkyFrameResolver};
//!
//! let wcs = LinearTransform::new(
//!     vec![0.0, 0.0],
//!     vec![10.0, 20.0],
//!     vec![-0.01, 0.01],
//!     vec![CoordinateKind::longitude(), CoordinateKind::Latitude],
//! )
//! .unwrap();
//! let mut display = WorldCoordinateDisplay::new(
//!     Rc::new(wcs),
//!     None,
//!     Box::new(SkyFrameResolver::new(SkyFrame::Icrs)),
//!     AxesConfig::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(display.readout(0.0, 0.0), "10°00'00\" 20°00'00\" (world)");
//! display.on_key_press('w');
//! assert_eq!(display.readout(0.0, 0.0), "0.000000 0.000000 (pixel)");
//! ```

use std::rc::Rc;

use celestial_wcs::{DisplayTransform, FrameResolver, PixelCoord, SliceSpec, Transform, WcsError};

use crate::config::AxesConfig;
use crate::coords::CoordinateSet;
use crate::error::{AxesError, AxesResult};
use crate::mode::{DisplayMode, DisplayModeController};
use crate::overlay::{Overlay, OverlayRegistry};
use crate::ticks::{CoordinateLayer, LayerSource, PixelBounds, TickGridEngine};

#[derive(Debug)]
pub struct WorldCoordinateDisplay {
    main: CoordinateSet,
    overlays: OverlayRegistry,
    controller: DisplayModeController,
    resolver: Box<dyn FrameResolver>,
    config: AxesConfig,
}

impl WorldCoordinateDisplay {
    /// Builds a display for `transform`.
    ///
    /// Transforms with more than two axes need a `slice` naming the
    /// displayed axes; a missing or malformed slice fails here with
    /// [`AxesError::InvalidSlice`].
    pub fn new(
        transform: Rc<dyn Transform>,
        slice: Option<SliceSpec>,
        resolver: Box<dyn FrameResolver>,
        config: AxesConfig,
    ) -> AxesResult<Self> {
        config.validate()?;
        let transform = DisplayTransform::new(transform, slice)?;
        let main = CoordinateSet::new(transform);
        tracing::debug!(kinds = ?main.transform().kinds(), "coordinate display created");
        Ok(Self {
            main,
            overlays: OverlayRegistry::new(),
            controller: DisplayModeController::new(),
            resolver,
            config,
        })
    }

    pub fn config(&self) -> &AxesConfig {
        &self.config
    }

    /// The main axes.
    pub fn coords(&self) -> &CoordinateSet {
        &self.main
    }

    pub fn coords_mut(&mut self) -> &mut CoordinateSet {
        &mut self.main
    }

    pub fn overlays(&self) -> &OverlayRegistry {
        &self.overlays
    }

    pub fn overlay(&self, index: usize) -> AxesResult<&Overlay> {
        self.overlays.get(index)
    }

    pub fn overlay_mut(&mut self, index: usize) -> AxesResult<&mut Overlay> {
        self.overlays.get_mut(index)
    }

    /// Overlay showing `frame`, created on first request.
    pub fn get_coords_overlay(&mut self, frame: &str) -> AxesResult<&mut Overlay> {
        self.overlays
            .get_or_create(frame, self.main.transform(), self.resolver.as_ref())
    }

    /// Current mode, with a stale overlay index reported as the main world mode.
    pub fn mode(&self) -> DisplayMode {
        self.controller.effective_mode(self.overlays.len())
    }

    /// Sets the mode directly; an unknown overlay index is an error.
    pub fn set_mode(&mut self, mode: DisplayMode) -> AxesResult<()> {
        if let DisplayMode::World {
            overlay: Some(index),
        } = mode
        {
            self.overlays.get(index)?;
        }
        self.controller.set_mode(mode);
        Ok(())
    }

    pub fn toggle_mode(&mut self) -> DisplayMode {
        self.controller.toggle(self.overlays.len())
    }

    /// Handles a key press. Returns whether the key changed the mode.
    pub fn on_key_press(&mut self, key: char) -> bool {
        if key != self.config.toggle_key {
            return false;
        }
        self.toggle_mode();
        true
    }

    /// Readout string for the pointer at `(x, y)`.
    ///
    /// Fails with [`AxesError::CoordinateUnavailable`] if the position has
    /// no world coordinates in the current mode.
    pub fn display_coords(&self, x: f64, y: f64) -> AxesResult<String> {
        let pixel = PixelCoord::new(x, y);
        let mode = self.mode();
        tracing::trace!(x, y, %mode, "readout query");
        let coords = match mode {
            DisplayMode::Pixel => {
                let precision = self.config.pixel_precision;
                return Ok(format!(
                    "{} {} {}",
                    pixel_text(x, precision),
                    pixel_text(y, precision),
                    mode.suffix()
                ));
            }
            DisplayMode::World { overlay: None } => &self.main,
            DisplayMode::World {
                overlay: Some(index),
            } => self.overlays.get(index)?.coords(),
        };

        let world = coords
            .world_at(pixel)
            .map_err(AxesError::coordinate_unavailable)?;
        if self.config.check_round_trip {
            let back = coords
                .transform()
                .world_to_pixel_near(world, pixel)
                .map_err(AxesError::coordinate_unavailable)?;
            let offset = back.max_offset(pixel);
            if offset.is_nan() || offset > self.config.round_trip_tolerance {
                return Err(AxesError::coordinate_unavailable(WcsError::out_of_bounds(
                    format!("world position maps back {offset} pixels away"),
                )));
            }
        }
        Ok(format!("{} {}", coords.format_world(world), mode.suffix()))
    }

    /// Like [`display_coords`](Self::display_coords), with positions outside
    /// the transform's domain shown as placeholders.
    pub fn readout(&self, x: f64, y: f64) -> String {
        match self.display_coords(x, y) {
            Ok(text) => text,
            Err(err) => {
                tracing::debug!(x, y, error = %err, "no world coordinates at pointer");
                let placeholder = &self.config.placeholder;
                format!("{placeholder} {placeholder} {}", self.mode().suffix())
            }
        }
    }

    /// Lays out ticks and gridlines for the visible `bounds`, main axes first.
    ///
    /// The spacing found for each axis is kept and drives the readout
    /// precision of unformatted scalar axes.
    pub fn update_ticks(&mut self, bounds: PixelBounds) -> Vec<CoordinateLayer> {
        let layers = TickGridEngine::new(&self.config).render(&self.main, &self.overlays, bounds);
        for layer in &layers {
            let coords = match layer.source {
                LayerSource::Main => &mut self.main,
                LayerSource::Overlay(index) => match self.overlays.get_mut(index) {
                    Ok(overlay) => overlay.coords_mut(),
                    Err(_) => continue,
                },
            };
            for ticks in &layer.axes {
                coords[ticks.axis].record_spacing(ticks.spacing);
            }
        }
        layers
    }
}

/// Fixed-point pixel value; values that round to zero lose their sign.
fn pixel_text(value: f64, precision: usize) -> String {
    let text = format!("{value:.precision$}");
    match text.strip_prefix('-') {
        Some(magnitude) if magnitude.chars().all(|c| c == '0' || c == '.') => {
            magnitude.to_string()
        }
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_text_drops_negative_zero() {
        assert_eq!(pixel_text(-1e-9, 6), "0.000000");
        assert_eq!(pixel_text(-0.0, 2), "0.00");
        assert_eq!(pixel_text(-0.4, 0), "0");
        assert_eq!(pixel_text(-0.5, 6), "-0.500000");
        assert_eq!(pixel_text(12.75, 6), "12.750000");
    }
}
