//! World coordinate axes for image viewers.
//!
//! This crate sits between a WCS transform and whatever draws the image. It
//! answers two questions:
//!
//! - *What is under the pointer?* [`WorldCoordinateDisplay`] formats the
//!   world (or pixel) position of the pointer for a status bar, and cycles
//!   between pixel, world and overlay readouts on a key press.
//! - *Where do the ticks and gridlines go?* [`TickGridEngine`] places
//!   labelled ticks on the frame edges and traces gridlines for the main
//!   axes and every overlay.
//!
//! # Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`display`] | [`WorldCoordinateDisplay`], the readout façade |
//! | [`mode`] | [`DisplayMode`] and its toggle cycle |
//! | [`coords`] | Per-axis formats and tick settings |
//! | [`overlay`] | Overlays in other sky frames |
//! | [`ticks`] | Tick locators, edge crossings and gridlines |
//! | [`config`] | [`AxesConfig`], loadable from JSON |
//! | [`error`] | [`AxesError`] |
//!
//! Formatting itself lives in `celestial-core` and transforms in
//! `celestial-wcs`; the commonly needed types of both are re-exported here.

pub mod config;
pub mod coords;
pub mod display;
pub mod error;
pub mod mode;
pub mod overlay;
pub mod ticks;

pub use config::AxesConfig;
pub use coords::{auto_format, CoordinateAxis, CoordinateSet};
pub use display::WorldCoordinateDisplay;
pub use error::{AxesError, AxesResult};
pub use mode::{DisplayMode, DisplayModeController};
pub use overlay::{Overlay, OverlayRegistry};
pub use ticks::{
    angle_step, nice_step, tick_values, AxisTicks, CoordinateLayer, Edge, Gridline, LayerSource,
    PixelBounds, Tick, TickGridEngine, TickSettings, WorldRange,
};

pub use celestial_core::{CoordinateKind, FormatSpec};
pub use celestial_wcs::{SliceSpec, Transform};
