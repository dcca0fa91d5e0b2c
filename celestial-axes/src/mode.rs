//! Pixel / world readout mode.
//!
//! The mode cycles on a single toggle input:
//!
//! ```text
//! PIXEL -> WORLD -> WORLD(overlay 0) -> ... -> WORLD(overlay n-1) -> PIXEL
//! ```
//!
//! With no overlays the cycle is just `PIXEL <-> WORLD`. The transition is a
//! function of the current mode and the number of overlays registered *at
//! the time of the toggle*, so overlays added later join the cycle on the
//! next pass without resetting the mode.

use core::fmt;

/// What the readout shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Pixel,
    /// World coordinates of the main axes (`None`) or of an overlay.
    World { overlay: Option<usize> },
}

impl Default for DisplayMode {
    fn default() -> Self {
        Self::WORLD
    }
}

impl DisplayMode {
    pub const WORLD: Self = Self::World { overlay: None };

    pub fn overlay(index: usize) -> Self {
        Self::World {
            overlay: Some(index),
        }
    }

    /// Mode after one toggle with `overlay_count` overlays registered.
    pub fn next(self, overlay_count: usize) -> Self {
        match self.normalized(overlay_count) {
            Self::Pixel => Self::WORLD,
            Self::World { overlay: None } if overlay_count > 0 => Self::overlay(0),
            Self::World { overlay: None } => Self::Pixel,
            Self::World {
                overlay: Some(index),
            } if index + 1 < overlay_count => Self::overlay(index + 1),
            Self::World { overlay: Some(_) } => Self::Pixel,
        }
    }

    /// Replaces an overlay index that is not registered with the main world mode.
    pub fn normalized(self, overlay_count: usize) -> Self {
        match self {
            Self::World {
                overlay: Some(index),
            } if index >= overlay_count => Self::WORLD,
            other => other,
        }
    }

    /// Suffix of readout strings in this mode: `(pixel)`, `(world)` or
    /// `(world, overlay N)` with `N` counted from 1.
    pub fn suffix(&self) -> String {
        match self {
            Self::Pixel => "(pixel)".to_string(),
            Self::World { overlay: None } => "(world)".to_string(),
            Self::World {
                overlay: Some(index),
            } => format!("(world, overlay {})", index + 1),
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pixel => f.write_str("pixel"),
            Self::World { overlay: None } => f.write_str("world"),
            Self::World {
                overlay: Some(index),
            } => write!(f, "world overlay {}", index + 1),
        }
    }
}

/// Holds the current mode and advances it on toggle.
#[derive(Debug, Clone, Default)]
pub struct DisplayModeController {
    mode: DisplayMode,
}

impl DisplayModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Mode to render with `overlay_count` overlays currently registered.
    pub fn effective_mode(&self, overlay_count: usize) -> DisplayMode {
        self.mode.normalized(overlay_count)
    }

    pub fn set_mode(&mut self, mode: DisplayMode) {
        self.mode = mode;
    }

    pub fn toggle(&mut self, overlay_count: usize) -> DisplayMode {
        let next = self.mode.next(overlay_count);
        tracing::debug!(from = %self.mode, to = %next, overlay_count, "display mode toggled");
        self.mode = next;
        next
    }
}
