//! Per-axis formatting and tick state.
//!
//! A [`CoordinateSet`] pairs a [`DisplayTransform`] with the two
//! [`CoordinateAxis`] values that format its output. The main axes and
//! every overlay each own one set; nothing is shared between them, so
//! configuring one never changes another.

use std::ops::{Index, IndexMut};

use celestial_core::math::decimals_for_step;
use celestial_core::{format_coordinate, AngleUnit, CoordinateKind, FormatBase, FormatSpec};
use celestial_wcs::{DisplayTransform, PixelCoord, WcsResult, WorldCoord};

use crate::error::AxesResult;
use crate::ticks::{Edge, TickSettings};

/// Formatting and tick configuration of one displayed world axis.
#[derive(Debug, Clone)]
pub struct CoordinateAxis {
    kind: CoordinateKind,
    format: Option<FormatSpec>,
    ticks: TickSettings,
    spacing: Option<f64>,
}

impl CoordinateAxis {
    pub fn new(kind: CoordinateKind, edge: Edge) -> Self {
        Self {
            kind,
            format: None,
            ticks: TickSettings::on_edge(edge),
            spacing: None,
        }
    }

    pub fn kind(&self) -> CoordinateKind {
        self.kind
    }

    /// Sets the format from a pattern such as `dd:mm:ss.s`, `hh:mm` or `d.dddd`.
    pub fn set_major_formatter(&mut self, pattern: &str) -> AxesResult<()> {
        self.format = Some(FormatSpec::parse(pattern)?);
        Ok(())
    }

    pub fn set_format(&mut self, spec: FormatSpec) {
        self.format = Some(spec);
    }

    /// Returns to automatic formatting.
    pub fn clear_format(&mut self) {
        self.format = None;
    }

    /// The explicitly configured format, if any.
    pub fn format(&self) -> Option<&FormatSpec> {
        self.format.as_ref()
    }

    pub fn ticks(&self) -> &TickSettings {
        &self.ticks
    }

    pub fn ticks_mut(&mut self) -> &mut TickSettings {
        &mut self.ticks
    }

    pub fn set_ticks_spacing(&mut self, spacing: f64) {
        self.ticks.spacing = Some(spacing);
    }

    pub fn set_ticks_number(&mut self, number: usize) {
        self.ticks.number = Some(number);
    }

    pub fn set_ticks_values(&mut self, values: Vec<f64>) {
        self.ticks.values = Some(values);
    }

    pub fn set_ticks_position(&mut self, edges: &[Edge]) {
        self.ticks.edges = edges.to_vec();
    }

    /// Tick spacing found by the most recent tick update, in world units.
    pub fn spacing(&self) -> Option<f64> {
        self.spacing
    }

    pub(crate) fn record_spacing(&mut self, spacing: Option<f64>) {
        self.spacing = spacing;
    }

    /// Sexagesimal unit the ticks should be aligned to.
    pub fn angle_unit(&self) -> Option<AngleUnit> {
        if !self.kind.is_angle() {
            return None;
        }
        match self.format.as_ref().map(|f| f.base) {
            Some(FormatBase::Sexagesimal { unit, .. }) => Some(unit),
            Some(_) => None,
            None => Some(AngleUnit::Degrees),
        }
    }

    /// Format of tick labels spaced `spacing` apart.
    pub fn label_format(&self, spacing: f64) -> FormatSpec {
        match &self.format {
            Some(spec) => spec.clone(),
            None => auto_format(self.kind, spacing),
        }
    }

    /// Format of pointer readouts.
    ///
    /// Unconfigured angles read out to the arcsecond whatever the tick
    /// spacing; unconfigured scalars use as many decimals as the last tick
    /// spacing needs, or their shortest exact decimal before any ticks were
    /// computed.
    pub fn readout_format(&self) -> FormatSpec {
        if let Some(spec) = &self.format {
            return spec.clone();
        }
        match self.spacing {
            Some(spacing) if !self.kind.is_angle() => auto_format(self.kind, spacing),
            _ => self.kind.default_format(),
        }
    }

    pub fn format_readout(&self, value: f64) -> String {
        format_coordinate(value, self.kind, &self.readout_format())
    }
}

/// Format whose resolution matches `spacing`.
pub fn auto_format(kind: CoordinateKind, spacing: f64) -> FormatSpec {
    if !spacing.is_finite() || spacing <= 0.0 {
        return kind.default_format();
    }
    if !kind.is_angle() {
        return FormatSpec::decimal(1.0, decimals_for_step(spacing));
    }
    let arcsec = spacing * 3600.0;
    if is_multiple(arcsec, 3600.0) {
        FormatSpec::dms(1, 0)
    } else if is_multiple(arcsec, 60.0) {
        FormatSpec::dms(2, 0)
    } else {
        FormatSpec::dms(3, decimals_for_step(arcsec))
    }
}

fn is_multiple(value: f64, unit: f64) -> bool {
    let ratio = value / unit;
    ratio >= 1.0 - 1e-9 && (ratio - ratio.round()).abs() <= 1e-9 * ratio
}

/// A display transform with the two axes that format its output.
#[derive(Debug, Clone)]
pub struct CoordinateSet {
    transform: DisplayTransform,
    axes: [CoordinateAxis; 2],
}

impl CoordinateSet {
    pub fn new(transform: DisplayTransform) -> Self {
        let [x_kind, y_kind] = transform.kinds();
        Self {
            transform,
            axes: [
                CoordinateAxis::new(x_kind, Edge::Bottom),
                CoordinateAxis::new(y_kind, Edge::Left),
            ],
        }
    }

    pub fn transform(&self) -> &DisplayTransform {
        &self.transform
    }

    pub fn axes(&self) -> &[CoordinateAxis; 2] {
        &self.axes
    }

    pub fn world_at(&self, pixel: PixelCoord) -> WcsResult<WorldCoord> {
        self.transform.pixel_to_world(pixel)
    }

    /// Both world values formatted for a readout, separated by a space.
    pub fn format_world(&self, world: WorldCoord) -> String {
        format!(
            "{} {}",
            self.axes[0].format_readout(world.get(0)),
            self.axes[1].format_readout(world.get(1))
        )
    }
}

impl Index<usize> for CoordinateSet {
    type Output = CoordinateAxis;

    fn index(&self, axis: usize) -> &CoordinateAxis {
        &self.axes[axis]
    }
}

impl IndexMut<usize> for CoordinateSet {
    fn index_mut(&mut self, axis: usize) -> &mut CoordinateAxis {
        &mut self.axes[axis]
    }
}
