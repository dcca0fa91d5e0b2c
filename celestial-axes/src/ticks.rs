//! Tick and gridline placement.
//!
//! For every [`CoordinateSet`] the engine:
//!
//! 1. samples the transform on a mesh over the visible pixel bounds to find
//!    the range of each world axis (longitudes pick whichever of the
//!    `[0, 360)` and `[-180, 180)` windows gives the narrower range),
//! 2. picks tick values: explicit values, an explicit spacing, or an
//!    automatic spacing from the sexagesimal ladder (angles) or the
//!    1-2-5 ladder (everything else),
//! 3. walks the configured frame edges and interpolates where each tick
//!    value is crossed,
//! 4. traces each tick value across the range of the other axis to build
//!    gridlines, breaking them wherever the transform fails.
//!
//! The main set is laid out first and overlays follow in registration order.

use celestial_core::angle::{wrap_at, wrapped_delta};
use celestial_core::{format_coordinate, AngleUnit, CoordinateKind, FormatBase};
use celestial_wcs::{PixelCoord, WorldCoord};
use serde::{Deserialize, Serialize};

use crate::config::AxesConfig;
use crate::coords::CoordinateSet;
use crate::overlay::OverlayRegistry;

/// Upper bound on tick values per axis.
const MAX_TICKS: usize = 1000;

/// Steps in seconds or minutes.
const SEXAGESIMAL_STEPS: [f64; 8] = [1.0, 2.0, 3.0, 5.0, 10.0, 15.0, 20.0, 30.0];
const DEGREE_STEPS: [f64; 9] = [1.0, 2.0, 3.0, 5.0, 10.0, 15.0, 30.0, 45.0, 90.0];
const HOUR_STEPS: [f64; 6] = [1.0, 2.0, 3.0, 4.0, 6.0, 12.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Bottom,
    Left,
    Top,
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Bottom, Edge::Left, Edge::Top, Edge::Right];
}

/// Tick configuration of one axis. Unset fields fall back to the display
/// configuration or to automatic placement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickSettings {
    /// Target tick count when spacing is automatic.
    pub number: Option<usize>,
    /// Fixed spacing in world units (degrees for angles).
    pub spacing: Option<f64>,
    /// Fixed tick values; overrides `number` and `spacing`.
    pub values: Option<Vec<f64>>,
    /// Frame edges that carry ticks and labels.
    pub edges: Vec<Edge>,
}

impl TickSettings {
    pub fn on_edge(edge: Edge) -> Self {
        Self {
            edges: vec![edge],
            ..Self::default()
        }
    }
}

/// Visible region in display pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl PixelBounds {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Bounds of a `width` x `height` image whose pixel centers sit on
    /// integer coordinates.
    pub fn from_shape(width: usize, height: usize) -> Self {
        Self::new(-0.5, width as f64 - 0.5, -0.5, height as f64 - 0.5)
    }

    /// Point at fraction `t` (0 to 1) along `edge`, running left to right
    /// or bottom to top.
    pub fn edge_point(&self, edge: Edge, t: f64) -> PixelCoord {
        let x = self.x_min + t * (self.x_max - self.x_min);
        let y = self.y_min + t * (self.y_max - self.y_min);
        match edge {
            Edge::Bottom => PixelCoord::new(x, self.y_min),
            Edge::Top => PixelCoord::new(x, self.y_max),
            Edge::Left => PixelCoord::new(self.x_min, y),
            Edge::Right => PixelCoord::new(self.x_max, y),
        }
    }

    /// `n` x `n` grid of points covering the bounds, edges included.
    pub fn mesh(&self, n: usize) -> impl Iterator<Item = PixelCoord> + '_ {
        let steps = n.max(2);
        (0..steps).flat_map(move |j| {
            let ty = fraction(j, steps);
            (0..steps).map(move |i| {
                PixelCoord::new(
                    self.x_min + fraction(i, steps) * (self.x_max - self.x_min),
                    self.y_min + ty * (self.y_max - self.y_min),
                )
            })
        })
    }
}

fn fraction(i: usize, steps: usize) -> f64 {
    i as f64 / (steps - 1) as f64
}

/// Closed world interval covered by one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldRange {
    pub min: f64,
    pub max: f64,
}

impl WorldRange {
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Range of `values` for an axis of `kind`, `None` if no value is finite.
    pub fn of(values: &[f64], kind: CoordinateKind) -> Option<Self> {
        match kind {
            CoordinateKind::Longitude { .. } => {
                let positive = Self::bounding(values.iter().map(|v| v.rem_euclid(360.0)))?;
                let centered = Self::bounding(
                    values
                        .iter()
                        .map(|v| wrap_at(*v, 180.0)),
                )?;
                Some(if centered.span() < positive.span() {
                    centered
                } else {
                    positive
                })
            }
            _ => Self::bounding(values.iter().copied()),
        }
    }

    fn bounding(values: impl Iterator<Item = f64>) -> Option<Self> {
        values
            .filter(|v| v.is_finite())
            .fold(None, |range: Option<Self>, v| match range {
                None => Some(Self { min: v, max: v }),
                Some(r) => Some(Self {
                    min: r.min.min(v),
                    max: r.max.max(v),
                }),
            })
    }
}

/// Smallest of 1, 2, 5 or 10 times a power of ten that is at least `raw`.
pub fn nice_step(raw: f64) -> f64 {
    let raw = raw.abs();
    if !raw.is_finite() || raw == 0.0 {
        return 1.0;
    }
    let base = libm::pow(10.0, libm::floor(libm::log10(raw)));
    for multiple in [1.0, 2.0, 5.0] {
        if base * multiple >= raw * (1.0 - 1e-12) {
            return base * multiple;
        }
    }
    base * 10.0
}

/// Smallest sexagesimal-friendly step, in degrees, that is at least
/// `raw_degrees`.
///
/// Steps below one second follow the decimal ladder; above that they
/// snap to whole seconds, minutes, then degrees or hours.
pub fn angle_step(raw_degrees: f64, unit: AngleUnit) -> f64 {
    let (major, major_steps): (f64, &[f64]) = match unit {
        AngleUnit::Degrees => (1.0, &DEGREE_STEPS),
        AngleUnit::Hours => (15.0, &HOUR_STEPS),
    };
    let raw = raw_degrees.abs() / major;
    if !raw.is_finite() || raw == 0.0 {
        return major;
    }
    if raw < 1.0 / 3600.0 {
        return nice_step(raw * 3600.0) / 3600.0 * major;
    }
    for divisor in [3600.0, 60.0] {
        if let Some(step) = SEXAGESIMAL_STEPS
            .iter()
            .map(|s| s / divisor)
            .find(|s| *s >= raw * (1.0 - 1e-12))
        {
            return step * major;
        }
    }
    match major_steps.iter().find(|s| **s >= raw * (1.0 - 1e-12)) {
        Some(step) => step * major,
        None => nice_step(raw) * major,
    }
}

/// Whether `spacing` puts at most [`MAX_TICKS`] values inside `range`.
pub fn spacing_fits(range: WorldRange, spacing: f64) -> bool {
    spacing.is_finite() && spacing > 0.0 && range.span() / spacing < (MAX_TICKS - 1) as f64
}

/// Multiples of `spacing` inside `range`.
///
/// Empty when the spacing is not positive or would need more than
/// [`MAX_TICKS`] values.
pub fn tick_values(range: WorldRange, spacing: f64) -> Vec<f64> {
    if !spacing.is_finite() || spacing <= 0.0 {
        return Vec::new();
    }
    let first = libm::ceil(range.min / spacing - 1e-9);
    let last = libm::floor(range.max / spacing + 1e-9);
    let gaps = last - first;
    if !(0.0..MAX_TICKS as f64).contains(&gaps) {
        return Vec::new();
    }
    let count = gaps as usize + 1;
    (0..count)
        .map(|k| {
            let value = (first + k as f64) * spacing;
            if value == 0.0 {
                0.0
            } else {
                value
            }
        })
        .collect()
}

/// A labelled tick where a world value crosses a frame edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub axis: usize,
    pub edge: Edge,
    pub pixel: PixelCoord,
    pub value: f64,
    pub label: String,
}

/// Curve of constant world value, split where the transform fails.
#[derive(Debug, Clone, PartialEq)]
pub struct Gridline {
    pub axis: usize,
    pub value: f64,
    pub segments: Vec<Vec<PixelCoord>>,
}

/// Ticks and gridlines of one world axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTicks {
    pub axis: usize,
    pub range: Option<WorldRange>,
    pub spacing: Option<f64>,
    pub values: Vec<f64>,
    pub ticks: Vec<Tick>,
    pub gridlines: Vec<Gridline>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerSource {
    Main,
    Overlay(usize),
}

/// Everything drawn for one coordinate set.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateLayer {
    pub source: LayerSource,
    pub axes: [AxisTicks; 2],
}

#[derive(Debug, Clone)]
pub struct TickGridEngine {
    tick_number: usize,
    edge_samples: usize,
    grid_samples: usize,
    range_samples: usize,
}

impl TickGridEngine {
    pub fn new(config: &AxesConfig) -> Self {
        Self {
            tick_number: config.tick_number.max(1),
            edge_samples: config.edge_samples.max(2),
            grid_samples: config.grid_samples.max(2),
            range_samples: config.range_samples.max(2),
        }
    }

    /// Layers for the main set and every overlay, main first.
    pub fn render(
        &self,
        main: &CoordinateSet,
        overlays: &OverlayRegistry,
        bounds: PixelBounds,
    ) -> Vec<CoordinateLayer> {
        let mut layers = Vec::with_capacity(overlays.len() + 1);
        layers.push(self.layer(main, bounds, LayerSource::Main));
        for overlay in overlays.iter() {
            layers.push(self.layer(
                overlay.coords(),
                bounds,
                LayerSource::Overlay(overlay.index()),
            ));
        }
        layers
    }

    pub fn layer(
        &self,
        coords: &CoordinateSet,
        bounds: PixelBounds,
        source: LayerSource,
    ) -> CoordinateLayer {
        let (ranges, anchor) = self.sample_mesh(coords, bounds);
        let axes = [0, 1].map(|axis| self.axis_ticks(coords, bounds, &ranges, anchor, axis));
        tracing::debug!(
            ?source,
            x_ticks = axes[0].ticks.len(),
            y_ticks = axes[1].ticks.len(),
            "coordinate layer computed"
        );
        CoordinateLayer { source, axes }
    }

    /// World range of both axes over `bounds`.
    pub fn world_ranges(
        &self,
        coords: &CoordinateSet,
        bounds: PixelBounds,
    ) -> [Option<WorldRange>; 2] {
        self.sample_mesh(coords, bounds).0
    }

    /// World ranges over `bounds`, plus the first mesh pixel inside the
    /// transform domain.
    fn sample_mesh(
        &self,
        coords: &CoordinateSet,
        bounds: PixelBounds,
    ) -> ([Option<WorldRange>; 2], Option<PixelCoord>) {
        let mut samples = [Vec::new(), Vec::new()];
        let mut anchor = None;
        let mut failures = 0usize;
        for pixel in bounds.mesh(self.range_samples) {
            match coords.world_at(pixel) {
                Ok(world) => {
                    anchor.get_or_insert(pixel);
                    samples[0].push(world.get(0));
                    samples[1].push(world.get(1));
                }
                Err(_) => failures += 1,
            }
        }
        if failures > 0 {
            tracing::trace!(failures, "mesh samples outside the transform domain");
        }
        let ranges = [0, 1].map(|axis| WorldRange::of(&samples[axis], coords[axis].kind()));
        (ranges, anchor)
    }

    fn axis_ticks(
        &self,
        coords: &CoordinateSet,
        bounds: PixelBounds,
        ranges: &[Option<WorldRange>; 2],
        anchor: Option<PixelCoord>,
        axis: usize,
    ) -> AxisTicks {
        let settings = coords[axis].ticks();
        let (values, spacing) = match (&settings.values, ranges[axis]) {
            (Some(values), _) => (values.clone(), min_gap(values)),
            (None, Some(range)) => {
                let explicit = settings.spacing.filter(|s| spacing_fits(range, *s));
                if explicit.is_none() && settings.spacing.is_some() {
                    tracing::debug!(
                        axis,
                        spacing = ?settings.spacing,
                        "tick spacing unusable for the visible range, using automatic spacing"
                    );
                }
                let spacing = explicit.or_else(|| self.auto_spacing(coords, axis, range));
                match spacing {
                    Some(spacing) => (tick_values(range, spacing), Some(spacing)),
                    None => (Vec::new(), None),
                }
            }
            (None, None) => (Vec::new(), None),
        };

        let ticks = self.edge_ticks(coords, bounds, axis, &values, spacing);
        let gridlines = match (ranges[1 - axis], anchor) {
            (Some(other), Some(anchor)) => values
                .iter()
                .map(|value| self.gridline(coords, axis, *value, other, anchor))
                .filter(|line| !line.segments.is_empty())
                .collect(),
            _ => Vec::new(),
        };
        tracing::trace!(axis, ?spacing, values = values.len(), "axis ticks placed");

        AxisTicks {
            axis,
            range: ranges[axis],
            spacing,
            values,
            ticks,
            gridlines,
        }
    }

    fn auto_spacing(&self, coords: &CoordinateSet, axis: usize, range: WorldRange) -> Option<f64> {
        let coordinate = &coords[axis];
        let number = coordinate.ticks().number.unwrap_or(self.tick_number).max(1);
        let raw = range.span() / number as f64;
        if raw.is_nan() || raw <= 0.0 {
            return None;
        }
        let spacing = match coordinate.angle_unit() {
            Some(unit) => angle_step(raw, unit),
            None => match coordinate.format().map(|f| f.base) {
                Some(FormatBase::Decimal { scale }) if scale > 0.0 => {
                    nice_step(raw * scale) / scale
                }
                _ => nice_step(raw),
            },
        };
        Some(spacing)
    }

    fn edge_ticks(
        &self,
        coords: &CoordinateSet,
        bounds: PixelBounds,
        axis: usize,
        values: &[f64],
        spacing: Option<f64>,
    ) -> Vec<Tick> {
        let coordinate = &coords[axis];
        let kind = coordinate.kind();
        let cyclic = matches!(kind, CoordinateKind::Longitude { .. });
        let label_format = coordinate.label_format(spacing.unwrap_or(f64::NAN));
        let last = self.edge_samples - 1;
        let mut ticks = Vec::new();

        for &edge in &coordinate.ticks().edges {
            let samples: Vec<(PixelCoord, Option<f64>)> = (0..self.edge_samples)
                .map(|i| {
                    let pixel = bounds.edge_point(edge, fraction(i, self.edge_samples));
                    let value = coords
                        .world_at(pixel)
                        .ok()
                        .map(|w| w.get(axis))
                        .filter(|v| v.is_finite());
                    (pixel, value)
                })
                .collect();

            for (i, pair) in samples.windows(2).enumerate() {
                let ((p0, Some(v0)), (p1, Some(v1))) = (pair[0], pair[1]) else {
                    continue;
                };
                let v1 = if cyclic { v0 + wrapped_delta(v0, v1) } else { v1 };
                if v1 == v0 {
                    continue;
                }
                for &value in values {
                    let target = if cyclic {
                        v0 + wrapped_delta(v0, value)
                    } else {
                        value
                    };
                    let f = (target - v0) / (v1 - v0);
                    let inside = f >= 0.0 && (f < 1.0 || (f <= 1.0 && i + 1 == last));
                    if !inside {
                        continue;
                    }
                    ticks.push(Tick {
                        axis,
                        edge,
                        pixel: PixelCoord::new(
                            p0.x() + f * (p1.x() - p0.x()),
                            p0.y() + f * (p1.y() - p0.y()),
                        ),
                        value,
                        label: format_coordinate(value, kind, &label_format),
                    });
                }
            }
        }
        ticks
    }

    fn gridline(
        &self,
        coords: &CoordinateSet,
        axis: usize,
        value: f64,
        other: WorldRange,
        anchor: PixelCoord,
    ) -> Gridline {
        let mut segments = Vec::new();
        let mut current: Vec<PixelCoord> = Vec::new();
        for j in 0..self.grid_samples {
            let mut world = WorldCoord::new(0.0, 0.0);
            world.set(axis, value);
            world.set(1 - axis, other.min + fraction(j, self.grid_samples) * other.span());
            match coords.transform().world_to_pixel_near(world, anchor) {
                Ok(pixel) if pixel.is_finite() => current.push(pixel),
                _ => close_segment(&mut segments, &mut current),
            }
        }
        close_segment(&mut segments, &mut current);
        Gridline {
            axis,
            value,
            segments,
        }
    }
}

fn close_segment(segments: &mut Vec<Vec<PixelCoord>>, current: &mut Vec<PixelCoord>) {
    if current.len() >= 2 {
        segments.push(std::mem::take(current));
    } else {
        current.clear();
    }
}

fn min_gap(values: &[f64]) -> Option<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);
    sorted
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|gap| *gap > 0.0)
        .min_by(f64::total_cmp)
}
