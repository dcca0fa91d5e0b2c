//! Coordinate kinds and coordinate formatting for WCS plot readouts.
//!
//! This crate turns raw world-coordinate scalars into the strings shown on
//! axis labels and pointer readouts. It knows nothing about transforms; it
//! only needs a value, the [`CoordinateKind`] of the axis it came from, and a
//! [`FormatSpec`].
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`kind`] | [`CoordinateKind`]: longitude, latitude, scalar, spectral |
//! | [`format`] | [`FormatSpec`] and the `dd:mm:ss` / `d.dddd` format grammar |
//! | [`formatter`] | [`format_coordinate`] and its inverse [`parse_coordinate`] |
//! | [`angle`] | Sexagesimal decomposition, rendering, parsing and wrapping |
//!
//! # Example
//!
//! ```
//! use celestial_core::{format_coordinate, CoordinateKind, FormatSpec};
//!
//! let spec = FormatSpec::parse("dd:mm:ss").unwrap();
//! let s = format_coordinate(-0.488889, CoordinateKind::Latitude, &spec);
//! assert_eq!(s, "-0°29'20\"");
//!
//! let spec = FormatSpec::parse("d.dddd").unwrap();
//! let s = format_coordinate(267.17572, CoordinateKind::longitude(), &spec);
//! assert_eq!(s, "267.1757");
//! ```

pub mod angle;
pub mod errors;
pub mod format;
pub mod formatter;
pub mod kind;
pub mod math;

pub use errors::{FormatError, FormatResult};
pub use format::{AngleUnit, FormatBase, FormatSpec, Separators, SignConvention};
pub use formatter::{format_coordinate, parse_coordinate};
pub use kind::CoordinateKind;
