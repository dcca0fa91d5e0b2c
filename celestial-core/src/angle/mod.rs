//! Sexagesimal angles: decomposition, rendering, parsing and wrapping.

pub mod format;
pub mod normalize;
pub mod parse;

pub use format::{decompose, fits, render_sexagesimal, Sexagesimal};
pub use normalize::{wrap_at, wrapped_delta};
pub use parse::parse_sexagesimal;
