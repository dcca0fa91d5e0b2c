pub mod coordinate;
pub mod display;
pub mod error;
pub mod frame;
pub mod header;
pub mod linear;
pub mod slice;
pub mod transform;

pub use coordinate::{PixelCoord, WorldCoord};
pub use display::{DisplayTransform, OverlayTransform, SlicedTransform};
pub use error::{WcsError, WcsResult};
pub use frame::{FrameConversion, FrameResolver, FrameRotation, SkyFrame, SkyFrameResolver};
pub use header::{KeywordMap, KeywordProvider, KeywordValue};
pub use linear::LinearTransform;
pub use slice::{reduce, SliceEntry, SliceSpec};
pub use transform::Transform;

pub use celestial_core::CoordinateKind;
