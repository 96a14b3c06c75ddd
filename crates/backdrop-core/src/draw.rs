//! Drawable output.
//!
//! - [`Primitive`]: one generated shape, with the bounding boxes it committed.
//! - [`LayeredOutput`]: collects SVG nodes by decoration layer and emits
//!   them layer-major.

mod layer;
mod primitive;

pub use layer::{LayeredOutput, SvgNode};
pub use primitive::{ConfettiPiece, Primitive};
