//! Backdrop - Deterministic background artwork for HTML slide decks.
//!
//! Every matched container of a deck receives an SVG surface of circles,
//! triangles, lines, confetti and blobs. The artwork is seeded from the page
//! location and the container identity, so the same slide always looks the
//! same across reloads, resizes and re-renders.
//!
//! A render pass resolves the configuration, derives the seed, runs the
//! placement engine through the shape generators and composes the result into
//! a [`surface::Surface`] that replaces whatever the container carried before.

pub mod compose;
pub mod config;
pub mod document;
pub mod export;
pub mod lint;
pub mod seed;
pub mod surface;

mod error;
mod render;

pub use backdrop_core::{color, draw, geometry, hash, placement, rng, shape};

pub use error::BackdropError;
pub use render::{MIN_EXTENT, Renderer, Trigger, render_surface};
