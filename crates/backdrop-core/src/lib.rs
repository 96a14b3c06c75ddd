//! Backdrop Core Types and Algorithms
//!
//! This crate provides the deterministic building blocks used to decorate
//! slides with procedurally generated artwork. It includes:
//!
//! - **Colors**: CSS color handling ([`color::Color`])
//! - **Geometry**: Points, sizes and axis-aligned bounds ([`geometry`] module)
//! - **Hashing**: The 32-bit FNV-1a string hash used for seeds ([`hash`] module)
//! - **Random**: The `mulberry32` seeded generator ([`rng`] module)
//! - **Placement**: Bounded rejection sampling against prior shapes ([`placement`] module)
//! - **Shapes**: The five shape generators ([`shape`] module)
//! - **Draw**: Primitives and layered SVG output ([`draw`] module)
//!
//! Nothing in this crate performs I/O, and every operation is infallible:
//! a shape that cannot be placed is simply `None`.

pub mod color;
pub mod draw;
pub mod geometry;
pub mod hash;
pub mod placement;
pub mod rng;
pub mod shape;
