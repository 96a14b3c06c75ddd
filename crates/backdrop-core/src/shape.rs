//! The five shape generators.
//!
//! Every generator follows the same pattern: sample an edge-biased anchor,
//! derive geometry from it, ask the [`Placement`] arena to commit the
//! bounding box, and only on success draw a palette color and an opacity.
//! Geometry, color and opacity draws therefore interleave in one fixed order
//! per shape.
//!
//! | Kind | Geometry | Attempts |
//! |------|----------|----------|
//! | [`ShapeKind::Circle`] | radius from 10 to 12% of the shorter side | 20 |
//! | [`ShapeKind::Triangle`] | size from 16 to 18% of the shorter side, vertices at +0, +2.1, +4.2 rad | 20 |
//! | [`ShapeKind::Line`] | length 15–65% of the shorter side, stroke from the style range | 20 |
//! | [`ShapeKind::Confetti`] | 6–17 rectangles (6–18 × 3–10, ±35°) | 10 per piece |
//! | [`ShapeKind::Blob`] | 7–11 jittered vertices around a base radius of 8–22% | 20 |

use std::f32::consts::TAU;

use log::trace;
use serde::Deserialize;

use crate::{
    color::Color,
    draw::{ConfettiPiece, Primitive},
    geometry::{Bounds, Point, Size},
    placement::{CONFETTI_ATTEMPTS, Placement, SHAPE_ATTEMPTS},
    rng::RandomSource,
};

/// Vertex angle offsets of a triangle, in radians. Deliberately not 120°.
const TRIANGLE_OFFSETS: [f32; 3] = [0.0, 2.1, 4.2];

/// Closed set of shape kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    Triangle,
    Line,
    Confetti,
    Blob,
}

impl ShapeKind {
    /// All kinds in dispatch order.
    pub const ALL: [ShapeKind; 5] = [
        Self::Circle,
        Self::Triangle,
        Self::Line,
        Self::Confetti,
        Self::Blob,
    ];

    /// Returns a human-readable name for this kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Triangle => "triangle",
            Self::Line => "line",
            Self::Confetti => "confetti",
            Self::Blob => "blob",
        }
    }
}

/// An ordered `[low, high]` pair of floats.
///
/// Deserializes from a two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "[f32; 2]")]
pub struct ValueRange {
    low: f32,
    high: f32,
}

impl ValueRange {
    pub const fn new(low: f32, high: f32) -> Self {
        Self { low, high }
    }

    pub fn low(self) -> f32 {
        self.low
    }

    pub fn high(self) -> f32 {
        self.high
    }

    /// Returns a copy with each end clamped into `[min, max]`, non-finite
    /// ends replaced by `fallback`, and the ends swapped if out of order.
    pub fn sanitized(self, min: f32, max: f32, fallback: ValueRange) -> Self {
        let fix = |value: f32, fallback: f32| {
            if value.is_finite() {
                value.clamp(min, max)
            } else {
                fallback
            }
        };
        let low = fix(self.low, fallback.low);
        let high = fix(self.high, fallback.high);
        if low <= high {
            Self::new(low, high)
        } else {
            Self::new(high, low)
        }
    }

    /// Interpolates across the range with one draw.
    pub fn sample<R: RandomSource>(self, rng: &mut R) -> f32 {
        rng.range(self.low, self.high)
    }
}

impl From<[f32; 2]> for ValueRange {
    fn from([low, high]: [f32; 2]) -> Self {
        Self::new(low, high)
    }
}

/// Visual parameters shared by all generators.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeStyle {
    palette: Vec<Color>,
    opacity: ValueRange,
    stroke_width: ValueRange,
}

impl ShapeStyle {
    /// Creates a style.
    ///
    /// `palette` should hold at least one color; with an empty palette no
    /// shape can be colored and every generator draws nothing.
    pub fn new(palette: Vec<Color>, opacity: ValueRange, stroke_width: ValueRange) -> Self {
        Self {
            palette,
            opacity,
            stroke_width,
        }
    }

    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    pub fn opacity(&self) -> ValueRange {
        self.opacity
    }

    pub fn stroke_width(&self) -> ValueRange {
        self.stroke_width
    }

    /// Draws a palette color, then an opacity.
    fn paint<R: RandomSource>(&self, rng: &mut R) -> Option<(Color, f32)> {
        let color = *rng.pick(&self.palette)?;
        let opacity = self.opacity.sample(rng);
        Some((color, opacity))
    }
}

/// Runs the generator for `kind`.
///
/// Returns `None` when the shape could not be placed. An empty palette
/// short-circuits before any draw or commit.
pub fn generate<R: RandomSource>(
    kind: ShapeKind,
    rng: &mut R,
    style: &ShapeStyle,
    placement: &mut Placement,
) -> Option<Primitive> {
    if style.palette().is_empty() {
        return None;
    }
    let primitive = match kind {
        ShapeKind::Circle => circle(rng, style, placement),
        ShapeKind::Triangle => triangle(rng, style, placement),
        ShapeKind::Line => line(rng, style, placement),
        ShapeKind::Confetti => confetti(rng, style, placement),
        ShapeKind::Blob => blob(rng, style, placement),
    };
    trace!(kind = kind.name(), placed = primitive.is_some(); "Generated shape");
    primitive
}

/// A filled circle. The radius is drawn once, before any placement attempt.
pub fn circle<R: RandomSource>(
    rng: &mut R,
    style: &ShapeStyle,
    placement: &mut Placement,
) -> Option<Primitive> {
    let radius = rng.range(10.0, placement.area().min_side() * 0.12);
    let envelope = Size::new(radius * 2.0, radius * 2.0);

    let center = placement.try_place(rng, SHAPE_ATTEMPTS, |_, anchor| {
        (anchor.to_bounds(envelope), anchor)
    })?;
    let (fill, opacity) = style.paint(rng)?;

    Some(Primitive::Circle {
        center,
        radius,
        fill,
        opacity,
        bounds: center.to_bounds(envelope),
    })
}

/// A filled, slightly irregular triangle around the anchor.
pub fn triangle<R: RandomSource>(
    rng: &mut R,
    style: &ShapeStyle,
    placement: &mut Placement,
) -> Option<Primitive> {
    let max_size = placement.area().min_side() * 0.18;

    let (vertices, bounds) = placement.try_place(rng, SHAPE_ATTEMPTS, |rng, anchor| {
        let size = rng.range(16.0, max_size);
        let rotation = rng.angle();
        let vertices = TRIANGLE_OFFSETS.map(|offset| anchor.polar_offset(rotation + offset, size));
        let bounds = Bounds::enclosing(&vertices);
        (bounds, (vertices, bounds))
    })?;
    let (fill, opacity) = style.paint(rng)?;

    Some(Primitive::Triangle {
        vertices,
        fill,
        opacity,
        bounds,
    })
}

/// A round-capped stroke starting at the anchor.
///
/// The committed box is the segment envelope grown by the stroke width.
pub fn line<R: RandomSource>(
    rng: &mut R,
    style: &ShapeStyle,
    placement: &mut Placement,
) -> Option<Primitive> {
    let short = placement.area().min_side();
    let stroke_range = style.stroke_width();

    let (start, end, width, bounds) = placement.try_place(rng, SHAPE_ATTEMPTS, |rng, start| {
        let heading = rng.angle();
        let length = rng.range(short * 0.15, short * 0.65);
        let width = stroke_range.sample(rng);
        let end = start.polar_offset(heading, length);
        let bounds = Bounds::enclosing(&[start, end]).expand(width);
        (bounds, (start, end, width, bounds))
    })?;
    let (stroke, opacity) = style.paint(rng)?;

    Some(Primitive::Line {
        start,
        end,
        stroke,
        width,
        opacity,
        bounds,
    })
}

/// A cluster of small rotated rectangles.
///
/// Each piece is placed independently; pieces that cannot be placed are
/// skipped. Returns `None` only when no piece at all was placed.
pub fn confetti<R: RandomSource>(
    rng: &mut R,
    style: &ShapeStyle,
    placement: &mut Placement,
) -> Option<Primitive> {
    let count = 6 + (rng.next_f64() * 12.0).floor() as usize;
    let mut pieces = Vec::with_capacity(count);

    for _ in 0..count {
        let placed = placement.try_place(rng, CONFETTI_ATTEMPTS, |rng, anchor| {
            let width = rng.range(6.0, 18.0);
            let height = rng.range(3.0, 10.0);
            let bounds = anchor.to_bounds(Size::new(width, height));
            (bounds, bounds)
        });
        let Some(bounds) = placed else {
            continue;
        };

        let rotation = rng.range(-35.0, 35.0);
        let Some((fill, opacity)) = style.paint(rng) else {
            continue;
        };
        pieces.push(ConfettiPiece {
            bounds,
            rotation,
            fill,
            opacity,
        });
    }

    trace!(requested = count, placed = pieces.len(); "Confetti cluster");
    if pieces.is_empty() {
        None
    } else {
        Some(Primitive::Confetti(pieces))
    }
}

/// An organic closed polygon.
///
/// The committed box uses the largest possible jittered extent
/// (`base × 1.35` in every direction) so the vertices never need to be known
/// before placement.
pub fn blob<R: RandomSource>(
    rng: &mut R,
    style: &ShapeStyle,
    placement: &mut Placement,
) -> Option<Primitive> {
    let short = placement.area().min_side();

    let (center, base, bounds) = placement.try_place(rng, SHAPE_ATTEMPTS, |rng, center| {
        let base = rng.range(short * 0.08, short * 0.22);
        let extent = base * 1.35 * 2.0;
        let bounds = center.to_bounds(Size::new(extent, extent));
        (bounds, (center, base, bounds))
    })?;

    let count = 7 + (rng.next_f64() * 5.0).floor() as usize;
    let vertices: Vec<Point> = (0..count)
        .map(|i| {
            let angle = i as f32 / count as f32 * TAU;
            let radius = base * rng.range(0.65, 1.35);
            center.polar_offset(angle, radius)
        })
        .collect();
    let (fill, opacity) = style.paint(rng)?;

    Some(Primitive::Blob {
        vertices,
        fill,
        opacity,
        bounds,
    })
}
