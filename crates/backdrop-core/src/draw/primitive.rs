//! Generated shapes and their SVG rendering.
//!
//! Numbers are written with fixed precision (one decimal for coordinates,
//! two for stroke widths, three for opacities) so identical geometry always
//! serializes to identical markup.

use svg::node::element as svg_element;

use crate::{
    color::Color,
    draw::SvgNode,
    geometry::{Bounds, Point},
};

/// One small rotated rectangle of a confetti cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfettiPiece {
    pub(crate) bounds: Bounds,
    pub(crate) rotation: f32,
    pub(crate) fill: Color,
    pub(crate) opacity: f32,
}

impl ConfettiPiece {
    /// Returns the unrotated rectangle, which is also the committed box.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Returns the rotation in degrees about the rectangle center.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    fn to_svg(&self) -> svg_element::Rectangle {
        let center_x = self.bounds.min_x() + self.bounds.width() / 2.0;
        let center_y = self.bounds.min_y() + self.bounds.height() / 2.0;
        svg_element::Rectangle::new()
            .set("x", fixed1(self.bounds.min_x()))
            .set("y", fixed1(self.bounds.min_y()))
            .set("width", fixed1(self.bounds.width()))
            .set("height", fixed1(self.bounds.height()))
            .set("fill", &self.fill)
            .set("fill-opacity", fixed3(self.opacity))
            .set(
                "transform",
                format!(
                    "rotate({} {} {})",
                    fixed1(self.rotation),
                    fixed1(center_x),
                    fixed1(center_y)
                ),
            )
            .set("rx", fixed1(self.bounds.height() / 2.0))
    }
}

/// A shape produced by one generator call.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Circle {
        center: Point,
        radius: f32,
        fill: Color,
        opacity: f32,
        bounds: Bounds,
    },
    Triangle {
        vertices: [Point; 3],
        fill: Color,
        opacity: f32,
        bounds: Bounds,
    },
    Line {
        start: Point,
        end: Point,
        stroke: Color,
        width: f32,
        opacity: f32,
        bounds: Bounds,
    },
    Confetti(Vec<ConfettiPiece>),
    Blob {
        vertices: Vec<Point>,
        fill: Color,
        opacity: f32,
        bounds: Bounds,
    },
}

impl Primitive {
    /// Returns every bounding box this primitive committed to the placement
    /// arena. Confetti clusters return one box per piece.
    pub fn bounds(&self) -> Vec<Bounds> {
        match self {
            Self::Circle { bounds, .. }
            | Self::Triangle { bounds, .. }
            | Self::Line { bounds, .. }
            | Self::Blob { bounds, .. } => vec![*bounds],
            Self::Confetti(pieces) => pieces.iter().map(ConfettiPiece::bounds).collect(),
        }
    }

    /// Renders the primitive to SVG nodes, in draw order.
    pub fn render_to_svg(&self) -> Vec<SvgNode> {
        match self {
            Self::Circle {
                center,
                radius,
                fill,
                opacity,
                ..
            } => vec![Box::new(
                svg_element::Circle::new()
                    .set("cx", fixed1(center.x()))
                    .set("cy", fixed1(center.y()))
                    .set("r", fixed1(*radius))
                    .set("fill", fill)
                    .set("fill-opacity", fixed3(*opacity)),
            )],
            Self::Triangle {
                vertices,
                fill,
                opacity,
                ..
            } => {
                let points = vertices
                    .iter()
                    .map(|p| format!("{},{}", fixed1(p.x()), fixed1(p.y())))
                    .collect::<Vec<_>>()
                    .join(" ");
                vec![Box::new(
                    svg_element::Polygon::new()
                        .set("points", points)
                        .set("fill", fill)
                        .set("fill-opacity", fixed3(*opacity)),
                )]
            }
            Self::Line {
                start,
                end,
                stroke,
                width,
                opacity,
                ..
            } => vec![Box::new(
                svg_element::Line::new()
                    .set("x1", fixed1(start.x()))
                    .set("y1", fixed1(start.y()))
                    .set("x2", fixed1(end.x()))
                    .set("y2", fixed1(end.y()))
                    .set("stroke", stroke)
                    .set("stroke-width", format!("{width:.2}"))
                    .set("stroke-opacity", fixed3(*opacity))
                    .set("stroke-linecap", "round"),
            )],
            Self::Confetti(pieces) => pieces
                .iter()
                .map(|piece| Box::new(piece.to_svg()) as SvgNode)
                .collect(),
            Self::Blob {
                vertices,
                fill,
                opacity,
                ..
            } => {
                let mut data = vertices
                    .iter()
                    .enumerate()
                    .map(|(i, p)| {
                        let command = if i == 0 { "M" } else { "L" };
                        format!("{command} {} {}", fixed1(p.x()), fixed1(p.y()))
                    })
                    .collect::<Vec<_>>()
                    .join(" ");
                data.push_str(" Z");
                vec![Box::new(
                    svg_element::Path::new()
                        .set("d", data)
                        .set("fill", fill)
                        .set("fill-opacity", fixed3(*opacity)),
                )]
            }
        }
    }
}

fn fixed1(value: f32) -> String {
    format!("{value:.1}")
}

fn fixed3(value: f32) -> String {
    format!("{value:.3}")
}
