//! The composed decorative layer attached to one container.

use svg::{Document, node::element as svg_element};

use backdrop_core::color::Color;

use crate::{compose::Composition, config::InsertPosition, seed::Seed};

/// Class carried by every surface so hosts can find and replace it.
pub const SURFACE_CLASS: &str = "seeded-svg-overlay";

/// A rendered decoration surface.
///
/// `width` and `height` are the full container size in whole pixels. The
/// composition was laid out in the inner area, which is offset by `inset` on
/// both axes.
#[derive(Debug, Clone)]
pub struct Surface {
    width: u32,
    height: u32,
    inset: f32,
    background: Option<Color>,
    z_index: i32,
    position: InsertPosition,
    seed: Seed,
    composition: Composition,
}

impl Surface {
    pub(crate) fn new(
        width: u32,
        height: u32,
        inset: f32,
        seed: Seed,
        composition: Composition,
    ) -> Self {
        Self {
            width,
            height,
            inset,
            background: None,
            z_index: 0,
            position: InsertPosition::default(),
            seed,
            composition,
        }
    }

    pub(crate) fn with_background(mut self, background: Option<Color>) -> Self {
        self.background = background;
        self
    }

    pub(crate) fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub(crate) fn with_position(mut self, position: InsertPosition) -> Self {
        self.position = position;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Inset of the content group, in pixels.
    pub fn inset(&self) -> f32 {
        self.inset
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    pub fn position(&self) -> InsertPosition {
        self.position
    }

    /// The seed the surface was generated from.
    pub fn seed(&self) -> &Seed {
        &self.seed
    }

    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    /// Builds the SVG document for this surface.
    ///
    /// The background rectangle, when present, spans the whole surface and
    /// precedes the content group. Content is grouped per layer inside a group
    /// translated by the inset.
    pub fn to_svg(&self) -> Document {
        let mut doc = Document::new()
            .set("class", SURFACE_CLASS)
            .set("viewBox", format!("0 0 {} {}", self.width, self.height))
            .set("preserveAspectRatio", "none")
            .set("aria-hidden", "true")
            .set("style", format!("z-index: {}", self.z_index))
            .set("data-position", self.position.name());

        if let Some(color) = &self.background {
            let rect = svg_element::Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", self.width)
                .set("height", self.height)
                .set("fill", color);
            doc = doc.add(rect);
        }

        let mut content = svg_element::Group::new().set(
            "transform",
            format!("translate({:.1} {:.1})", self.inset, self.inset),
        );
        for node in self.composition.to_layered_output().render() {
            content = content.add(node);
        }

        doc.add(content)
    }

    /// Serializes the surface as SVG markup.
    pub fn to_svg_string(&self) -> String {
        self.to_svg().to_string()
    }
}
