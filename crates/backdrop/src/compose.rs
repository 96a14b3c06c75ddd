//! Distributes shapes across layers and drives the generators.

use log::{debug, trace};

use backdrop_core::{
    draw::{LayeredOutput, Primitive},
    geometry::{Bounds, Size},
    placement::Placement,
    rng::RandomSource,
    shape::{self, ShapeKind},
};

use crate::config::Config;

/// The primitives produced by one composition, tagged with their layer.
#[derive(Debug, Clone, Default)]
pub struct Composition {
    area: Size,
    items: Vec<(usize, Primitive)>,
    placed: Vec<Bounds>,
}

impl Composition {
    /// The area shapes were placed in.
    pub fn area(&self) -> Size {
        self.area
    }

    /// Primitives with their layer index, in generation order.
    pub fn items(&self) -> &[(usize, Primitive)] {
        &self.items
    }

    /// Every bounding box committed during the composition.
    pub fn placed(&self) -> &[Bounds] {
        &self.placed
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Converts the primitives into layer-ordered SVG nodes.
    pub fn to_layered_output(&self) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        for (layer, primitive) in &self.items {
            for node in primitive.render_to_svg() {
                output.add_to_layer(*layer, node);
            }
        }
        output
    }
}

/// Splits `density` generator calls over `layers` layers.
///
/// Every layer gets `density / layers` calls and the first layer also takes
/// the remainder. `layers` of zero yields no layers.
pub fn layer_counts(density: u32, layers: u32) -> Vec<u32> {
    if layers == 0 {
        return Vec::new();
    }
    let per_layer = density / layers;
    let remainder = density % layers;
    (0..layers)
        .map(|layer| if layer == 0 { per_layer + remainder } else { per_layer })
        .collect()
}

/// Generates the decorations for an `area` with the given configuration.
///
/// For every generator call a kind is picked uniformly among the enabled
/// kinds; shapes that cannot be placed are skipped. With no enabled kinds the
/// composition is empty and no draw is consumed.
pub fn compose<R: RandomSource>(config: &Config, rng: &mut R, area: Size) -> Composition {
    let kinds: Vec<ShapeKind> = config.shapes().enabled_kinds();
    if kinds.is_empty() {
        debug!("No shape kinds enabled");
        return Composition {
            area,
            ..Composition::default()
        };
    }

    let style = config.shape_style();
    let mut placement = Placement::new(area, config.center_rules());
    let mut items = Vec::new();

    let counts = layer_counts(config.density(), config.layers());
    for (layer, count) in counts.into_iter().enumerate() {
        trace!(layer, count; "Composing layer");
        for _ in 0..count {
            let Some(&kind) = rng.pick(&kinds) else {
                continue;
            };
            if let Some(primitive) = shape::generate(kind, rng, &style, &mut placement) {
                items.push((layer, primitive));
            }
        }
    }

    debug!(
        primitives = items.len(),
        boxes = placement.placed().len();
        "Composition finished",
    );

    Composition {
        area,
        items,
        placed: placement.placed().to_vec(),
    }
}
