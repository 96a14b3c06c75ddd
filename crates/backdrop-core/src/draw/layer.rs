//! Layer-ordered SVG output.
//!
//! Decorations are generated in a fixed number of layers. Every node is tagged
//! with the index of the layer that produced it; rendering wraps each
//! non-empty layer in its own `<g data-layer="N">` so later layers stack
//! visually above earlier ones.
//!
//! # Example
//!
//! ```
//! # use backdrop_core::draw::LayeredOutput;
//! # use svg::node::element::Circle;
//!
//! let mut output = LayeredOutput::new();
//! output.add_to_layer(1, Box::new(Circle::new()));
//! output.add_to_layer(0, Box::new(Circle::new()));
//!
//! let groups = output.render();
//! assert_eq!(groups.len(), 2);
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// SVG nodes grouped by decoration layer.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(usize, SvgNode)>,
}

impl LayeredOutput {
    /// Creates a new empty `LayeredOutput`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single node to the specified layer.
    ///
    /// Nodes keep their insertion order within a layer.
    pub fn add_to_layer(&mut self, layer: usize, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Returns `true` if there are no nodes in any layer.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the total number of nodes across all layers.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Renders all layers to SVG groups, consuming the output.
    ///
    /// Each non-empty layer becomes a `<g>` with a `data-layer` attribute.
    /// Groups are emitted in ascending layer order; the sort is stable so
    /// draw order within a layer is preserved.
    pub fn render(mut self) -> Vec<SvgNode> {
        if self.is_empty() {
            return Vec::new();
        }

        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result = Vec::new();
        let mut current_layer = self.items[0].0;
        let mut current_group = svg_element::Group::new().set("data-layer", current_layer);

        for (layer, node) in self.items {
            if layer != current_layer {
                result.push(Box::new(current_group) as SvgNode);

                current_layer = layer;
                current_group = svg_element::Group::new().set("data-layer", layer);
            }

            current_group = current_group.add(node);
        }

        result.push(Box::new(current_group) as SvgNode);

        result
    }
}
