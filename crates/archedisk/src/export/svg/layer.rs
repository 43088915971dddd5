//! Z-ordered grouping of SVG nodes.
//!
//! Each part of a disc is pushed to a [`RenderLayer`] as it is produced;
//! [`LayeredOutput::render`] then emits one `<g data-layer="...">` per
//! non-empty layer, bottom to top. Nodes keep their insertion order within a
//! layer.

use svg::node::element as svg_element;

/// Boxed SVG node.
pub type SvgNode = Box<dyn svg::Node>;

/// Layers of a rendered disc, bottom first (declaration order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Canvas fill
    Background,
    /// Outer axis spokes and labels
    Axis,
    /// Ring bands
    Ring,
    /// Ring sub-ticks
    Grid,
    /// Activity sectors and their borders
    Activity,
    /// Activity titles
    Text,
    /// Centre disc and its captions
    Center,
}

impl RenderLayer {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Axis => "axis",
            Self::Ring => "ring",
            Self::Grid => "grid",
            Self::Activity => "activity",
            Self::Text => "text",
            Self::Center => "center",
        }
    }
}

/// SVG nodes tagged with their layer.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consume the output into one group per non-empty layer, bottom first.
    pub fn render(mut self) -> Vec<SvgNode> {
        if self.is_empty() {
            return Vec::new();
        }
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result = Vec::new();
        let mut current: Option<(RenderLayer, svg_element::Group)> = None;
        for (layer, node) in self.items {
            current = match current {
                Some((open, group)) if open == layer => Some((open, group.add(node))),
                finished => {
                    if let Some((_, group)) = finished {
                        result.push(Box::new(group) as SvgNode);
                    }
                    let group = svg_element::Group::new().set("data-layer", layer.name());
                    Some((layer, group.add(node)))
                }
            };
        }
        if let Some((_, group)) = current {
            result.push(Box::new(group) as SvgNode);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use svg::node::element::{Circle, Line};

    use super::*;

    #[test]
    fn test_empty_output_renders_nothing() {
        let output = LayeredOutput::new();
        assert!(output.is_empty());
        assert!(output.render().is_empty());
    }

    #[test]
    fn test_one_group_per_layer() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Center, Box::new(Circle::new()));
        output.add_to_layer(RenderLayer::Axis, Box::new(Line::new()));
        output.add_to_layer(RenderLayer::Axis, Box::new(Line::new()));

        let mut rings = LayeredOutput::new();
        rings.add_to_layer(RenderLayer::Ring, Box::new(Circle::new()));
        output.merge(rings);

        let groups = output.render();
        assert_eq!(groups.len(), 3);

        let rendered: Vec<String> = groups.iter().map(|group| group.to_string()).collect();
        assert!(rendered[0].contains(r#"data-layer="axis""#));
        assert!(rendered[1].contains(r#"data-layer="ring""#));
        assert!(rendered[2].contains(r#"data-layer="center""#));
        assert_eq!(rendered[0].matches("<line").count(), 2);
    }
}
