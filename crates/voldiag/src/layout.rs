//! Layered layout for the native SVG backend.
//!
//! Nodes are assigned to ranks by longest path from the roots, following a
//! topological order of the graph. Ranks are laid out along the flow
//! direction; nodes sharing a rank are stacked across it in declaration
//! order. Edges run between the boundaries of their endpoints.
//!
//! The Graphviz backends do not use this module; `dot` owns their layout.

use log::{debug, trace};
use petgraph::algo::toposort;

use voldiag_core::{
    geometry::{Bounds, Point, Size},
    semantic::Node,
};

use crate::{VoldiagError, config::Direction, structure::DiagramGraph};

/// Font size of node labels, in pixels.
pub(crate) const LABEL_FONT_SIZE: f32 = 13.0;

/// Font size of the kind caption above each label.
pub(crate) const CAPTION_FONT_SIZE: f32 = 10.0;

/// Font size of the diagram title.
pub(crate) const TITLE_FONT_SIZE: f32 = 15.0;

const MIN_NODE_SIZE: Size = Size::new(134.0, 64.0);
const NODE_PADDING: f32 = 16.0;
/// Rough glyph advance relative to font size for proportional sans fonts.
const GLYPH_WIDTH_RATIO: f32 = 0.6;
const RANK_SPACING: f32 = 72.0;
const NODE_SPACING: f32 = 40.0;
const MARGIN: f32 = 24.0;

/// A node with its final bounds.
#[derive(Debug)]
pub(crate) struct PositionedNode<'a> {
    node: &'a Node,
    bounds: Bounds,
}

impl<'a> PositionedNode<'a> {
    pub(crate) fn node(&self) -> &'a Node {
        self.node
    }

    pub(crate) fn bounds(&self) -> Bounds {
        self.bounds
    }
}

/// An edge clipped to the boundaries of its endpoints.
#[derive(Debug)]
pub(crate) struct PositionedEdge<'a> {
    start: Point,
    end: Point,
    label: Option<&'a str>,
}

impl<'a> PositionedEdge<'a> {
    pub(crate) fn start(&self) -> Point {
        self.start
    }

    pub(crate) fn end(&self) -> Point {
        self.end
    }

    pub(crate) fn label(&self) -> Option<&'a str> {
        self.label
    }
}

/// Positioned nodes and edges plus the canvas they occupy.
#[derive(Debug)]
pub(crate) struct Layout<'a> {
    nodes: Vec<PositionedNode<'a>>,
    edges: Vec<PositionedEdge<'a>>,
    canvas: Bounds,
}

impl<'a> Layout<'a> {
    /// Lays out `graph` flowing in `direction`.
    ///
    /// # Errors
    ///
    /// Returns [`VoldiagError::Layout`] if the graph contains a cycle.
    pub(crate) fn compute(
        graph: &DiagramGraph<'a>,
        direction: Direction,
    ) -> Result<Self, VoldiagError> {
        let ranks = assign_ranks(graph)?;
        let rank_count = ranks.iter().map(|&rank| rank + 1).max().unwrap_or(0);
        debug!(ranks = rank_count; "Ranks assigned");

        let sizes: Vec<Size> = graph.nodes().map(node_size).collect();

        // Thickness of each rank along the flow axis.
        let mut rank_extent = vec![0.0f32; rank_count];
        for (index, size) in sizes.iter().enumerate() {
            let extent = along(*size, direction);
            rank_extent[ranks[index]] = rank_extent[ranks[index]].max(extent);
        }

        let mut rank_offset = Vec::with_capacity(rank_count);
        let mut offset = 0.0f32;
        for extent in &rank_extent {
            rank_offset.push(offset + extent / 2.0);
            offset += extent + RANK_SPACING;
        }

        let mut cross_offset = vec![0.0f32; rank_count];
        let mut nodes = Vec::with_capacity(graph.nodes_count());
        for (index, node) in graph.nodes().enumerate() {
            let rank = ranks[index];
            let size = sizes[index];
            let cross_extent = across(size, direction);
            let flow = rank_offset[rank];
            let cross = cross_offset[rank] + cross_extent / 2.0;
            cross_offset[rank] += cross_extent + NODE_SPACING;

            let center = match direction {
                Direction::LeftRight => Point::new(flow, cross),
                Direction::TopBottom => Point::new(cross, flow),
            };
            nodes.push(PositionedNode {
                node,
                bounds: center.to_bounds(size),
            });
        }

        let edges = graph
            .edges()
            .filter_map(|edge| {
                let source = nodes[graph.position(edge.source())?].bounds;
                let target = nodes[graph.position(edge.target())?].bounds;
                Some(PositionedEdge {
                    start: source.boundary_point_toward(target.center()),
                    end: target.boundary_point_toward(source.center()),
                    label: edge.label(),
                })
            })
            .collect::<Vec<_>>();

        let canvas = nodes
            .iter()
            .map(|positioned| positioned.bounds)
            .reduce(|acc, bounds| acc.merge(&bounds))
            .unwrap_or_default()
            .expand(MARGIN);

        let layout = Self {
            nodes,
            edges,
            canvas,
        };
        trace!(layout:?; "Layout computed");
        Ok(layout)
    }

    pub(crate) fn nodes(&self) -> &[PositionedNode<'a>] {
        &self.nodes
    }

    pub(crate) fn edges(&self) -> &[PositionedEdge<'a>] {
        &self.edges
    }

    /// Area covered by all nodes plus a margin.
    pub(crate) fn canvas(&self) -> Bounds {
        self.canvas
    }
}

/// Estimated width of `text` rendered at `font_size`.
pub(crate) fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * GLYPH_WIDTH_RATIO
}

fn node_size(node: &Node) -> Size {
    let label = text_width(node.label(), LABEL_FONT_SIZE);
    let caption = text_width(node.kind().title(), CAPTION_FONT_SIZE);
    let content = Size::new(
        label.max(caption) + 2.0 * NODE_PADDING,
        LABEL_FONT_SIZE + CAPTION_FONT_SIZE + 2.0 * NODE_PADDING,
    );
    content.max(MIN_NODE_SIZE)
}

fn along(size: Size, direction: Direction) -> f32 {
    match direction {
        Direction::LeftRight => size.width(),
        Direction::TopBottom => size.height(),
    }
}

fn across(size: Size, direction: Direction) -> f32 {
    match direction {
        Direction::LeftRight => size.height(),
        Direction::TopBottom => size.width(),
    }
}

/// Returns the rank of every node, indexed by declaration position.
fn assign_ranks(graph: &DiagramGraph<'_>) -> Result<Vec<usize>, VoldiagError> {
    let petgraph = graph.to_petgraph();
    let order = toposort(&petgraph, None).map_err(|cycle| {
        let id = petgraph[cycle.node_id()];
        VoldiagError::Layout(format!(
            "cycle through `{id}`; the native layout only supports acyclic diagrams"
        ))
    })?;

    let mut ranks = vec![0usize; graph.nodes_count()];
    for index in order {
        let source_rank = ranks[index.index()];
        for target in petgraph.neighbors(index) {
            let target_rank = &mut ranks[target.index()];
            *target_rank = (*target_rank).max(source_rank + 1);
        }
    }

    Ok(ranks)
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use voldiag_core::semantic::{DiagramBuilder, NodeKind};

    use super::*;
    use crate::storage_chain;

    #[test]
    fn test_chain_ranks() {
        let diagram = storage_chain("diagram").unwrap();
        let graph = DiagramGraph::from_diagram(&diagram).unwrap();
        assert_eq!(assign_ranks(&graph).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_left_right_flow() {
        let diagram = storage_chain("diagram").unwrap();
        let graph = DiagramGraph::from_diagram(&diagram).unwrap();
        let layout = Layout::compute(&graph, Direction::LeftRight).unwrap();

        let centers: Vec<Point> = layout
            .nodes()
            .iter()
            .map(|positioned| positioned.bounds().center())
            .collect();
        assert!(centers[0].x() < centers[1].x());
        assert!(centers[1].x() < centers[2].x());
        assert!(approx_eq!(f32, centers[0].y(), centers[2].y(), epsilon = 0.01));
        assert_eq!(layout.edges().len(), 2);
    }

    #[test]
    fn test_top_bottom_flow() {
        let diagram = storage_chain("diagram").unwrap();
        let graph = DiagramGraph::from_diagram(&diagram).unwrap();
        let layout = Layout::compute(&graph, Direction::TopBottom).unwrap();

        let first = layout.nodes()[0].bounds();
        let last = layout.nodes()[2].bounds();
        assert!(first.max_y() < last.min_y());
    }

    #[test]
    fn test_edges_clip_to_node_boundaries() {
        let diagram = storage_chain("diagram").unwrap();
        let graph = DiagramGraph::from_diagram(&diagram).unwrap();
        let layout = Layout::compute(&graph, Direction::LeftRight).unwrap();

        let source = layout.nodes()[0].bounds();
        let target = layout.nodes()[1].bounds();
        let edge = &layout.edges()[0];
        assert!(approx_eq!(f32, edge.start().x(), source.max_x(), epsilon = 0.01));
        assert!(approx_eq!(f32, edge.end().x(), target.min_x(), epsilon = 0.01));
    }

    #[test]
    fn test_canvas_contains_nodes() {
        let diagram = storage_chain("diagram").unwrap();
        let graph = DiagramGraph::from_diagram(&diagram).unwrap();
        let layout = Layout::compute(&graph, Direction::LeftRight).unwrap();
        let canvas = layout.canvas();

        for positioned in layout.nodes() {
            let bounds = positioned.bounds();
            assert!(canvas.min_x() < bounds.min_x() && canvas.max_x() > bounds.max_x());
            assert!(canvas.min_y() < bounds.min_y() && canvas.max_y() > bounds.max_y());
        }
    }

    #[test]
    fn test_shared_rank_stacks_nodes() {
        let mut builder = DiagramBuilder::new("fan-out");
        let account = builder.node(NodeKind::StorageAccount, "standard");
        let alice = builder.node(NodeKind::PersistentVolume, "alice-standard");
        let bob = builder.node(NodeKind::PersistentVolume, "bob-standard");
        builder.edge(account, alice).unwrap();
        builder.edge(account, bob).unwrap();
        let diagram = builder.build().unwrap();
        let graph = DiagramGraph::from_diagram(&diagram).unwrap();
        let layout = Layout::compute(&graph, Direction::LeftRight).unwrap();

        let alice = layout.nodes()[1].bounds();
        let bob = layout.nodes()[2].bounds();
        assert!(approx_eq!(f32, alice.center().x(), bob.center().x(), epsilon = 0.01));
        assert!(alice.max_y() < bob.min_y());
    }

    #[test]
    fn test_cycle_is_rejected() {
        let mut builder = DiagramBuilder::new("loop");
        let volume = builder.node(NodeKind::PersistentVolume, "alice-standard");
        let claim = builder.node(NodeKind::PersistentVolumeClaim, "alice-standard");
        builder.chain(&[volume, claim, volume]).unwrap();
        let diagram = builder.build().unwrap();
        let graph = DiagramGraph::from_diagram(&diagram).unwrap();

        let err = Layout::compute(&graph, Direction::LeftRight).unwrap_err();
        assert!(matches!(err, VoldiagError::Layout(_)), "{err}");
    }

    #[test]
    fn test_long_labels_widen_nodes() {
        let mut builder = DiagramBuilder::new("wide");
        let account = builder.node(NodeKind::StorageAccount, "a");
        let volume = builder.node(
            NodeKind::PersistentVolume,
            "a-very-long-profile-name-standard-readonly",
        );
        builder.edge(account, volume).unwrap();
        let diagram = builder.build().unwrap();
        let graph = DiagramGraph::from_diagram(&diagram).unwrap();
        let layout = Layout::compute(&graph, Direction::LeftRight).unwrap();

        assert!(layout.nodes()[1].bounds().width() > layout.nodes()[0].bounds().width());
    }
}
