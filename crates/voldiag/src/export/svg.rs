//! Native SVG backend.
//!
//! Lays the graph out with [`crate::layout`] and draws it with the `svg`
//! crate: rounded boxes filled with the kind's accent color, the kind as a
//! caption above the label, arrows between box boundaries and the diagram
//! name as a title below everything.

use log::{debug, info};
use svg::{
    Document, Node as _,
    node::{
        Text as TextNode,
        element::{Definitions, Group, Line, Marker, Path, Rectangle, Text},
    },
};

use voldiag_core::{
    color::Color,
    geometry::{Bounds, Point, Size},
};

use super::{Exporter, OutputFormat, Theme};
use crate::{
    VoldiagError,
    layout::{self, CAPTION_FONT_SIZE, LABEL_FONT_SIZE, Layout, TITLE_FONT_SIZE},
    structure::DiagramGraph,
};

const ARROW_MARKER_ID: &str = "arrow";
const TEXT_COLOR: &str = "#ffffff";
const TITLE_COLOR: &str = "#2d3436";
const CORNER_RADIUS: f32 = 8.0;
const TITLE_GAP: f32 = 12.0;

pub(crate) struct SvgExporter {
    theme: Theme,
}

impl SvgExporter {
    pub(crate) fn new(theme: Theme) -> Self {
        Self { theme }
    }

    fn render_document(&self, graph: &DiagramGraph<'_>, layout: &Layout<'_>) -> Document {
        let nodes_canvas = layout.canvas();
        let title = graph.name();
        let title_height = TITLE_FONT_SIZE + TITLE_GAP;
        let title_width = layout::text_width(title, TITLE_FONT_SIZE);

        // Widen the canvas when the title is longer than the drawing.
        let extra_width = (title_width - nodes_canvas.width()).max(0.0);
        let canvas = Bounds::new_from_center(
            Point::new(
                nodes_canvas.center().x(),
                nodes_canvas.center().y() + title_height / 2.0,
            ),
            Size::new(
                nodes_canvas.width() + extra_width,
                nodes_canvas.height() + title_height,
            ),
        );

        let mut document = Document::new()
            .set(
                "viewBox",
                format!(
                    "{} {} {} {}",
                    canvas.min_x(),
                    canvas.min_y(),
                    canvas.width(),
                    canvas.height()
                ),
            )
            .set("width", canvas.width())
            .set("height", canvas.height())
            .set("font-family", self.theme.font_family());

        if let Some(background) = self.theme.background() {
            document = document.add(
                Rectangle::new()
                    .set("x", canvas.min_x())
                    .set("y", canvas.min_y())
                    .set("width", canvas.width())
                    .set("height", canvas.height())
                    .set("fill", background.to_string())
                    .set("fill-opacity", background.alpha()),
            );
        }

        document = document.add(self.arrow_definitions());

        for edge in layout.edges() {
            document = document.add(self.render_edge(edge));
        }
        for positioned in layout.nodes() {
            document = document.add(self.render_node(positioned));
        }

        document.add(
            Text::new("")
                .set("x", canvas.center().x())
                .set("y", canvas.max_y() - TITLE_GAP / 2.0)
                .set("text-anchor", "middle")
                .set("font-size", TITLE_FONT_SIZE)
                .set("fill", TITLE_COLOR)
                .add(TextNode::new(title)),
        )
    }

    fn arrow_definitions(&self) -> Definitions {
        let edge_color = self.theme.edge_color();
        let head = Path::new()
            .set("d", "M 0 0 L 10 5 L 0 10 z")
            .set("fill", edge_color.to_string())
            .set("fill-opacity", edge_color.alpha());

        Definitions::new().add(
            Marker::new()
                .set("id", ARROW_MARKER_ID)
                .set("viewBox", "0 0 10 10")
                .set("refX", 9)
                .set("refY", 5)
                .set("markerWidth", 8)
                .set("markerHeight", 8)
                .set("orient", "auto")
                .add(head),
        )
    }

    fn render_edge(&self, edge: &layout::PositionedEdge<'_>) -> Group {
        let edge_color = self.theme.edge_color();
        let start = edge.start();
        let end = edge.end();

        let mut group = Group::new().set("class", "edge").add(
            Line::new()
                .set("x1", start.x())
                .set("y1", start.y())
                .set("x2", end.x())
                .set("y2", end.y())
                .set("stroke", edge_color.to_string())
                .set("stroke-opacity", edge_color.alpha())
                .set("stroke-width", 1.5)
                .set("marker-end", format!("url(#{ARROW_MARKER_ID})")),
        );

        if let Some(label) = edge.label() {
            let middle = Point::new((start.x() + end.x()) / 2.0, (start.y() + end.y()) / 2.0);
            group.append(
                Text::new("")
                    .set("x", middle.x())
                    .set("y", middle.y() - CAPTION_FONT_SIZE / 2.0)
                    .set("text-anchor", "middle")
                    .set("font-size", CAPTION_FONT_SIZE)
                    .set("fill", TITLE_COLOR)
                    .add(TextNode::new(label)),
            );
        }

        group
    }

    fn render_node(&self, positioned: &layout::PositionedNode<'_>) -> Group {
        let node = positioned.node();
        let bounds = positioned.bounds();
        let center = bounds.center();
        let fill = Color::new(node.kind().accent()).unwrap_or_default();

        let caption_y = center.y() - LABEL_FONT_SIZE / 2.0;
        let label_y = center.y() + CAPTION_FONT_SIZE;

        Group::new()
            .set(
                "class",
                format!("node {} {}", node.kind().provider(), node.kind().slug()),
            )
            .set("id", node.id().to_string())
            .add(
                Rectangle::new()
                    .set("x", bounds.min_x())
                    .set("y", bounds.min_y())
                    .set("width", bounds.width())
                    .set("height", bounds.height())
                    .set("rx", CORNER_RADIUS)
                    .set("fill", fill.to_string()),
            )
            .add(
                Text::new("")
                    .set("x", center.x())
                    .set("y", caption_y)
                    .set("text-anchor", "middle")
                    .set("font-size", CAPTION_FONT_SIZE)
                    .set("fill", TEXT_COLOR)
                    .set("fill-opacity", 0.85)
                    .add(TextNode::new(node.kind().title())),
            )
            .add(
                Text::new("")
                    .set("x", center.x())
                    .set("y", label_y)
                    .set("text-anchor", "middle")
                    .set("font-size", LABEL_FONT_SIZE)
                    .set("font-weight", "bold")
                    .set("fill", TEXT_COLOR)
                    .add(TextNode::new(node.label())),
            )
    }
}

impl Exporter for SvgExporter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Svg
    }

    fn export(&self, graph: &DiagramGraph<'_>) -> Result<Vec<u8>, VoldiagError> {
        info!(direction:% = self.theme.direction(); "Laying out diagram");
        let layout = Layout::compute(graph, self.theme.direction())?;

        let document = self.render_document(graph, &layout);
        let rendered = document.to_string();
        debug!(bytes = rendered.len(); "SVG document rendered");

        Ok(rendered.into_bytes())
    }
}
