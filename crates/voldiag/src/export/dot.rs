//! DOT source backend.
//!
//! Translates a [`DiagramGraph`] into `dot-structures` values. The same graph
//! feeds the PNG backend, which hands it to the Graphviz engine, so both
//! outputs always agree on nodes, edges and styling.

use dot_structures::{
    Attribute, Edge as DotEdge, EdgeTy, Graph, GraphAttributes, Id as DotId, Node as DotNode,
    NodeId, Stmt, Vertex,
};
use graphviz_rust::printer::{DotPrinter, PrinterContext};
use log::debug;

use voldiag_core::{color::Color, identifier::Id};

use super::{Exporter, OutputFormat, Theme};
use crate::{VoldiagError, structure::DiagramGraph};

const TITLE_COLOR: &str = "#2d3436";
const TITLE_FONT_SIZE: &str = "15";
const NODE_FONT_SIZE: &str = "13";

pub(crate) struct DotExporter {
    theme: Theme,
}

impl DotExporter {
    pub(crate) fn new(theme: Theme) -> Self {
        Self { theme }
    }
}

impl Exporter for DotExporter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Dot
    }

    fn export(&self, graph: &DiagramGraph<'_>) -> Result<Vec<u8>, VoldiagError> {
        let source = build_graph(graph, &self.theme).print(&mut PrinterContext::default());
        debug!(bytes = source.len(); "DOT source printed");
        Ok(source.into_bytes())
    }
}

/// Builds the Graphviz graph for `graph` styled with `theme`.
pub(crate) fn build_graph(graph: &DiagramGraph<'_>, theme: &Theme) -> Graph {
    let mut stmts = Vec::with_capacity(graph.nodes_count() + graph.edges_count() + 3);

    let mut graph_attributes = vec![
        attribute("rankdir", plain(theme.direction())),
        attribute("pad", plain("2.0")),
        attribute("splines", plain("ortho")),
        attribute("nodesep", plain("0.60")),
        attribute("ranksep", plain("0.75")),
        attribute("fontname", quoted(theme.font_family())),
        attribute("fontsize", plain(TITLE_FONT_SIZE)),
        attribute("fontcolor", quoted(TITLE_COLOR)),
        attribute("label", quoted(graph.name())),
    ];
    if let Some(background) = theme.background() {
        graph_attributes.push(attribute("bgcolor", color(&background)));
    }
    stmts.push(Stmt::GAttribute(GraphAttributes::Graph(graph_attributes)));

    stmts.push(Stmt::GAttribute(GraphAttributes::Node(vec![
        attribute("style", plain("filled")),
        attribute("fontcolor", quoted("white")),
        attribute("fontsize", plain(NODE_FONT_SIZE)),
        attribute("fontname", quoted(theme.font_family())),
    ])));
    stmts.push(Stmt::GAttribute(GraphAttributes::Edge(vec![attribute(
        "color",
        color(&theme.edge_color()),
    )])));

    for node in graph.nodes() {
        let kind = node.kind();
        let mut attributes = vec![
            attribute("label", multiline(&[kind.title(), node.label()])),
            attribute("shape", plain(kind.dot_shape())),
        ];
        if let Ok(accent) = Color::new(kind.accent()) {
            attributes.push(attribute("fillcolor", color(&accent)));
        }
        stmts.push(Stmt::Node(DotNode {
            id: node_id(node.id()),
            attributes,
        }));
    }

    for edge in graph.edges() {
        let attributes = edge
            .label()
            .map(|label| vec![attribute("label", quoted(label))])
            .unwrap_or_default();
        stmts.push(Stmt::Edge(DotEdge {
            ty: EdgeTy::Pair(
                Vertex::N(node_id(edge.source())),
                Vertex::N(node_id(edge.target())),
            ),
            attributes,
        }));
    }

    Graph::DiGraph {
        id: quoted(graph.name()),
        strict: false,
        stmts,
    }
}

fn node_id(id: Id) -> NodeId {
    NodeId(quoted(&id.to_string()), None)
}

fn attribute(key: &str, value: DotId) -> Attribute {
    Attribute(plain(key), value)
}

fn plain(value: impl ToString) -> DotId {
    DotId::Plain(value.to_string())
}

fn color(color: &Color) -> DotId {
    quoted(&color.to_hex())
}

/// Returns `value` as a quoted DOT string.
fn quoted(value: &str) -> DotId {
    DotId::Escaped(format!("\"{}\"", escape(value)))
}

/// Returns `lines` as one quoted DOT string separated by centered line breaks.
fn multiline(lines: &[&str]) -> DotId {
    let joined = lines
        .iter()
        .map(|line| escape(line))
        .collect::<Vec<_>>()
        .join("\\n");
    DotId::Escaped(format!("\"{joined}\""))
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
