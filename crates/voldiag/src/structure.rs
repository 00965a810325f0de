//! Validated graph view of a diagram.
//!
//! [`DiagramGraph`] is what every export backend consumes. Building it checks
//! the invariants a renderer relies on (a name, at least one edge, every
//! endpoint declared) and indexes nodes by ID while keeping declaration
//! order, so backends emit nodes and edges in the order they were written.
//!
//! This is an internal module; diagrams reach it only through
//! [`crate::Renderer`].

use indexmap::IndexMap;
use log::{debug, trace};
use petgraph::graph::{DiGraph, NodeIndex};

use voldiag_core::{
    identifier::Id,
    semantic::{Diagram, Edge, GraphError, Node},
};

/// Ordered, validated graph borrowed from a [`Diagram`].
#[derive(Debug)]
pub(crate) struct DiagramGraph<'a> {
    name: &'a str,
    nodes: IndexMap<Id, &'a Node>,
    edges: Vec<&'a Edge>,
}

impl<'a> DiagramGraph<'a> {
    /// Builds the graph view of `diagram`.
    ///
    /// # Errors
    ///
    /// Returns a [`GraphError`] if the diagram has no name, no edges, or an
    /// edge whose endpoint is not one of its nodes.
    pub(crate) fn from_diagram(diagram: &'a Diagram) -> Result<Self, GraphError> {
        if diagram.name().is_empty() {
            return Err(GraphError::EmptyName);
        }
        if diagram.edges().is_empty() {
            return Err(GraphError::NoEdges {
                name: diagram.name().to_string(),
            });
        }

        let nodes: IndexMap<Id, &Node> = diagram
            .nodes()
            .iter()
            .map(|node| (node.id(), node))
            .collect();

        for edge in diagram.edges() {
            for endpoint in [edge.source(), edge.target()] {
                if !nodes.contains_key(&endpoint) {
                    return Err(GraphError::UnknownNode {
                        id: endpoint.to_string(),
                    });
                }
            }
        }

        let graph = Self {
            name: diagram.name(),
            nodes,
            edges: diagram.edges().iter().collect(),
        };
        debug!(
            nodes = graph.nodes_count(),
            edges = graph.edges_count();
            "Diagram graph built"
        );
        trace!(graph:?; "Diagram graph");

        Ok(graph)
    }

    pub(crate) fn name(&self) -> &'a str {
        self.name
    }

    /// Nodes in declaration order.
    pub(crate) fn nodes(&self) -> impl Iterator<Item = &'a Node> + '_ {
        self.nodes.values().copied()
    }

    /// Edges in declaration order.
    pub(crate) fn edges(&self) -> impl Iterator<Item = &'a Edge> + '_ {
        self.edges.iter().copied()
    }

    pub(crate) fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn edges_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the declaration position of the node stored under `id`.
    pub(crate) fn position(&self, id: Id) -> Option<usize> {
        self.nodes.get_index_of(&id)
    }

    /// Converts the graph into a `petgraph` graph for algorithmic passes.
    ///
    /// Node weights are IDs and node indices match declaration positions.
    pub(crate) fn to_petgraph(&self) -> DiGraph<Id, ()> {
        let mut graph = DiGraph::with_capacity(self.nodes_count(), self.edges_count());
        for &id in self.nodes.keys() {
            graph.add_node(id);
        }

        for edge in &self.edges {
            if let (Some(source), Some(target)) =
                (self.position(edge.source()), self.position(edge.target()))
            {
                graph.add_edge(NodeIndex::new(source), NodeIndex::new(target), ());
            }
        }

        graph
    }
}
