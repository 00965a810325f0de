//! Explicit builder for [`Diagram`] values.

use log::{debug, trace};

use super::{Diagram, Edge, GraphError, Node, NodeKind};
use crate::identifier::Id;

/// Assembles a [`Diagram`] node by node and edge by edge.
///
/// Declaring the same kind and label twice returns the existing node, so a
/// shared storage account can be referenced from several chains. Repeating an
/// edge with the same endpoints and label keeps the first one.
#[derive(Debug, Clone)]
pub struct DiagramBuilder {
    name: String,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl DiagramBuilder {
    /// Starts a diagram whose output file will be named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Declares a node and returns its ID.
    pub fn node(&mut self, kind: NodeKind, label: impl Into<String>) -> Id {
        let node = Node::new(kind, label);
        let id = node.id();
        if self.contains(id) {
            trace!(id:% = id; "Node already declared");
        } else {
            self.nodes.push(node);
        }
        id
    }

    /// Adds a directed edge between two declared nodes.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownNode`] if either endpoint was not declared
    /// on this builder.
    pub fn edge(&mut self, source: Id, target: Id) -> Result<&mut Self, GraphError> {
        self.push_edge(source, target, None)
    }

    /// Adds a labeled directed edge between two declared nodes.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownNode`] if either endpoint was not declared.
    pub fn edge_with_label(
        &mut self,
        source: Id,
        target: Id,
        label: impl Into<String>,
    ) -> Result<&mut Self, GraphError> {
        self.push_edge(source, target, Some(label.into()))
    }

    /// Connects consecutive nodes: `[a, b, c]` adds `a -> b` and `b -> c`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownNode`] on the first undeclared node; edges
    /// before it stay added.
    pub fn chain(&mut self, ids: &[Id]) -> Result<&mut Self, GraphError> {
        for pair in ids.windows(2) {
            self.push_edge(pair[0], pair[1], None)?;
        }
        Ok(self)
    }

    /// Finishes the diagram.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EmptyName`] for an empty name,
    /// [`GraphError::EmptyLabel`] if a node has an empty label and
    /// [`GraphError::NoEdges`] if no edge was declared.
    pub fn build(self) -> Result<Diagram, GraphError> {
        if self.name.is_empty() {
            return Err(GraphError::EmptyName);
        }
        if let Some(node) = self.nodes.iter().find(|node| node.label().is_empty()) {
            return Err(GraphError::EmptyLabel { kind: node.kind() });
        }
        if self.edges.is_empty() {
            return Err(GraphError::NoEdges { name: self.name });
        }

        debug!(
            name = self.name,
            nodes = self.nodes.len(),
            edges = self.edges.len();
            "Diagram built"
        );

        Ok(Diagram {
            name: self.name,
            nodes: self.nodes,
            edges: self.edges,
        })
    }

    fn contains(&self, id: Id) -> bool {
        self.nodes.iter().any(|node| node.id() == id)
    }

    fn push_edge(
        &mut self,
        source: Id,
        target: Id,
        label: Option<String>,
    ) -> Result<&mut Self, GraphError> {
        for endpoint in [source, target] {
            if !self.contains(endpoint) {
                return Err(GraphError::UnknownNode {
                    id: endpoint.to_string(),
                });
            }
        }
        let edge = Edge::new(source, target, label);
        if self.edges.contains(&edge) {
            trace!(source:% = source, target:% = target; "Edge already declared");
        } else {
            self.edges.push(edge);
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage_chain() -> (DiagramBuilder, [Id; 3]) {
        let mut builder = DiagramBuilder::new("diagram");
        let account = builder.node(NodeKind::StorageAccount, "standard");
        let volume = builder.node(NodeKind::PersistentVolume, "alice-standard");
        let claim = builder.node(NodeKind::PersistentVolumeClaim, "alice-standard");
        (builder, [account, volume, claim])
    }

    #[test]
    fn test_chain_preserves_declaration_order() {
        let (mut builder, ids) = storage_chain();
        builder.chain(&ids).unwrap();
        let diagram = builder.build().unwrap();

        let edges: Vec<(Id, Id)> = diagram
            .edges()
            .iter()
            .map(|edge| (edge.source(), edge.target()))
            .collect();
        assert_eq!(edges, vec![(ids[0], ids[1]), (ids[1], ids[2])]);
        assert!(
            !edges.contains(&(ids[2], ids[0])),
            "chain must not close the loop"
        );
    }

    #[test]
    fn test_same_label_different_kind_are_distinct() {
        let (builder, [_, volume, claim]) = storage_chain();
        assert_ne!(volume, claim);
        assert_eq!(builder.nodes.len(), 3);
    }

    #[test]
    fn test_redeclared_node_is_reused() {
        let mut builder = DiagramBuilder::new("diagram");
        let first = builder.node(NodeKind::StorageAccount, "standard");
        let second = builder.node(NodeKind::StorageAccount, "standard");
        assert_eq!(first, second);
        assert_eq!(builder.nodes.len(), 1);
    }

    #[test]
    fn test_redeclared_edge_is_reused() {
        let (mut builder, ids) = storage_chain();
        builder.chain(&ids).unwrap();
        builder.chain(&ids).unwrap();
        builder.edge(ids[0], ids[1]).unwrap();
        let diagram = builder.build().unwrap();

        assert_eq!(diagram.edges().len(), 2);
    }

    #[test]
    fn test_edges_with_different_labels_are_distinct() {
        let (mut builder, [_, volume, claim]) = storage_chain();
        builder
            .edge_with_label(volume, claim, "ReadWriteMany")
            .unwrap()
            .edge_with_label(volume, claim, "ReadOnlyMany")
            .unwrap()
            .edge_with_label(volume, claim, "ReadOnlyMany")
            .unwrap();
        let diagram = builder.build().unwrap();

        let labels: Vec<_> = diagram.edges().iter().map(|edge| edge.label()).collect();
        assert_eq!(labels, vec![Some("ReadWriteMany"), Some("ReadOnlyMany")]);
    }

    #[test]
    fn test_edge_to_undeclared_node_fails() {
        let mut builder = DiagramBuilder::new("diagram");
        let account = builder.node(NodeKind::StorageAccount, "standard");
        let stranger = Node::id_for(NodeKind::PersistentVolume, "nobody");

        let err = builder.edge(account, stranger).unwrap_err();
        assert_eq!(
            err,
            GraphError::UnknownNode {
                id: "pv::nobody".to_string()
            }
        );
    }

    #[test]
    fn test_build_without_edges_fails() {
        let mut builder = DiagramBuilder::new("lonely");
        builder.node(NodeKind::StorageAccount, "standard");
        assert_eq!(
            builder.build().unwrap_err(),
            GraphError::NoEdges {
                name: "lonely".to_string()
            }
        );
    }

    #[test]
    fn test_build_with_empty_name_fails() {
        let (mut builder, ids) = storage_chain();
        builder.name.clear();
        builder.chain(&ids).unwrap();
        assert_eq!(builder.build().unwrap_err(), GraphError::EmptyName);
    }

    #[test]
    fn test_build_with_empty_label_fails() {
        let mut builder = DiagramBuilder::new("diagram");
        let account = builder.node(NodeKind::StorageAccount, "");
        let volume = builder.node(NodeKind::PersistentVolume, "alice-standard");
        builder.edge(account, volume).unwrap();
        assert_eq!(
            builder.build().unwrap_err(),
            GraphError::EmptyLabel {
                kind: NodeKind::StorageAccount
            }
        );
    }

    #[test]
    fn test_edge_label() {
        let (mut builder, [_, volume, claim]) = storage_chain();
        builder
            .edge_with_label(volume, claim, "ReadWriteMany")
            .unwrap();
        let diagram = builder.build().unwrap();
        assert_eq!(diagram.edges()[0].label(), Some("ReadWriteMany"));
        assert_eq!(diagram.node(claim).unwrap().label(), "alice-standard");
    }
}
