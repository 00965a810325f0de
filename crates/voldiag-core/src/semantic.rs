//! Semantic model of a storage diagram.
//!
//! A [`Diagram`] owns an ordered list of typed [`Node`]s, an ordered list of
//! directed [`Edge`]s between them and the name its output file is written
//! under. Diagrams are immutable; they are assembled with a
//! [`DiagramBuilder`], which rejects edges whose endpoints were never declared.
//!
//! # Example
//!
//! ```
//! use voldiag_core::semantic::{DiagramBuilder, NodeKind};
//!
//! let mut builder = DiagramBuilder::new("diagram");
//! let account = builder.node(NodeKind::StorageAccount, "standard");
//! let volume = builder.node(NodeKind::PersistentVolume, "alice-standard");
//! let claim = builder.node(NodeKind::PersistentVolumeClaim, "alice-standard");
//! builder.chain(&[account, volume, claim]).unwrap();
//!
//! let diagram = builder.build().unwrap();
//! assert_eq!(diagram.nodes().len(), 3);
//! assert_eq!(diagram.edges().len(), 2);
//! ```

mod builder;
mod kind;

pub use builder::DiagramBuilder;
pub use kind::{NodeKind, Provider};

use thiserror::Error;

use crate::identifier::Id;

/// Errors raised while assembling a diagram.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("diagram name must not be empty")]
    EmptyName,

    #[error("{kind} node has an empty label")]
    EmptyLabel { kind: NodeKind },

    #[error("edge references undeclared node `{id}`")]
    UnknownNode { id: String },

    #[error("diagram `{name}` has no edges")]
    NoEdges { name: String },
}

/// A labeled, typed infrastructure node.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: Id,
    kind: NodeKind,
    label: String,
}

impl Node {
    pub(crate) fn new(kind: NodeKind, label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            id: Self::id_for(kind, &label),
            kind,
            label,
        }
    }

    /// Returns the ID a node of `kind` labeled `label` is stored under.
    pub fn id_for(kind: NodeKind, label: &str) -> Id {
        Id::new(kind.slug()).create_nested(Id::new(label))
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Display name of the node.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// A directed edge from `source` to `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    source: Id,
    target: Id,
    label: Option<String>,
}

impl Edge {
    pub(crate) fn new(source: Id, target: Id, label: Option<String>) -> Self {
        Self {
            source,
            target,
            label,
        }
    }

    pub fn source(&self) -> Id {
        self.source
    }

    pub fn target(&self) -> Id {
        self.target
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// A complete diagram: nodes, edges and output name.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    name: String,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Diagram {
    /// Name of the output file, without extension.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Nodes in declaration order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Edges in declaration order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the node stored under `id`.
    pub fn node(&self, id: Id) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }
}
