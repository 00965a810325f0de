//! The fixed icon taxonomy of diagram nodes.

use std::fmt;

/// Cloud or platform that owns a node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Azure,
    Kubernetes,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Azure => write!(f, "azure"),
            Provider::Kubernetes => write!(f, "k8s"),
        }
    }
}

/// Category of an infrastructure node.
///
/// Every kind knows how it is drawn: the accent color fills the node and the
/// DOT shape stands in for the provider icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// An Azure storage account holding blob containers.
    StorageAccount,
    /// A cluster-scoped Kubernetes persistent volume.
    PersistentVolume,
    /// A namespaced Kubernetes persistent volume claim.
    PersistentVolumeClaim,
}

impl NodeKind {
    /// All kinds, in taxonomy order.
    pub const ALL: [NodeKind; 3] = [
        NodeKind::StorageAccount,
        NodeKind::PersistentVolume,
        NodeKind::PersistentVolumeClaim,
    ];

    /// Short identifier used to namespace node IDs.
    pub fn slug(self) -> &'static str {
        match self {
            NodeKind::StorageAccount => "storage-account",
            NodeKind::PersistentVolume => "pv",
            NodeKind::PersistentVolumeClaim => "pvc",
        }
    }

    /// Human readable name of the kind.
    pub fn title(self) -> &'static str {
        match self {
            NodeKind::StorageAccount => "Storage Account",
            NodeKind::PersistentVolume => "Persistent Volume",
            NodeKind::PersistentVolumeClaim => "Persistent Volume Claim",
        }
    }

    pub fn provider(self) -> Provider {
        match self {
            NodeKind::StorageAccount => Provider::Azure,
            NodeKind::PersistentVolume | NodeKind::PersistentVolumeClaim => Provider::Kubernetes,
        }
    }

    /// Fill color of the node, as a CSS hex string.
    pub fn accent(self) -> &'static str {
        match self {
            NodeKind::StorageAccount => "#0078d4",
            NodeKind::PersistentVolume => "#326ce5",
            NodeKind::PersistentVolumeClaim => "#5d8ff0",
        }
    }

    /// Graphviz node shape.
    pub fn dot_shape(self) -> &'static str {
        match self {
            NodeKind::StorageAccount => "cylinder",
            NodeKind::PersistentVolume => "box3d",
            NodeKind::PersistentVolumeClaim => "note",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::color::Color;

    use super::*;

    #[test]
    fn test_slugs_are_unique() {
        let slugs: HashSet<_> = NodeKind::ALL.iter().map(|kind| kind.slug()).collect();
        assert_eq!(slugs.len(), NodeKind::ALL.len());
    }

    #[test]
    fn test_accents_parse() {
        for kind in NodeKind::ALL {
            assert!(Color::new(kind.accent()).is_ok(), "{kind} accent");
        }
    }

    #[test]
    fn test_providers() {
        assert_eq!(NodeKind::StorageAccount.provider(), Provider::Azure);
        assert_eq!(NodeKind::PersistentVolume.provider(), Provider::Kubernetes);
        assert_eq!(NodeKind::PersistentVolumeClaim.provider().to_string(), "k8s");
    }
}
