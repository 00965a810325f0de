//! Profile and storage-instance topology.
//!
//! Each user profile receives one persistent volume per blob storage
//! instance. Volumes are cluster-scoped, so their names carry the profile:
//! `<profile>-<instance>`. A [`Topology`] expands into the diagram of those
//! provisioning chains:
//!
//! ```text
//! StorageAccount(instance) -> PersistentVolume(<profile>-<instance>) -> PersistentVolumeClaim(<profile>-<instance>)
//! ```
//!
//! The default topology (profile `alice`, instance `standard`) expands to the
//! canonical three-node chain.

use std::fmt;

use log::{debug, info};
use serde::Deserialize;

use voldiag_core::semantic::{Diagram, DiagramBuilder, NodeKind};

use crate::VoldiagError;

/// Profile used when none is configured.
pub const DEFAULT_PROFILE: &str = "alice";

/// Storage instance used when none is configured.
pub const DEFAULT_INSTANCE: &str = "standard";

/// Access mode granted to every pod mounting a volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    ReadWriteMany,
    ReadOnlyMany,
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessMode::ReadWriteMany => write!(f, "ReadWriteMany"),
            AccessMode::ReadOnlyMany => write!(f, "ReadOnlyMany"),
        }
    }
}

/// A blob storage class backed by one storage account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Instance {
    name: String,

    #[serde(default)]
    read_only: bool,
}

impl Instance {
    pub fn new(name: impl Into<String>, read_only: bool) -> Self {
        Self {
            name: name.into(),
            read_only,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn read_only(&self) -> bool {
        self.read_only
    }

    pub fn access_mode(&self) -> AccessMode {
        if self.read_only {
            AccessMode::ReadOnlyMany
        } else {
            AccessMode::ReadWriteMany
        }
    }
}

/// Returns the cluster-unique volume name of `instance` in `profile`.
///
/// ```
/// use voldiag::topology::{Instance, volume_name};
///
/// assert_eq!(volume_name("alice", &Instance::new("standard", false)), "alice-standard");
/// ```
pub fn volume_name(profile: &str, instance: &Instance) -> String {
    format!("{profile}-{}", instance.name)
}

/// Profiles and instances to draw.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Topology {
    profiles: Vec<String>,
    instances: Vec<Instance>,
    /// Label volume-to-claim edges with the instance's access mode.
    show_access_modes: bool,
}

impl Default for Topology {
    fn default() -> Self {
        Self {
            profiles: vec![DEFAULT_PROFILE.to_string()],
            instances: vec![Instance::new(DEFAULT_INSTANCE, false)],
            show_access_modes: false,
        }
    }
}

impl Topology {
    pub fn new(profiles: Vec<String>, instances: Vec<Instance>) -> Self {
        Self {
            profiles,
            instances,
            show_access_modes: false,
        }
    }

    /// Enables or disables access-mode labels on volume-to-claim edges.
    pub fn with_access_modes(mut self, show: bool) -> Self {
        self.show_access_modes = show;
        self
    }

    pub fn profiles(&self) -> &[String] {
        &self.profiles
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    /// Expands the topology into a diagram named `name`.
    ///
    /// Chains are declared profile by profile, instance by instance. A
    /// storage account shared by several profiles is drawn once.
    ///
    /// # Errors
    ///
    /// Returns [`VoldiagError::Graph`] if the topology is empty (no profiles
    /// or no instances) or contains empty names.
    pub fn to_diagram(&self, name: &str) -> Result<Diagram, VoldiagError> {
        info!(
            profiles = self.profiles.len(),
            instances = self.instances.len();
            "Expanding topology"
        );

        let mut builder = DiagramBuilder::new(name);
        for profile in &self.profiles {
            for instance in &self.instances {
                let volume = volume_name(profile, instance);
                let account = builder.node(NodeKind::StorageAccount, instance.name());
                let pv = builder.node(NodeKind::PersistentVolume, volume.as_str());
                let pvc = builder.node(NodeKind::PersistentVolumeClaim, volume.as_str());

                builder.edge(account, pv)?;
                if self.show_access_modes {
                    builder.edge_with_label(pv, pvc, instance.access_mode().to_string())?;
                } else {
                    builder.edge(pv, pvc)?;
                }
                debug!(profile = profile, instance = instance.name(); "Chain declared");
            }
        }

        Ok(builder.build()?)
    }
}
