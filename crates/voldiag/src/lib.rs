//! Voldiag - diagrams of Azure storage accounts feeding Kubernetes volumes.
//!
//! A diagram is a small directed graph of storage accounts, persistent
//! volumes and persistent volume claims. It is declared with an explicit
//! [`DiagramBuilder`](semantic::DiagramBuilder), expanded from a
//! [`Topology`](topology::Topology), or taken ready-made from
//! [`storage_chain`]. [`Renderer`] turns it into a single `<name>.<ext>`
//! file through one of the export backends.

pub mod config;
pub mod export;
pub mod naming;
pub mod topology;

mod error;
mod layout;
mod output;
mod structure;

pub use voldiag_core::{color, geometry, identifier, semantic};

pub use error::VoldiagError;

use std::path::PathBuf;

use log::{debug, info};

use config::AppConfig;
use semantic::{Diagram, DiagramBuilder, NodeKind};
use topology::{DEFAULT_INSTANCE, DEFAULT_PROFILE, Instance};

/// Builds the canonical storage chain named `name`:
///
/// ```text
/// StorageAccount("standard") -> PersistentVolume("alice-standard") -> PersistentVolumeClaim("alice-standard")
/// ```
///
/// # Errors
///
/// Returns [`VoldiagError::Graph`] if `name` is empty.
///
/// # Examples
///
/// ```
/// let diagram = voldiag::storage_chain("diagram").unwrap();
/// assert_eq!(diagram.nodes().len(), 3);
/// assert_eq!(diagram.edges().len(), 2);
/// ```
pub fn storage_chain(name: &str) -> Result<Diagram, VoldiagError> {
    let volume = topology::volume_name(DEFAULT_PROFILE, &Instance::new(DEFAULT_INSTANCE, false));

    let mut builder = DiagramBuilder::new(name);
    let account = builder.node(NodeKind::StorageAccount, DEFAULT_INSTANCE);
    let pv = builder.node(NodeKind::PersistentVolume, volume.as_str());
    let pvc = builder.node(NodeKind::PersistentVolumeClaim, volume);
    builder.chain(&[account, pv, pvc])?;

    Ok(builder.build()?)
}

/// Renders diagrams to files with a fixed configuration.
///
/// Rendering is a pure function of the diagram and the configuration; the
/// renderer holds no state between calls.
///
/// # Examples
///
/// ```rust,no_run
/// use voldiag::{Renderer, config::AppConfig, storage_chain};
///
/// let diagram = storage_chain("diagram").expect("Failed to build diagram");
/// let path = Renderer::new(AppConfig::default())
///     .render(&diagram)
///     .expect("Failed to render");
/// println!("wrote {}", path.display());
/// ```
#[derive(Debug, Default)]
pub struct Renderer {
    config: AppConfig,
}

impl Renderer {
    /// Create a new renderer with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the path [`Renderer::render`] writes `diagram` to.
    pub fn output_path(&self, diagram: &Diagram) -> PathBuf {
        let format = self.config.render().backend().format();
        self.config
            .render()
            .output_dir()
            .join(format!("{}.{}", diagram.name(), format.extension()))
    }

    /// Renders `diagram` into the bytes of the configured output format.
    ///
    /// # Errors
    ///
    /// Returns `VoldiagError` for invalid graphs, invalid style values,
    /// layout failures, or backend failures.
    pub fn render_bytes(&self, diagram: &Diagram) -> Result<Vec<u8>, VoldiagError> {
        let backend = self.config.render().backend();
        info!(name = diagram.name(), backend:% = backend; "Building diagram structure");
        let graph = structure::DiagramGraph::from_diagram(diagram)?;

        let theme = export::Theme::from_config(&self.config)?;
        let exporter = export::exporter_for(backend, theme)?;
        let bytes = exporter.export(&graph)?;
        debug!(format:% = exporter.format(), bytes = bytes.len(); "Diagram exported");

        Ok(bytes)
    }

    /// Renders `diagram` and writes it to [`Renderer::output_path`].
    ///
    /// An existing file is replaced. On failure no file is created and an
    /// existing one is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`VoldiagError::Configuration`] if the diagram name is not a
    /// plain file name, `VoldiagError` for any rendering failure, or
    /// [`VoldiagError::Io`] when the output cannot be written.
    pub fn render(&self, diagram: &Diagram) -> Result<PathBuf, VoldiagError> {
        naming::check_name(diagram.name())?;
        let bytes = self.render_bytes(diagram)?;
        let path = self.output_path(diagram);
        output::write_atomically(&path, &bytes)?;

        info!(output_file:? = path; "Diagram written");
        Ok(path)
    }
}
