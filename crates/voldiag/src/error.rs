//! Error types for voldiag operations.
//!
//! [`VoldiagError`] wraps every failure that can stop a render. None of them
//! is recovered locally; the CLI maps all of them to a non-zero exit code.

use std::io;

use thiserror::Error;

use voldiag_core::semantic::GraphError;

use crate::export;

/// The main error type for voldiag operations.
///
/// `Configuration` covers everything that prevents the tool from knowing what
/// to render or where (unresolvable output name, bad config values). The
/// remaining variants are render failures: an invalid graph, a layout the
/// native backend cannot place, a failing backend, or an output location that
/// cannot be written.
#[derive(Debug, Error)]
pub enum VoldiagError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error(transparent)]
    Export(#[from] export::Error),
}

impl VoldiagError {
    /// Returns `true` for errors raised before any rendering started.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}
