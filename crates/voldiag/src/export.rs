//! Export backends for voldiag diagrams.
//!
//! This module provides the [`Exporter`] trait that turns a validated
//! diagram graph into the bytes of an output file. It is the final stage of
//! the pipeline before the file is written.
//!
//! # Pipeline Position
//!
//! ```text
//! Diagram (nodes + edges + name)
//!     ↓ structure
//! DiagramGraph
//!     ↓ export (this module)
//! Output bytes (PNG / DOT / SVG)
//!     ↓ atomic write
//! <name>.<ext>
//! ```
//!
//! # Available Backends
//!
//! - `svg` - native layered layout drawn with the `svg` crate
//! - `dot` - DOT source built with `dot-structures` (`graphviz` feature)
//! - `graphviz` - PNG produced by the Graphviz `dot` engine (`graphviz` feature)

mod svg;

#[cfg(feature = "graphviz")]
mod dot;
#[cfg(feature = "graphviz")]
mod graphviz;

use std::{fmt, io};

use voldiag_core::color::Color;

use crate::{
    VoldiagError,
    config::{AppConfig, BackendKind, Direction},
    structure::DiagramGraph,
};

/// Edge color used when the configuration sets none.
pub const DEFAULT_EDGE_COLOR: &str = "#7B8894";

/// Font family used when the configuration sets none.
pub const DEFAULT_FONT_FAMILY: &str = "Sans-Serif";

/// File format written by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Dot,
    Svg,
}

impl OutputFormat {
    /// File extension, without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Dot => "dot",
            OutputFormat::Svg => "svg",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Errors that can occur inside an export backend.
///
/// Converted into [`VoldiagError::Export`] at the crate boundary.
#[derive(Debug)]
pub enum Error {
    /// The backend produced unusable output, described by `message`.
    Render(String),
    /// The external layout engine could not be run or failed.
    Backend {
        backend: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Backend { backend, .. } => write!(f, "{backend} backend failed"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Backend { source, .. } => Some(source),
        }
    }
}

/// Resolved visual settings shared by all backends.
#[derive(Debug, Clone)]
pub(crate) struct Theme {
    direction: Direction,
    background: Option<Color>,
    edge_color: Color,
    font_family: String,
}

impl Theme {
    /// Resolves the style and render sections of `config`.
    ///
    /// # Errors
    ///
    /// Returns [`VoldiagError::Configuration`] for invalid color strings.
    pub(crate) fn from_config(config: &AppConfig) -> Result<Self, VoldiagError> {
        let style = config.style();
        let background = style
            .background_color()
            .map_err(VoldiagError::Configuration)?;
        let edge_color = match style.edge_color().map_err(VoldiagError::Configuration)? {
            Some(color) => color,
            None => Color::new(DEFAULT_EDGE_COLOR).map_err(VoldiagError::Configuration)?,
        };

        Ok(Self {
            direction: config.render().direction(),
            background,
            edge_color,
            font_family: style
                .font_family()
                .unwrap_or(DEFAULT_FONT_FAMILY)
                .to_string(),
        })
    }

    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    pub(crate) fn background(&self) -> Option<Color> {
        self.background
    }

    pub(crate) fn edge_color(&self) -> Color {
        self.edge_color
    }

    pub(crate) fn font_family(&self) -> &str {
        &self.font_family
    }
}

/// Abstraction for diagram export backends.
pub(crate) trait Exporter {
    /// Format of the bytes returned by [`Exporter::export`].
    fn format(&self) -> OutputFormat;

    /// Exports `graph` into the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`VoldiagError::Layout`] when the graph cannot be placed and
    /// [`VoldiagError::Export`] when the backend fails.
    fn export(&self, graph: &DiagramGraph<'_>) -> Result<Vec<u8>, VoldiagError>;
}

/// Creates the exporter for `backend`.
///
/// # Errors
///
/// Returns [`VoldiagError::Configuration`] when the backend was compiled out.
pub(crate) fn exporter_for(
    backend: BackendKind,
    theme: Theme,
) -> Result<Box<dyn Exporter>, VoldiagError> {
    match backend {
        BackendKind::Svg => Ok(Box::new(self::svg::SvgExporter::new(theme))),
        #[cfg(feature = "graphviz")]
        BackendKind::Dot => Ok(Box::new(dot::DotExporter::new(theme))),
        #[cfg(feature = "graphviz")]
        BackendKind::Graphviz => Ok(Box::new(graphviz::GraphvizExporter::new(theme))),
        #[cfg(not(feature = "graphviz"))]
        BackendKind::Dot | BackendKind::Graphviz => Err(VoldiagError::Configuration(format!(
            "the `{backend}` backend requires building with the `graphviz` feature"
        ))),
    }
}
