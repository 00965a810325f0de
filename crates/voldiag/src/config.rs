//! Configuration types for voldiag rendering.
//!
//! All types implement [`serde::Deserialize`] so the CLI can load them from
//! TOML. Every section is optional; missing values fall back to defaults that
//! reproduce the canonical storage diagram as a Graphviz PNG (or SVG when the
//! crate is built without the `graphviz` feature).
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`RenderConfig`] - Backend, layout direction and output directory.
//! - [`StyleConfig`] - Colors and font overrides.
//! - [`Topology`] - Profiles and storage instances to draw.
//!
//! # Example
//!
//! ```
//! # use voldiag::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.style().background_color().is_ok());
//! ```

use std::{fmt, path::PathBuf};

use serde::Deserialize;

use voldiag_core::color::Color;

use crate::{export::OutputFormat, topology::Topology};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Render configuration section.
    #[serde(default)]
    render: RenderConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Topology configuration section.
    #[serde(default)]
    topology: Topology,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(render: RenderConfig, style: StyleConfig, topology: Topology) -> Self {
        Self {
            render,
            style,
            topology,
        }
    }

    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Returns the render section for in-place overrides.
    pub fn render_mut(&mut self) -> &mut RenderConfig {
        &mut self.render
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }
}

/// Rendering backend that produces the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Graphviz `dot` layout engine, PNG output.
    Graphviz,
    /// DOT source text, no layout engine involved.
    Dot,
    /// Native layered layout, SVG output.
    Svg,
}

impl BackendKind {
    /// Returns the format of the files this backend writes.
    pub fn format(self) -> OutputFormat {
        match self {
            BackendKind::Graphviz => OutputFormat::Png,
            BackendKind::Dot => OutputFormat::Dot,
            BackendKind::Svg => OutputFormat::Svg,
        }
    }
}

impl Default for BackendKind {
    #[cfg(feature = "graphviz")]
    fn default() -> Self {
        BackendKind::Graphviz
    }

    #[cfg(not(feature = "graphviz"))]
    fn default() -> Self {
        BackendKind::Svg
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Graphviz => write!(f, "graphviz"),
            BackendKind::Dot => write!(f, "dot"),
            BackendKind::Svg => write!(f, "svg"),
        }
    }
}

impl std::str::FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "graphviz" | "png" => Ok(BackendKind::Graphviz),
            "dot" => Ok(BackendKind::Dot),
            "svg" => Ok(BackendKind::Svg),
            other => Err(format!(
                "unknown backend `{other}` (expected graphviz, dot or svg)"
            )),
        }
    }
}

/// Flow direction of the diagram.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum Direction {
    /// Left to right.
    #[default]
    #[serde(rename = "LR")]
    LeftRight,
    /// Top to bottom.
    #[serde(rename = "TB")]
    TopBottom,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::LeftRight => write!(f, "LR"),
            Direction::TopBottom => write!(f, "TB"),
        }
    }
}

/// Backend, direction and output location.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RenderConfig {
    #[serde(default)]
    backend: BackendKind,

    #[serde(default)]
    direction: Direction,

    /// Directory the output file is written to; the working directory when unset.
    #[serde(default)]
    output_dir: Option<PathBuf>,
}

impl RenderConfig {
    pub fn new(backend: BackendKind, direction: Direction, output_dir: Option<PathBuf>) -> Self {
        Self {
            backend,
            direction,
            output_dir,
        }
    }

    pub fn backend(&self) -> BackendKind {
        self.backend
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the output directory, defaulting to `.`.
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn set_backend(&mut self, backend: BackendKind) {
        self.backend = backend;
    }

    pub fn set_output_dir(&mut self, output_dir: impl Into<PathBuf>) {
        self.output_dir = Some(output_dir.into());
    }
}

/// Visual styling overrides.
///
/// Colors are kept as strings until rendering so that a bad value in a
/// config file is reported as a configuration error, not a parse failure.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    background_color: Option<String>,

    #[serde(default)]
    edge_color: Option<String>,

    #[serde(default)]
    font_family: Option<String>,
}

impl StyleConfig {
    pub fn new(
        background_color: Option<String>,
        edge_color: Option<String>,
        font_family: Option<String>,
    ) -> Self {
        Self {
            background_color,
            edge_color,
            font_family,
        }
    }

    /// Returns the parsed background [`Color`], or `None` if none is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a valid color.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        parse_color(self.background_color.as_deref(), "background")
    }

    /// Returns the parsed edge [`Color`], or `None` if none is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a valid color.
    pub fn edge_color(&self) -> Result<Option<Color>, String> {
        parse_color(self.edge_color.as_deref(), "edge")
    }

    pub fn font_family(&self) -> Option<&str> {
        self.font_family.as_deref()
    }
}

fn parse_color(value: Option<&str>, what: &str) -> Result<Option<Color>, String> {
    value
        .map(Color::new)
        .transpose()
        .map_err(|err| format!("Invalid {what} color in config: {err}"))
}
