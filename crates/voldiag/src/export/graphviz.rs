//! PNG backend driven by the Graphviz `dot` engine.

use graphviz_rust::{
    cmd::{CommandArg, Format},
    exec,
    printer::PrinterContext,
};
use log::{debug, info};

use super::{Error, Exporter, OutputFormat, Theme, dot::build_graph};
use crate::{VoldiagError, structure::DiagramGraph};

const PNG_SIGNATURE: &[u8] = b"\x89PNG";

pub(crate) struct GraphvizExporter {
    theme: Theme,
}

impl GraphvizExporter {
    pub(crate) fn new(theme: Theme) -> Self {
        Self { theme }
    }
}

impl Exporter for GraphvizExporter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Png
    }

    fn export(&self, graph: &DiagramGraph<'_>) -> Result<Vec<u8>, VoldiagError> {
        let dot_graph = build_graph(graph, &self.theme);
        info!(name = graph.name(); "Running Graphviz");

        let args: Vec<CommandArg> = vec![Format::Png.into()];
        let bytes = exec(dot_graph, &mut PrinterContext::default(), args).map_err(|source| {
            Error::Backend {
                backend: "graphviz",
                source,
            }
        })?;

        if !bytes.starts_with(PNG_SIGNATURE) {
            return Err(Error::Render(format!(
                "Graphviz returned {} bytes that are not a PNG image",
                bytes.len()
            ))
            .into());
        }
        debug!(bytes = bytes.len(); "PNG rendered");

        Ok(bytes)
    }
}
