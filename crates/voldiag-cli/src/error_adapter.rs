//! Error adapter for converting VoldiagError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Each error kind
//! gets a stable code and, where there is an obvious fix, a help line.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use voldiag::VoldiagError;

/// Adapter for rendering a [`VoldiagError`] through miette.
pub struct ErrorAdapter<'a>(pub &'a VoldiagError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            VoldiagError::Io(_) => "voldiag::io",
            VoldiagError::Configuration(_) => "voldiag::configuration",
            VoldiagError::Graph(_) => "voldiag::graph",
            VoldiagError::Layout(_) => "voldiag::layout",
            VoldiagError::Export(_) => "voldiag::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0 {
            VoldiagError::Io(_) => "check that the output directory exists and is writable",
            VoldiagError::Configuration(_) => {
                "pass --name to set the output name, or fix the configuration file"
            }
            VoldiagError::Graph(_) => return None,
            VoldiagError::Layout(_) => "use --backend graphviz to render cyclic diagrams",
            VoldiagError::Export(_) => {
                "install Graphviz and make sure `dot` is on PATH, or use --backend svg"
            }
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}
