//! Command-line argument definitions for the voldiag CLI.
//!
//! Every argument is optional: running `voldiag` alone renders the configured
//! topology (by default the canonical storage chain) into a file named after
//! the executable, in the current directory.

use clap::Parser;

use voldiag::config::BackendKind;

/// Command-line arguments for the voldiag diagram tool
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Output file name without extension (defaults to the executable name)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Directory the diagram is written to
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Rendering backend (graphviz, dot, svg)
    #[arg(short, long)]
    pub backend: Option<BackendKind>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
