//! CLI logic for the voldiag diagram tool.
//!
//! Loads the configuration, applies command-line overrides, expands the
//! configured topology into a diagram and renders it to a single file.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::path::PathBuf;

use log::info;

use voldiag::{Renderer, VoldiagError, naming};

/// Run the voldiag CLI application
///
/// Returns the path of the written diagram.
///
/// # Errors
///
/// Returns `VoldiagError` for:
/// - Configuration loading errors
/// - An output name that cannot be determined
/// - Graph, layout or backend errors
/// - Output write errors
pub fn run(args: &Args) -> Result<PathBuf, VoldiagError> {
    let mut app_config = config::load_config(args.config.as_ref())?;

    if let Some(backend) = args.backend {
        app_config.render_mut().set_backend(backend);
    }
    if let Some(output_dir) = &args.output_dir {
        app_config.render_mut().set_output_dir(output_dir);
    }

    let name = match &args.name {
        Some(name) => name.clone(),
        None => naming::name_from_self()?,
    };
    info!(
        name,
        backend:% = app_config.render().backend(),
        output_dir:? = app_config.render().output_dir();
        "Rendering diagram"
    );

    let diagram = app_config.topology().to_diagram(&name)?;
    let path = Renderer::new(app_config).render(&diagram)?;

    info!(output_file:? = path; "Diagram exported successfully");
    Ok(path)
}
