//! CLI logic for the Tether layout tool.
//!
//! Reads a graph file, lays it out with the configured engine, and writes the
//! positioned graph back out in the same format.

pub mod error_adapter;
pub mod graph_file;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{info, warn};

use tether::{LayoutBuilder, TetherError};

/// Run the Tether CLI application
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `TetherError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed graph files
/// - Graphs with dangling edges or duplicate node ids
pub fn run(args: &Args) -> Result<(), TetherError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing graph"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(engine) = args.engine {
        app_config = app_config.with_engine(engine);
    }

    let source = fs::read_to_string(&args.input)?;
    let graph = graph_file::parse(&source)?;

    let outcome = LayoutBuilder::new(app_config).layout(&graph)?;
    if outcome.is_cluttered() {
        warn!(applied:? = outcome.applied(); "Some nodes ended up very close together");
    }

    fs::write(&args.output, graph_file::render(outcome.graph())?)?;

    info!(output_file = args.output; "Graph written successfully");

    Ok(())
}
