//! CLI logic for the Archedisk layout tool.
//!
//! Reads a disc document, runs one layout pass and writes either the rendered
//! SVG or the layout result as JSON.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, OutputFormat};

use std::fs;

use chrono::Utc;
use log::{info, warn};

use archedisk::{ArchediskError, DiscBuilder, model::FilterState, temporal};

use error_adapter::{diagnostics_to_reportables, render_report};

/// Run the Archedisk CLI application
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `ArchediskError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed disc or filter documents
/// - Fatal layout errors (inverted disc or filter ranges, a bad `--now`)
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), ArchediskError> {
    let output_path = args.output_path();
    info!(
        input_path = args.input,
        output_path,
        format:% = args.format;
        "Processing disc"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let builder = DiscBuilder::new(app_config);

    let source = fs::read_to_string(&args.input)?;
    let disc = builder.parse_disc(&source)?;

    let filter = match &args.filter {
        Some(path) => builder.parse_filter(&fs::read_to_string(path)?)?,
        None => FilterState::default(),
    };

    let now = match &args.now {
        Some(value) => temporal::parse_timestamp(value)?,
        None => Utc::now(),
    };

    let layout = builder.layout(&disc, &filter, args.selected.as_deref(), now)?;

    for reportable in diagnostics_to_reportables(layout.diagnostics()) {
        warn!("{}", render_report(&reportable));
    }

    let output = match args.format {
        OutputFormat::Svg => builder.render_svg(&layout, &disc)?,
        OutputFormat::Json => builder.to_json(&layout)?,
    };
    fs::write(&output_path, output)?;

    info!(output_file = output_path; "Output written successfully");

    Ok(())
}
