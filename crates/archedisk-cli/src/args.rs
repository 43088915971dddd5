//! Command-line argument definitions for the Archedisk CLI.
//!
//! [`Args`] is parsed from the command line using [`clap`]. Arguments select
//! the disc and filter documents, the layout clock, the output format and
//! path, the configuration file, and logging verbosity.

use std::fmt;

use clap::{Parser, ValueEnum};

/// What the CLI writes after a layout pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// A rendered SVG document
    #[default]
    Svg,
    /// The layout result as JSON
    Json,
}

impl OutputFormat {
    /// File extension of this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Command-line arguments for the Archedisk layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the disc document (JSON)
    #[arg(help = "Path to the input disc file")]
    pub input: String,

    /// Output path; defaults to `out.svg` or `out.json` by format
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Path to a filter document (JSON)
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Id of the selected activity
    #[arg(short, long)]
    pub selected: Option<String>,

    /// Timestamp used as "now" for current tick highlighting
    #[arg(long)]
    pub now: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Svg)]
    pub format: OutputFormat,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Resolved output path.
    pub fn output_path(&self) -> String {
        self.output
            .clone()
            .unwrap_or_else(|| format!("out.{}", self.format.extension()))
    }
}
