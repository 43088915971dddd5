pub mod svg;

use std::{io, string::FromUtf8Error};

use thiserror::Error;

use crate::layout::LayoutResult;

/// Turns a finished layout into an output document.
pub trait Exporter {
    fn export_layout(&self, layout: &LayoutResult, writer: &mut dyn io::Write) -> Result<(), Error>;
}

/// Errors raised while preparing or writing an exported document.
#[derive(Debug, Error)]
pub enum Error {
    /// A style color that could not be parsed.
    #[error("Invalid style: {0}")]
    Style(String),

    #[error("Canvas radius must be positive, got {0}")]
    Canvas(f64),

    #[error("Output is not UTF-8: {0}")]
    Encoding(#[from] FromUtf8Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
