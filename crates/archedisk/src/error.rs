//! Error types for Archedisk operations.
//!
//! This module provides the main error type [`ArchediskError`] which wraps
//! the conditions that can stop a parse, layout or render call.

use std::io;

use thiserror::Error;

use archedisk_core::LayoutError;

/// The main error type for Archedisk operations.
#[derive(Debug, Error)]
pub enum ArchediskError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A disc or filter document that is not valid JSON for its type.
    #[error("Invalid {what} document: {err}")]
    Json {
        what: &'static str,
        #[source]
        err: serde_json::Error,
    },

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for ArchediskError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl ArchediskError {
    /// Create a new `Json` error for the named document kind.
    pub fn new_json_error(what: &'static str, err: serde_json::Error) -> Self {
        Self::Json { what, err }
    }
}
