//! Severity levels for diagnostics.

use std::fmt;

use serde::Serialize;

/// The severity level of a diagnostic.
///
/// - [`Severity::Error`] marks a record that was dropped from the layout
/// - [`Severity::Warning`] marks a record that was normalized and laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The record could not be laid out and was excluded.
    Error,

    /// The record was laid out after falling back to a safe default.
    Warning,
}

impl Severity {
    /// Returns `true` if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns `true` if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}
