//! Collector for accumulating diagnostics during a layout pass.
//!
//! The [`DiagnosticCollector`] lets every stage report anomalies without
//! aborting. Each emitted diagnostic is also forwarded to the `log` facade.

use log::warn;

use crate::diagnostic::Diagnostic;

/// A collector for accumulating diagnostics during a layout pass.
///
/// # Example
///
/// ```
/// # use archedisk_core::diagnostic::{Component, Diagnostic, DiagnosticCode, DiagnosticCollector};
/// let mut collector = DiagnosticCollector::new();
///
/// collector.emit(
///     Diagnostic::error(Component::Placement, "unparseable start `soon`")
///         .with_code(DiagnosticCode::D100)
///         .with_subject("a1"),
/// );
///
/// assert!(collector.has_errors());
/// let diagnostics = collector.finish();
/// assert_eq!(diagnostics.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        warn!(
            component = diagnostic.component().as_str(),
            subject = diagnostic.subject().unwrap_or("-");
            "{diagnostic}"
        );
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Returns `true` if at least one error diagnostic was emitted.
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Returns the number of diagnostics collected so far.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns `true` if nothing has been collected.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Finish collection and return every diagnostic in emission order.
    pub fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
