//! Structured diagnostics for the layout engine.
//!
//! A layout pass never aborts because of a single bad record. Instead, each
//! anomaly is reported as a [`Diagnostic`]: a severity, a [`DiagnosticCode`],
//! the engine [`Component`] that noticed it, the offending id (if any), a
//! message and optional help. Diagnostics are accumulated by a
//! [`DiagnosticCollector`] and returned alongside the layout so that callers
//! can log or surface them.
//!
//! # Example
//!
//! ```
//! # use archedisk_core::diagnostic::{Component, Diagnostic, DiagnosticCode};
//! let diag = Diagnostic::warning(Component::Rings, "ring type `wide` is not recognized")
//!     .with_code(DiagnosticCode::D200)
//!     .with_subject("ring-3")
//!     .with_help("use `normal` or `thin`");
//!
//! assert_eq!(diag.to_string(), "warning[D200] rings(ring-3): ring type `wide` is not recognized");
//! ```

mod code;
mod collector;
mod component;
mod severity;

pub use code::DiagnosticCode;
pub use collector::DiagnosticCollector;
pub use component::Component;
pub use severity::Severity;

use std::fmt;

use serde::Serialize;

/// A single non-fatal anomaly noticed during layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    severity: Severity,
    code: Option<DiagnosticCode>,
    component: Component,
    subject: Option<String>,
    message: String,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// Errors mark records that were dropped from the layout.
    pub fn error(component: Component, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, component, message)
    }

    /// Create a warning diagnostic.
    ///
    /// Warnings mark records that were laid out after being normalized.
    pub fn warning(component: Component, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, component, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the diagnostic code, if any.
    pub fn code(&self) -> Option<DiagnosticCode> {
        self.code
    }

    /// Get the component that reported this diagnostic.
    pub fn component(&self) -> Component {
        self.component
    }

    /// Get the id of the offending ring, activity or filter entry, if any.
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the diagnostic code.
    pub fn with_code(mut self, code: DiagnosticCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Set the offending id.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, component: Component, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            component,
            subject: None,
            message: message.into(),
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "warning[D200] rings(ring-3): message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{code}]")?;
        }
        write!(f, " {}", self.component)?;
        if let Some(subject) = &self.subject {
            write!(f, "({subject})")?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_new() {
        let diag = Diagnostic::error(Component::Placement, "bad start date");

        assert!(diag.severity().is_error());
        assert_eq!(diag.component(), Component::Placement);
        assert_eq!(diag.message(), "bad start date");
        assert!(diag.code().is_none());
        assert!(diag.subject().is_none());
        assert!(diag.help().is_none());
    }

    #[test]
    fn test_diagnostic_builder_chain() {
        let diag = Diagnostic::warning(Component::Rings, "ring not indexed")
            .with_code(DiagnosticCode::D201)
            .with_subject("r1")
            .with_help("ring ids must be unique");

        assert!(diag.severity().is_warning());
        assert_eq!(diag.code(), Some(DiagnosticCode::D201));
        assert_eq!(diag.subject(), Some("r1"));
        assert_eq!(diag.help(), Some("ring ids must be unique"));
    }

    #[test]
    fn test_diagnostic_display_without_code_or_subject() {
        let diag = Diagnostic::warning(Component::Filter, "date range ignored");

        assert_eq!(diag.to_string(), "warning filter: date range ignored");
    }

    #[test]
    fn test_diagnostic_display_with_code_and_subject() {
        let diag = Diagnostic::error(Component::Placement, "unparseable start `soon`")
            .with_code(DiagnosticCode::D100)
            .with_subject("a7");

        assert_eq!(
            diag.to_string(),
            "error[D100] placement(a7): unparseable start `soon`"
        );
    }
}
