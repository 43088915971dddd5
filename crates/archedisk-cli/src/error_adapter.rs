//! Error adapter for converting Archedisk errors and layout diagnostics to
//! miette reports.
//!
//! Fatal [`ArchediskError`]s become a single error report. Diagnostics
//! collected during a successful layout pass each become their own report so
//! the CLI can print them as warnings next to the output it still writes.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, GraphicalReportHandler, LabeledSpan};

use archedisk::{ArchediskError, LayoutError, diagnostic::Diagnostic};

/// Adapter for a single layout diagnostic.
pub struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(diag: &'a Diagnostic) -> Self {
        Self { diag }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.diag.subject() {
            Some(subject) => write!(f, "{} `{subject}`: {}", self.diag.component(), self.diag.message()),
            None => write!(f, "{}: {}", self.diag.component(), self.diag.message()),
        }
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(format!("archedisk::{c}")) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<miette::Severity> {
        // The layout still completed, so even dropped records only warn.
        Some(miette::Severity::Warning)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }
}

/// Adapter for a fatal [`ArchediskError`].
pub struct ErrorAdapter<'a>(pub &'a ArchediskError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            ArchediskError::Io(_) => "archedisk::io",
            ArchediskError::Json { .. } => "archedisk::json",
            ArchediskError::Layout(_) => "archedisk::layout",
            ArchediskError::Export(_) => "archedisk::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            ArchediskError::Json { err, .. } => {
                format!("check the document near line {}, column {}", err.line(), err.column())
            }
            ArchediskError::Layout(LayoutError::InvalidRange { what, .. }) => {
                format!("the {what} start must come before its end")
            }
            ArchediskError::Layout(LayoutError::InvalidDate { .. }) => {
                "dates are ISO-8601, e.g. `2025-03-01` or `2025-03-01T12:00:00Z`".to_string()
            }
            ArchediskError::Io(_) | ArchediskError::Export(_) => return None,
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable error or warning that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A non-fatal layout diagnostic.
    Diagnostic(DiagnosticAdapter<'a>),
    /// A fatal error.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<miette::Severity> {
        match self {
            Reportable::Diagnostic(d) => d.severity(),
            Reportable::Error(e) => e.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }
}

/// Convert a fatal [`ArchediskError`] into reportable errors.
pub fn to_reportables(err: &ArchediskError) -> Vec<Reportable<'_>> {
    vec![Reportable::Error(ErrorAdapter(err))]
}

/// Convert layout diagnostics into reportable warnings, in emission order.
pub fn diagnostics_to_reportables(diagnostics: &[Diagnostic]) -> Vec<Reportable<'_>> {
    diagnostics
        .iter()
        .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d)))
        .collect()
}

/// Render a reportable with miette's graphical handler.
///
/// Falls back to the plain message if rendering fails.
pub fn render_report(reportable: &Reportable<'_>) -> String {
    let mut writer = String::new();
    match GraphicalReportHandler::new().render_report(&mut writer, reportable) {
        Ok(()) => writer,
        Err(_) => reportable.to_string(),
    }
}
