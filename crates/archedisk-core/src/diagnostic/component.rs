//! The engine components that report diagnostics.

use std::fmt;

use serde::Serialize;

/// Which stage of the layout pipeline reported a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Component {
    /// Date parsing and date ⇄ angle conversion.
    Temporal,
    /// Ring type normalization and radial band allocation.
    Rings,
    /// Outer and per-ring tick generation.
    Ticks,
    /// Filter evaluation.
    Filter,
    /// Activity angle resolution and overlap banding.
    Placement,
    /// Title fitting.
    Labels,
}

impl Component {
    /// Returns the lowercase name used in log records and rendered diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            Component::Temporal => "temporal",
            Component::Rings => "rings",
            Component::Ticks => "ticks",
            Component::Filter => "filter",
            Component::Placement => "placement",
            Component::Labels => "labels",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
