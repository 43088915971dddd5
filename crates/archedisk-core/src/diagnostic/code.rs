//! Diagnostic codes for the layout engine.
//!
//! Codes are organized by the kind of anomaly:
//! - `D1xx` - Invalid dates on individual records
//! - `D2xx` - Structural inconsistencies in the disc document
//! - `D3xx` - Filter anomalies

use std::fmt;

use serde::Serialize;

/// Codes for categorizing layout diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticCode {
    // =========================================================================
    // Invalid dates (D1xx)
    // =========================================================================
    /// Unparseable date.
    ///
    /// An activity start/end or a tick date could not be parsed. The record
    /// is dropped.
    D100,

    /// Inverted interval.
    ///
    /// An activity ends before it starts. Its end is treated as its start.
    D101,

    /// Outside the disc.
    ///
    /// An activity lies entirely before or after the disc span. It is placed
    /// at the nearest bound and marked as not visible.
    D102,

    // =========================================================================
    // Structural inconsistencies (D2xx)
    // =========================================================================
    /// Unknown ring type.
    ///
    /// A ring's `type` is neither `normal` nor `thin`. It is laid out as
    /// `normal`.
    D200,

    /// Ring band lookup failed.
    ///
    /// A displayed ring could not be found in the allocation index. It falls
    /// back to the default band for its type.
    D201,

    /// Dangling ring reference.
    ///
    /// An activity's `ringId` does not match the ring that holds it. It is
    /// placed in the holding ring.
    D202,

    /// Thin ring overflow.
    ///
    /// The thin rings do not fit at their configured height. With normal
    /// rings present they may take at most half of the radius left after
    /// padding. Their height is reduced so all of them fit.
    D203,

    /// Ring padding overflow.
    ///
    /// The gaps between rings would take more than half the radius. The
    /// padding is reduced so every ring keeps a band.
    D204,

    // =========================================================================
    // Filter anomalies (D3xx)
    // =========================================================================
    /// Unparseable filter date.
    ///
    /// A filter date-range bound could not be parsed. The date-range filter
    /// is ignored.
    D300,

    /// Unknown filter ring.
    ///
    /// A ring id listed in the filter or the ring order does not exist in the
    /// disc.
    D301,
}

impl DiagnosticCode {
    /// Returns a short description of this code.
    pub fn description(&self) -> &'static str {
        match self {
            DiagnosticCode::D100 => "unparseable date",
            DiagnosticCode::D101 => "inverted interval",
            DiagnosticCode::D102 => "outside the disc",
            DiagnosticCode::D200 => "unknown ring type",
            DiagnosticCode::D201 => "ring band lookup failed",
            DiagnosticCode::D202 => "dangling ring reference",
            DiagnosticCode::D203 => "thin ring overflow",
            DiagnosticCode::D204 => "ring padding overflow",
            DiagnosticCode::D300 => "unparseable filter date",
            DiagnosticCode::D301 => "unknown filter ring",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}
