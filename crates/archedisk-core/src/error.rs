//! Fatal layout conditions.
//!
//! Only disc-wide violations are fatal: a disc whose bounds cannot be parsed
//! or are inverted, or a filter date range that is inverted. Everything
//! scoped to a single ring, activity or tick is recovered locally and
//! reported as a [`crate::diagnostic::Diagnostic`] instead.

use thiserror::Error;

/// Error returned when a layout pass (or a temporal conversion) cannot
/// produce a result at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// A range whose start is not strictly before its end.
    #[error("invalid range: {what} start `{start}` is not before end `{end}`")]
    InvalidRange {
        what: &'static str,
        start: String,
        end: String,
    },

    /// A date string that could not be parsed.
    #[error("invalid date `{value}`: {reason}")]
    InvalidDate { value: String, reason: String },
}

impl LayoutError {
    /// Create an `InvalidRange` error for a named range.
    pub fn invalid_range(
        what: &'static str,
        start: impl ToString,
        end: impl ToString,
    ) -> Self {
        Self::InvalidRange {
            what,
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    /// Create an `InvalidDate` error for an unparseable value.
    pub fn invalid_date(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDate {
            value: value.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_range_display() {
        let err = LayoutError::invalid_range("disc", "2025-12-31", "2025-01-01");
        assert_eq!(
            err.to_string(),
            "invalid range: disc start `2025-12-31` is not before end `2025-01-01`"
        );
    }

    #[test]
    fn test_invalid_date_display() {
        let err = LayoutError::invalid_date("tomorrow", "unrecognized format");
        assert_eq!(err.to_string(), "invalid date `tomorrow`: unrecognized format");
    }
}
