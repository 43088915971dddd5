//! Resolution of a [`FilterState`] into ring and activity predicates.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use log::debug;

use archedisk_core::{
    LayoutError,
    diagnostic::{Component, Diagnostic, DiagnosticCode, DiagnosticCollector},
    model::{Activity, Disc, FilterState},
    temporal::parse_timestamp,
};

/// A filter whose dates are parsed and whose search text is case-folded.
///
/// Every axis left empty in the [`FilterState`] matches everything.
#[derive(Debug)]
pub struct ActivityFilter<'a> {
    ring_ids: HashSet<&'a str>,
    label_ids: HashSet<&'a str>,
    text: String,
    date_range: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

impl<'a> ActivityFilter<'a> {
    /// Resolve `filter` against `disc`.
    ///
    /// Ring ids that name no ring of the disc (in the ring filter or the ring
    /// order) are reported. An unparseable date-range bound disables the
    /// date-range axis with a diagnostic.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidRange`] if the date range starts after
    /// it ends.
    pub fn resolve(
        filter: &'a FilterState,
        disc: &Disc,
        diagnostics: &mut DiagnosticCollector,
    ) -> Result<Self, LayoutError> {
        let known: HashSet<&str> = disc.rings.iter().map(|ring| ring.id.as_str()).collect();
        for id in filter.ring_ids.iter().chain(&filter.ring_order) {
            if !known.contains(id.as_str()) {
                diagnostics.emit(
                    Diagnostic::warning(Component::Filter, format!("ring `{id}` is not part of the disc"))
                        .with_code(DiagnosticCode::D301)
                        .with_subject(id.as_str()),
                );
            }
        }

        let date_range = match &filter.date_range {
            None => None,
            Some(range) => match (parse_timestamp(&range.start), parse_timestamp(&range.end)) {
                (Ok(start), Ok(end)) if start > end => {
                    return Err(LayoutError::invalid_range("filter date", &range.start, &range.end));
                }
                (Ok(start), Ok(end)) => Some((start, end)),
                (Err(err), _) | (_, Err(err)) => {
                    diagnostics.emit(
                        Diagnostic::warning(Component::Filter, err.to_string())
                            .with_code(DiagnosticCode::D300)
                            .with_help("the date-range filter is ignored"),
                    );
                    None
                }
            },
        };

        let resolved = Self {
            ring_ids: filter.ring_ids.iter().map(String::as_str).collect(),
            label_ids: filter.label_ids.iter().map(String::as_str).collect(),
            text: filter.text_search.to_lowercase(),
            date_range,
        };
        debug!(
            rings = resolved.ring_ids.len(),
            labels = resolved.label_ids.len(),
            text:? = resolved.text,
            date_range = resolved.date_range.is_some();
            "Filter resolved"
        );
        Ok(resolved)
    }

    /// Returns `true` if the ring with `ring_id` is shown.
    pub fn includes_ring(&self, ring_id: &str) -> bool {
        self.ring_ids.is_empty() || self.ring_ids.contains(ring_id)
    }

    /// Returns `true` if `activity` passes the label, text and date axes.
    ///
    /// Activities whose dates cannot be parsed pass the date axis; placement
    /// drops them with its own diagnostic.
    pub fn matches(&self, activity: &Activity) -> bool {
        self.matches_labels(activity) && self.matches_text(activity) && self.matches_dates(activity)
    }

    fn matches_labels(&self, activity: &Activity) -> bool {
        self.label_ids.is_empty()
            || activity
                .label_ids
                .iter()
                .any(|id| self.label_ids.contains(id.as_str()))
    }

    fn matches_text(&self, activity: &Activity) -> bool {
        self.text.is_empty() || activity.title.to_lowercase().contains(&self.text)
    }

    fn matches_dates(&self, activity: &Activity) -> bool {
        let Some((range_start, range_end)) = self.date_range else {
            return true;
        };
        match (
            parse_timestamp(&activity.start),
            parse_timestamp(activity.end_or_start()),
        ) {
            (Ok(start), Ok(end)) => end >= range_start && start <= range_end,
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use archedisk_core::model::{DateRange, Ring};

    use super::*;

    fn disc() -> Disc {
        Disc::new("2025-01-01", "2025-12-31")
            .with_ring(Ring::new("r1", "Product", "normal"))
            .with_ring(Ring::new("r2", "Marketing", "thin"))
    }

    fn resolve<'a>(filter: &'a FilterState, diagnostics: &mut DiagnosticCollector) -> ActivityFilter<'a> {
        ActivityFilter::resolve(filter, &disc(), diagnostics).unwrap()
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = FilterState::default();
        let mut diagnostics = DiagnosticCollector::new();
        let resolved = resolve(&filter, &mut diagnostics);

        assert!(resolved.includes_ring("r1"));
        assert!(resolved.includes_ring("anything"));
        assert!(resolved.matches(&Activity::new("a", "r1", "Launch", "2025-03-01")));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_ring_filter() {
        let filter = FilterState {
            ring_ids: vec!["r2".to_string()],
            ..FilterState::default()
        };
        let mut diagnostics = DiagnosticCollector::new();
        let resolved = resolve(&filter, &mut diagnostics);

        assert!(!resolved.includes_ring("r1"));
        assert!(resolved.includes_ring("r2"));
    }

    #[test]
    fn test_label_filter_needs_one_match() {
        let filter = FilterState {
            label_ids: vec!["l1".to_string(), "l2".to_string()],
            ..FilterState::default()
        };
        let mut diagnostics = DiagnosticCollector::new();
        let resolved = resolve(&filter, &mut diagnostics);

        let tagged = Activity::new("a", "r1", "Launch", "2025-03-01").with_label("l2");
        let other = Activity::new("b", "r1", "Launch", "2025-03-01").with_label("l9");
        let untagged = Activity::new("c", "r1", "Launch", "2025-03-01");
        assert!(resolved.matches(&tagged));
        assert!(!resolved.matches(&other));
        assert!(!resolved.matches(&untagged));
    }

    #[test]
    fn test_text_filter_ignores_case() {
        let filter = FilterState {
            text_search: "LAUNCH".to_string(),
            ..FilterState::default()
        };
        let mut diagnostics = DiagnosticCollector::new();
        let resolved = resolve(&filter, &mut diagnostics);

        assert!(resolved.matches(&Activity::new("a", "r1", "Product launch", "2025-03-01")));
        assert!(!resolved.matches(&Activity::new("b", "r1", "Retro", "2025-03-01")));
    }

    #[test]
    fn test_date_filter_is_inclusive_overlap() {
        let filter = FilterState {
            date_range: Some(DateRange {
                start: "2025-03-01".to_string(),
                end: "2025-03-31".to_string(),
            }),
            ..FilterState::default()
        };
        let mut diagnostics = DiagnosticCollector::new();
        let resolved = resolve(&filter, &mut diagnostics);

        let touching = Activity::new("a", "r1", "A", "2025-02-20").with_end("2025-03-01");
        let inside = Activity::new("b", "r1", "B", "2025-03-10");
        let after = Activity::new("c", "r1", "C", "2025-04-01").with_end("2025-04-05");
        assert!(resolved.matches(&touching));
        assert!(resolved.matches(&inside));
        assert!(!resolved.matches(&after));
    }

    #[test]
    fn test_inverted_date_filter_is_fatal() {
        let filter = FilterState {
            date_range: Some(DateRange {
                start: "2025-04-01".to_string(),
                end: "2025-03-01".to_string(),
            }),
            ..FilterState::default()
        };
        let mut diagnostics = DiagnosticCollector::new();
        let result = ActivityFilter::resolve(&filter, &disc(), &mut diagnostics);
        assert!(matches!(result, Err(LayoutError::InvalidRange { .. })));
    }

    #[test]
    fn test_unparseable_date_filter_is_ignored() {
        let filter = FilterState {
            date_range: Some(DateRange {
                start: "soon".to_string(),
                end: "2025-03-01".to_string(),
            }),
            ..FilterState::default()
        };
        let mut diagnostics = DiagnosticCollector::new();
        let resolved = resolve(&filter, &mut diagnostics);

        assert!(resolved.matches(&Activity::new("a", "r1", "A", "2025-12-01")));
        let diagnostics = diagnostics.finish();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code(), Some(DiagnosticCode::D300));
    }

    #[test]
    fn test_unknown_filter_rings_are_reported() {
        let filter = FilterState {
            ring_ids: vec!["r1".to_string(), "ghost".to_string()],
            ring_order: vec!["phantom".to_string()],
            ..FilterState::default()
        };
        let mut diagnostics = DiagnosticCollector::new();
        resolve(&filter, &mut diagnostics);

        let subjects: Vec<_> = diagnostics
            .finish()
            .iter()
            .map(|diag| diag.subject().map(str::to_string))
            .collect();
        assert_eq!(
            subjects,
            vec![Some("ghost".to_string()), Some("phantom".to_string())]
        );
    }
}
