//! Activity placement within a ring.
//!
//! Each activity is mapped to an angular range (its end clamped to the disc
//! end, widened to a minimum arc) and then given a slice of its ring's band.
//! The start is never clamped, so an activity that began before the disc
//! extrapolates to an angle before the top. The slice depends on the
//! activity's direct overlap group: the activity plus every visible activity
//! in the same ring whose clamped interval intersects its own. Groups are not
//! merged transitively, so two activities that only share a neighbour are
//! each sized against their own group. Activities wholly outside the disc
//! join no group and keep the full band.

use chrono::{DateTime, Utc};
use log::trace;

use archedisk_core::{
    diagnostic::{Component, Diagnostic, DiagnosticCode, DiagnosticCollector},
    geometry::ArcSegment,
    model::{Activity, Ring},
    temporal::{TimeSpan, duration_days_ceil, parse_timestamp},
};

use super::rings::RingBand;

/// A time interval with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Interval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Inclusive intersection test; intervals sharing an endpoint overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// An activity's slot within its direct overlap group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapSlot {
    position: usize,
    group_size: usize,
}

impl OverlapSlot {
    /// The slot of an activity alone in its group.
    pub const WHOLE_BAND: OverlapSlot = OverlapSlot {
        position: 0,
        group_size: 1,
    };

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn group_size(&self) -> usize {
        self.group_size
    }

    /// The sub-band of `band` for this slot. Position 0 is innermost.
    pub fn sub_band(&self, band: RingBand) -> RingBand {
        let height = band.thickness() / self.group_size as f64;
        let inner = band.inner_radius() + self.position as f64 * height;
        RingBand::new(inner, inner + height)
    }
}

/// Compute the overlap slot of every interval.
///
/// `items` pairs each interval with the id used to order its group. Ties on
/// id fall back to input order, so the result depends only on the input.
///
/// This is a pairwise scan, quadratic in the number of items.
pub fn overlap_slots(items: &[(&str, Interval)]) -> Vec<OverlapSlot> {
    items
        .iter()
        .enumerate()
        .map(|(index, (_, interval))| {
            let mut group: Vec<usize> = items
                .iter()
                .enumerate()
                .filter(|(other, (_, candidate))| *other == index || interval.overlaps(candidate))
                .map(|(other, _)| other)
                .collect();
            group.sort_by(|a, b| items[*a].0.cmp(items[*b].0).then(a.cmp(b)));

            let position = group
                .iter()
                .position(|member| *member == index)
                .unwrap_or_default();
            OverlapSlot {
                position,
                group_size: group.len(),
            }
        })
        .collect()
}

/// A placed activity before selection and label fitting.
#[derive(Debug, Clone)]
pub struct PlacedActivity<'a> {
    pub activity: &'a Activity,
    pub arc: ArcSegment,
    /// `false` when the activity lies wholly outside the disc.
    pub visible: bool,
    /// Whole days from start to (unclamped) end, rounded up.
    pub duration_days: i64,
}

/// Intermediate state of an activity whose dates resolved.
struct Resolved<'a> {
    activity: &'a Activity,
    interval: Interval,
    start_angle: f64,
    end_angle: f64,
    visible: bool,
    duration_days: i64,
}

/// Maps activities to arcs within a disc.
pub struct PlacementResolver<'a> {
    span: &'a TimeSpan,
    min_arc: f64,
}

impl<'a> PlacementResolver<'a> {
    pub fn new(span: &'a TimeSpan, min_arc: f64) -> Self {
        Self { span, min_arc }
    }

    /// Place `activities` of `ring` inside `band`.
    ///
    /// Activities with unparseable dates are dropped and reported. The
    /// output keeps the input order of the remaining activities.
    pub fn place<'d>(
        &self,
        ring: &Ring,
        activities: &[&'d Activity],
        band: RingBand,
        diagnostics: &mut DiagnosticCollector,
    ) -> Vec<PlacedActivity<'d>> {
        let resolved: Vec<Resolved<'d>> = activities
            .iter()
            .filter_map(|&activity| self.resolve(ring, activity, diagnostics))
            .collect();

        let keyed: Vec<(&str, Interval)> = resolved
            .iter()
            .filter(|item| item.visible)
            .map(|item| (item.activity.id.as_str(), item.interval))
            .collect();
        let mut slots = overlap_slots(&keyed).into_iter();

        resolved
            .iter()
            .map(|item| {
                let slot = if item.visible {
                    slots.next().unwrap_or(OverlapSlot::WHOLE_BAND)
                } else {
                    OverlapSlot::WHOLE_BAND
                };
                let sub_band = slot.sub_band(band);
                trace!(
                    activity = item.activity.id,
                    start_angle = item.start_angle,
                    end_angle = item.end_angle,
                    position = slot.position(),
                    group_size = slot.group_size();
                    "Activity placed"
                );
                PlacedActivity {
                    activity: item.activity,
                    arc: ArcSegment::new(
                        item.start_angle,
                        item.end_angle,
                        sub_band.inner_radius(),
                        sub_band.outer_radius(),
                    ),
                    visible: item.visible,
                    duration_days: item.duration_days,
                }
            })
            .collect()
    }

    fn resolve<'d>(
        &self,
        ring: &Ring,
        activity: &'d Activity,
        diagnostics: &mut DiagnosticCollector,
    ) -> Option<Resolved<'d>> {
        if activity.ring_id != ring.id {
            diagnostics.emit(
                Diagnostic::warning(
                    Component::Placement,
                    format!(
                        "activity references ring `{}` but is held by ring `{}`",
                        activity.ring_id, ring.id
                    ),
                )
                .with_code(DiagnosticCode::D202)
                .with_subject(activity.id.as_str())
                .with_help("placed in the ring that holds it"),
            );
        }

        let parsed = parse_timestamp(&activity.start)
            .and_then(|start| Ok((start, parse_timestamp(activity.end_or_start())?)));
        let (start, mut end) = match parsed {
            Ok(dates) => dates,
            Err(err) => {
                diagnostics.emit(
                    Diagnostic::error(Component::Placement, err.to_string())
                        .with_code(DiagnosticCode::D100)
                        .with_subject(activity.id.as_str())
                        .with_help("the activity is not placed"),
                );
                return None;
            }
        };

        if end < start {
            diagnostics.emit(
                Diagnostic::warning(Component::Placement, "activity ends before it starts")
                    .with_code(DiagnosticCode::D101)
                    .with_subject(activity.id.as_str())
                    .with_help("its end is treated as its start"),
            );
            end = start;
        }

        let visible = end >= self.span.start() && start <= self.span.end();
        if !visible {
            diagnostics.emit(
                Diagnostic::warning(Component::Placement, "activity lies outside the disc")
                    .with_code(DiagnosticCode::D102)
                    .with_subject(activity.id.as_str()),
            );
        }

        let clamped_end = end.min(self.span.end());
        let start_angle = self.span.date_to_angle(start);
        let end_angle = self
            .span
            .date_to_angle(clamped_end)
            .max(start_angle + self.min_arc);

        Some(Resolved {
            activity,
            interval: Interval::new(start, clamped_end),
            start_angle,
            end_angle,
            visible,
            duration_days: duration_days_ceil(start, end),
        })
    }
}


#[cfg(test)]
mod proptest_tests {
    use chrono::TimeDelta;
    use proptest::prelude::*;

    use super::*;

    proptest! {
        /// Activities that all share a day split the band into contiguous,
        /// disjoint slices that add up to the whole band.
        #[test]
        fn shared_day_partitions_band(
            lengths in prop::collection::vec((0i64..30, 0i64..30), 1..8),
            inner in 0.0f64..200.0,
            thickness in 1.0f64..120.0,
        ) {
            let pivot = parse_timestamp("2025-06-15").unwrap();
            let ids: Vec<String> = (0..lengths.len()).map(|i| format!("act-{i:02}")).collect();
            let items: Vec<(&str, Interval)> = lengths
                .iter()
                .zip(&ids)
                .map(|((before, after), id)| {
                    let interval = Interval::new(
                        pivot - TimeDelta::days(*before),
                        pivot + TimeDelta::days(*after),
                    );
                    (id.as_str(), interval)
                })
                .collect();

            let band = RingBand::new(inner, inner + thickness);
            let mut bands: Vec<RingBand> = overlap_slots(&items)
                .iter()
                .map(|slot| {
                    prop_assert_eq!(slot.group_size(), items.len());
                    Ok(slot.sub_band(band))
                })
                .collect::<Result<_, TestCaseError>>()?;
            bands.sort_by(|a, b| a.inner_radius().total_cmp(&b.inner_radius()));

            prop_assert!((bands[0].inner_radius() - band.inner_radius()).abs() < 1e-9);
            prop_assert!((bands[bands.len() - 1].outer_radius() - band.outer_radius()).abs() < 1e-9);
            for pair in bands.windows(2) {
                prop_assert!((pair[0].outer_radius() - pair[1].inner_radius()).abs() < 1e-9);
            }
            let total: f64 = bands.iter().map(RingBand::thickness).sum();
            prop_assert!((total - thickness).abs() < 1e-9);
        }
    }
}
