//! The radial layout pass.
//!
//! [`layout_disc`] turns a [`Disc`], a [`FilterState`], the selected activity
//! and a reference instant into a [`LayoutResult`]: ring bands, placed
//! activity arcs with label directives, ring sub-ticks and the outer axis.
//! The pass is a pure function of its inputs; two calls with equal arguments
//! produce equal results.
//!
//! The stages live in submodules and run in this order:
//!
//! 1. [`filter`] resolves the filter against the disc.
//! 2. [`rings`] orders the rings and assigns radial bands.
//! 3. [`placement`] maps each ring's activities to arcs and splits the band
//!    among overlapping activities.
//! 4. [`labels`] decides how each activity's title is drawn.
//! 5. [`ticks`] generates ring sub-ticks and the outer axis.

pub mod filter;
pub mod labels;
pub mod placement;
pub mod rings;
pub mod ticks;

use chrono::{DateTime, Utc};
use log::{debug, info, trace};
use serde::Serialize;

use archedisk_core::{
    LayoutError,
    diagnostic::{Diagnostic, DiagnosticCollector},
    geometry::{ArcSegment, Point},
    model::{Activity, Disc, FilterState, RingType, TimeUnit},
    temporal::TimeSpan,
};

use crate::config::AppConfig;
use filter::ActivityFilter;
use labels::{LabelDirective, LabelInput, fit_label};
use placement::PlacementResolver;
use rings::{AllocatedRing, RingAllocator};
use ticks::{RingTick, Tick, outer_ticks, ring_ticks};

/// A placed activity, ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRenderData {
    activity: Activity,
    arc_segment: ArcSegment,
    is_visible: bool,
    is_selected: bool,
    label: LabelDirective,
}

impl ActivityRenderData {
    pub fn activity(&self) -> &Activity {
        &self.activity
    }

    pub fn arc_segment(&self) -> &ArcSegment {
        &self.arc_segment
    }

    /// `false` when the activity lies wholly outside the disc.
    pub fn is_visible(&self) -> bool {
        self.is_visible
    }

    pub fn is_selected(&self) -> bool {
        self.is_selected
    }

    pub fn label(&self) -> &LabelDirective {
        &self.label
    }
}

/// A displayed ring with its band, activities and sub-ticks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RingRenderData {
    ring_id: String,
    name: String,
    ring_type: RingType,
    color: Option<String>,
    time_unit: TimeUnit,
    inner_radius: f64,
    outer_radius: f64,
    activities: Vec<ActivityRenderData>,
    ticks: Vec<RingTick>,
}

impl RingRenderData {
    pub fn ring_id(&self) -> &str {
        &self.ring_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The ring type after normalization.
    pub fn ring_type(&self) -> RingType {
        self.ring_type
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// The ring's own time unit, or the disc default.
    pub fn time_unit(&self) -> TimeUnit {
        self.time_unit
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    pub fn activities(&self) -> &[ActivityRenderData] {
        &self.activities
    }

    pub fn ticks(&self) -> &[RingTick] {
        &self.ticks
    }
}

/// Output of one layout pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResult {
    ring_render_data: Vec<RingRenderData>,
    outer_ticks: Vec<Tick>,
    diagnostics: Vec<Diagnostic>,
    center_radius: f64,
    max_radius: f64,
}

impl LayoutResult {
    /// Displayed rings, normal rings first, thin rings nearest the rim.
    pub fn ring_render_data(&self) -> &[RingRenderData] {
        &self.ring_render_data
    }

    pub fn outer_ticks(&self) -> &[Tick] {
        &self.outer_ticks
    }

    /// Anomalies recovered from during the pass, in emission order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn center_radius(&self) -> f64 {
        self.center_radius
    }

    pub fn max_radius(&self) -> f64 {
        self.max_radius
    }

    /// Iterate over every placed activity, ring by ring.
    pub fn activities(&self) -> impl Iterator<Item = &ActivityRenderData> {
        self.ring_render_data
            .iter()
            .flat_map(|ring| ring.activities.iter())
    }

    /// The topmost visible activity whose arc contains `point`.
    ///
    /// `point` is relative to the disc centre. Activities drawn later are on
    /// top, so the search runs in reverse draw order.
    pub fn activity_at(&self, point: Point) -> Option<&ActivityRenderData> {
        self.ring_render_data
            .iter()
            .rev()
            .flat_map(|ring| ring.activities.iter().rev())
            .find(|activity| activity.is_visible && activity.arc_segment.contains(point))
    }
}

/// Lay out `disc` with the default configuration.
///
/// # Errors
///
/// Returns [`LayoutError`] if the disc bounds cannot be parsed or are not
/// ordered, or if the filter's date range is inverted.
///
/// # Examples
///
/// ```
/// # use chrono::Utc;
/// # use archedisk::layout::layout_disc;
/// # use archedisk_core::model::{Activity, Disc, FilterState, Ring};
/// let disc = Disc::new("2025-01-01", "2025-12-31").with_ring(
///     Ring::new("r1", "Product", "normal")
///         .with_activity(Activity::new("a1", "r1", "Launch", "2025-03-01").with_end("2025-04-15")),
/// );
///
/// let result = layout_disc(&disc, &FilterState::default(), Some("a1"), Utc::now()).unwrap();
/// let ring = &result.ring_render_data()[0];
/// assert_eq!(ring.activities().len(), 1);
/// assert!(ring.activities()[0].is_selected());
/// ```
pub fn layout_disc(
    disc: &Disc,
    filter: &FilterState,
    selected: Option<&str>,
    now: DateTime<Utc>,
) -> Result<LayoutResult, LayoutError> {
    layout_disc_with_config(disc, filter, selected, now, &AppConfig::default())
}

/// Lay out `disc` with an explicit configuration.
///
/// # Errors
///
/// Returns [`LayoutError`] if the configured radii are not ordered, if the
/// disc bounds cannot be parsed or are not ordered, or if the filter's date
/// range is inverted.
pub fn layout_disc_with_config(
    disc: &Disc,
    filter: &FilterState,
    selected: Option<&str>,
    now: DateTime<Utc>,
    config: &AppConfig,
) -> Result<LayoutResult, LayoutError> {
    let layout_config = config.layout();
    layout_config.validate()?;
    let span = TimeSpan::parse(&disc.start, &disc.end)?;

    info!(
        disc = disc.id,
        rings = disc.rings.len(),
        filtered = !filter.is_empty(),
        selected:? = selected;
        "Laying out disc"
    );

    let mut diagnostics = DiagnosticCollector::new();
    let activity_filter = ActivityFilter::resolve(filter, disc, &mut diagnostics)?;
    let allocated = RingAllocator::new(layout_config).allocate(
        disc,
        &filter.ring_order,
        &activity_filter,
        &mut diagnostics,
    );

    let resolver = PlacementResolver::new(&span, layout_config.min_arc());
    let ring_render_data: Vec<RingRenderData> = allocated
        .iter()
        .map(|allocated| {
            render_ring(
                allocated,
                disc.default_time_unit,
                &span,
                &resolver,
                &activity_filter,
                selected,
                config,
                &mut diagnostics,
            )
        })
        .collect();

    let outer_ticks = outer_ticks(&span, now);
    let diagnostics = diagnostics.finish();

    info!(
        rings = ring_render_data.len(),
        activities = ring_render_data.iter().map(|ring| ring.activities.len()).sum::<usize>(),
        outer_ticks = outer_ticks.len(),
        diagnostics = diagnostics.len();
        "Disc laid out"
    );

    Ok(LayoutResult {
        ring_render_data,
        outer_ticks,
        diagnostics,
        center_radius: layout_config.center_radius(),
        max_radius: layout_config.max_radius(),
    })
}

#[allow(clippy::too_many_arguments)]
fn render_ring(
    allocated: &AllocatedRing<'_>,
    default_time_unit: TimeUnit,
    span: &TimeSpan,
    resolver: &PlacementResolver<'_>,
    activity_filter: &ActivityFilter<'_>,
    selected: Option<&str>,
    config: &AppConfig,
    diagnostics: &mut DiagnosticCollector,
) -> RingRenderData {
    let ring = allocated.ring;
    let matching: Vec<&Activity> = ring
        .activities
        .iter()
        .filter(|activity| activity_filter.matches(activity))
        .collect();

    let activities: Vec<ActivityRenderData> = resolver
        .place(ring, &matching, allocated.band, diagnostics)
        .into_iter()
        .map(|placed| {
            let label = fit_label(
                LabelInput {
                    title: &placed.activity.title,
                    arc: &placed.arc,
                    ring_type: allocated.ring_type,
                    visible: placed.visible,
                    duration_days: placed.duration_days,
                },
                config.labels(),
            );
            trace!(activity = placed.activity.id, label:? = label; "Label fitted");
            ActivityRenderData {
                activity: placed.activity.clone(),
                arc_segment: placed.arc,
                is_visible: placed.visible,
                is_selected: selected == Some(placed.activity.id.as_str()),
                label,
            }
        })
        .collect();

    let time_unit = ring.effective_time_unit(default_time_unit);
    let ticks = ring_ticks(span, time_unit);

    debug!(
        ring = ring.id,
        ring_type:% = allocated.ring_type,
        inner_radius = allocated.band.inner_radius(),
        outer_radius = allocated.band.outer_radius(),
        activities = activities.len(),
        filtered_out = ring.activities.len() - matching.len(),
        ticks = ticks.len();
        "Ring laid out"
    );

    RingRenderData {
        ring_id: ring.id.clone(),
        name: ring.name.clone(),
        ring_type: allocated.ring_type,
        color: ring.color.clone(),
        time_unit,
        inner_radius: allocated.band.inner_radius(),
        outer_radius: allocated.band.outer_radius(),
        activities,
        ticks,
    }
}

#[cfg(test)]
mod tests {
    use archedisk_core::{
        diagnostic::DiagnosticCode,
        model::{Ring, TimeUnit},
        temporal::parse_timestamp,
    };

    use super::*;

    fn now() -> DateTime<Utc> {
        parse_timestamp("2025-06-15").unwrap()
    }

    fn disc() -> Disc {
        Disc::new("2025-01-01", "2025-12-31")
            .with_ring(
                Ring::new("r1", "Product", "normal")
                    .with_activity(Activity::new("a1", "r1", "Launch", "2025-03-01").with_end("2025-04-30"))
                    .with_activity(Activity::new("a2", "r1", "Retro", "2025-09-01")),
            )
            .with_ring(
                Ring::new("r2", "Milestones", "thin")
                    .with_activity(Activity::new("m1", "r2", "Freeze", "2025-11-01")),
            )
            .with_ring(Ring::new("r3", "Hiring", "normal").with_time_unit(TimeUnit::Quarter))
    }

    #[test]
    fn test_thin_rings_listed_last() {
        let result = layout_disc(&disc(), &FilterState::default(), None, now()).unwrap();
        let ids: Vec<&str> = result.ring_render_data().iter().map(RingRenderData::ring_id).collect();
        assert_eq!(ids, vec!["r1", "r3", "r2"]);
        assert_eq!(result.outer_ticks().len(), 12);
        assert!(result.diagnostics().is_empty());
    }

    #[test]
    fn test_ring_order_applies_to_normal_rings() {
        let filter = FilterState {
            ring_order: vec!["r2".to_string(), "r3".to_string()],
            ..FilterState::default()
        };
        let result = layout_disc(&disc(), &filter, None, now()).unwrap();
        let ids: Vec<&str> = result.ring_render_data().iter().map(RingRenderData::ring_id).collect();
        assert_eq!(ids, vec!["r3", "r1", "r2"]);
    }

    #[test]
    fn test_selection_and_sub_ticks() {
        let result = layout_disc(&disc(), &FilterState::default(), Some("a2"), now()).unwrap();
        let product = &result.ring_render_data()[0];
        let selected: Vec<&str> = product
            .activities()
            .iter()
            .filter(|activity| activity.is_selected())
            .map(|activity| activity.activity().id.as_str())
            .collect();
        assert_eq!(selected, vec!["a2"]);
        assert!(product.ticks().is_empty());

        let hiring = &result.ring_render_data()[1];
        assert_eq!(hiring.time_unit(), TimeUnit::Quarter);
        assert_eq!(hiring.ticks().len(), 4);
    }

    #[test]
    fn test_text_filter_drops_activities() {
        let filter = FilterState {
            text_search: "retro".to_string(),
            ..FilterState::default()
        };
        let result = layout_disc(&disc(), &filter, None, now()).unwrap();
        let ids: Vec<&str> = result
            .activities()
            .map(|activity| activity.activity().id.as_str())
            .collect();
        assert_eq!(ids, vec!["a2"]);
    }

    #[test]
    fn test_thin_ring_activities_have_no_label() {
        let result = layout_disc(&disc(), &FilterState::default(), None, now()).unwrap();
        let thin = &result.ring_render_data()[2];
        assert_eq!(thin.ring_type(), RingType::Thin);
        assert!(thin.activities()[0].label().is_hidden());
    }

    #[test]
    fn test_inverted_disc_is_fatal() {
        let disc = Disc::new("2025-12-31", "2025-01-01");
        let result = layout_disc(&disc, &FilterState::default(), None, now());
        assert!(matches!(result, Err(LayoutError::InvalidRange { .. })));
    }

    #[test]
    fn test_bad_activity_is_dropped_with_diagnostic() {
        let disc = Disc::new("2025-01-01", "2025-12-31").with_ring(
            Ring::new("r1", "Product", "normal")
                .with_activity(Activity::new("bad", "r1", "Broken", "someday"))
                .with_activity(Activity::new("ok", "r1", "Fine", "2025-05-01")),
        );
        let result = layout_disc(&disc, &FilterState::default(), None, now()).unwrap();

        let ids: Vec<&str> = result
            .activities()
            .map(|activity| activity.activity().id.as_str())
            .collect();
        assert_eq!(ids, vec!["ok"]);
        assert_eq!(result.diagnostics().len(), 1);
        assert_eq!(result.diagnostics()[0].code(), Some(DiagnosticCode::D100));
    }

    #[test]
    fn test_activity_at_hits_placed_arc() {
        let result = layout_disc(&disc(), &FilterState::default(), None, now()).unwrap();
        let launch = result
            .activities()
            .find(|activity| activity.activity().id == "a1")
            .unwrap();

        let hit = result.activity_at(launch.arc_segment().center()).unwrap();
        assert_eq!(hit.activity().id, "a1");
        assert!(result.activity_at(Point::new(0.0, 0.0)).is_none());
    }
}
