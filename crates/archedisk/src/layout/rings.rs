//! Radial band allocation for rings.
//!
//! Thin rings are stacked inward from the rim at a fixed height. Normal rings
//! evenly share what remains between the centre and the innermost thin ring.
//! Positions come from each ring's place in the full, ordered ring list, so a
//! ring hidden by the filter still keeps its band empty.
//!
//! Two limits keep every band non-empty. The padding between rings may take
//! at most half of the radius between the centre and the rim; beyond that it
//! shrinks evenly and D204 is reported. When normal rings are present, thin
//! rings may take at most half of the radius left after padding; beyond that
//! their fixed height shrinks evenly and D203 is reported. Without normal
//! rings the thin rings may use all of it.

use indexmap::IndexMap;
use log::debug;

use archedisk_core::{
    diagnostic::{Component, Diagnostic, DiagnosticCode, DiagnosticCollector},
    model::{Disc, Ring, RingType},
};

use super::filter::ActivityFilter;
use crate::config::LayoutConfig;

/// The radial extent of one ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingBand {
    inner_radius: f64,
    outer_radius: f64,
}

impl RingBand {
    pub fn new(inner_radius: f64, outer_radius: f64) -> Self {
        Self {
            inner_radius,
            outer_radius,
        }
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    pub fn thickness(&self) -> f64 {
        self.outer_radius - self.inner_radius
    }
}

/// A displayed ring with its normalized type and band.
#[derive(Debug, Clone, Copy)]
pub struct AllocatedRing<'a> {
    pub ring: &'a Ring,
    pub ring_type: RingType,
    pub band: RingBand,
}

/// Normalize each ring's type tag, reporting unrecognized tags.
pub fn normalize_ring_types<'a>(
    rings: &'a [Ring],
    diagnostics: &mut DiagnosticCollector,
) -> Vec<(&'a Ring, RingType)> {
    rings
        .iter()
        .map(|ring| {
            let ring_type = RingType::parse(&ring.ring_type).unwrap_or_else(|| {
                diagnostics.emit(
                    Diagnostic::warning(
                        Component::Rings,
                        format!("ring type `{}` is not recognized", ring.ring_type),
                    )
                    .with_code(DiagnosticCode::D200)
                    .with_subject(ring.id.as_str())
                    .with_help("laid out as `normal`; use `normal` or `thin`"),
                );
                RingType::Normal
            });
            (ring, ring_type)
        })
        .collect()
}

/// Apply a custom order: listed ids first in list order, the rest after in
/// their original order.
///
/// # Examples
///
/// ```
/// # use archedisk::layout::rings::order_by;
/// let ids = ["a", "b", "c", "d"];
/// let order = vec!["c".to_string(), "a".to_string()];
/// assert_eq!(order_by(&ids, &order, |id| *id), vec!["c", "a", "b", "d"]);
/// ```
pub fn order_by<T: Copy>(items: &[T], order: &[String], id: impl Fn(&T) -> &str) -> Vec<T> {
    let mut rank: IndexMap<&str, usize> = IndexMap::new();
    for (position, ring_id) in order.iter().enumerate() {
        rank.entry(ring_id.as_str()).or_insert(position);
    }

    let mut ordered = items.to_vec();
    ordered.sort_by_key(|item| rank.get(id(item)).copied().unwrap_or(usize::MAX));
    ordered
}

/// Band heights derived from the ring counts.
#[derive(Debug, Clone, Copy, PartialEq)]
struct BandMetrics {
    thin_height: f64,
    normal_height: f64,
    padding: f64,
}

/// Position of every ring within its type partition, keyed by ring id.
///
/// Duplicate ids resolve to the first ring carrying them.
#[derive(Debug, Default)]
pub struct RingIndex<'a> {
    normal: IndexMap<&'a str, usize>,
    thin: IndexMap<&'a str, usize>,
}

impl<'a> RingIndex<'a> {
    /// Index the ordered ring list.
    pub fn build(ordered: &[(&'a Ring, RingType)]) -> Self {
        let mut index = Self::default();
        for (ring, ring_type) in ordered {
            let partition = match ring_type {
                RingType::Normal => &mut index.normal,
                RingType::Thin => &mut index.thin,
            };
            let next = partition.len();
            partition.entry(ring.id.as_str()).or_insert(next);
        }
        index
    }

    pub fn position(&self, ring_id: &str, ring_type: RingType) -> Option<usize> {
        match ring_type {
            RingType::Normal => self.normal.get(ring_id).copied(),
            RingType::Thin => self.thin.get(ring_id).copied(),
        }
    }

    pub fn normal_count(&self) -> usize {
        self.normal.len()
    }

    pub fn thin_count(&self) -> usize {
        self.thin.len()
    }
}

/// Assigns radial bands to rings.
pub struct RingAllocator<'a> {
    config: &'a LayoutConfig,
}

impl<'a> RingAllocator<'a> {
    pub fn new(config: &'a LayoutConfig) -> Self {
        Self { config }
    }

    /// Allocate bands for the rings of `disc` that pass `filter`.
    ///
    /// The returned list is in display order: the ring order of the filter,
    /// with thin rings moved after the normal ones.
    pub fn allocate<'d>(
        &self,
        disc: &'d Disc,
        ring_order: &[String],
        filter: &ActivityFilter<'_>,
        diagnostics: &mut DiagnosticCollector,
    ) -> Vec<AllocatedRing<'d>> {
        let normalized = normalize_ring_types(&disc.rings, diagnostics);
        let ordered = order_by(&normalized, ring_order, |(ring, _)| ring.id.as_str());
        let index = RingIndex::build(&ordered);
        let metrics = self.metrics(&index, diagnostics);

        let mut displayed: Vec<_> = ordered
            .iter()
            .filter(|(ring, _)| filter.includes_ring(&ring.id))
            .map(|&(ring, ring_type)| AllocatedRing {
                ring,
                ring_type,
                band: self.band(&index, ring, ring_type, metrics, diagnostics),
            })
            .collect();
        displayed.sort_by_key(|allocated| allocated.ring_type.is_thin());

        debug!(
            rings = disc.rings.len(),
            displayed = displayed.len(),
            normal = index.normal_count(),
            thin = index.thin_count(),
            normal_height = metrics.normal_height,
            thin_height = metrics.thin_height,
            padding = metrics.padding;
            "Rings allocated"
        );
        displayed
    }

    fn metrics(&self, index: &RingIndex<'_>, diagnostics: &mut DiagnosticCollector) -> BandMetrics {
        let available = self.config.max_radius() - self.config.center_radius();
        let thin_count = index.thin_count() as f64;
        let normal_count = index.normal_count() as f64;

        // One gap between neighbouring normal rings, one inward of each thin ring.
        let gap_count = (normal_count - 1.0).max(0.0) + thin_count;
        let mut padding = self.config.ring_padding();
        if gap_count > 0.0 && gap_count * padding > available / 2.0 {
            padding = available / 2.0 / gap_count;
            diagnostics.emit(
                Diagnostic::warning(
                    Component::Rings,
                    format!(
                        "ring padding {} does not fit {gap_count} gaps; padding reduced to {padding:.2}",
                        self.config.ring_padding()
                    ),
                )
                .with_code(DiagnosticCode::D204),
            );
        }
        let banded = available - gap_count * padding;

        let mut thin_height = self.config.thin_ring_height();
        if index.thin_count() > 0 {
            // Thin rings may take at most half of the padded radius when
            // normal rings still need room, and all of it otherwise.
            let budget = if normal_count > 0.0 { banded / 2.0 } else { banded };
            if thin_count * thin_height > budget {
                thin_height = budget / thin_count;
                diagnostics.emit(
                    Diagnostic::warning(
                        Component::Rings,
                        format!(
                            "{} thin rings of height {} do not fit; height reduced to {thin_height:.2}",
                            index.thin_count(),
                            self.config.thin_ring_height()
                        ),
                    )
                    .with_code(DiagnosticCode::D203),
                );
            }
        }

        let normal_height = if index.normal_count() > 0 {
            (banded - thin_count * thin_height) / normal_count
        } else {
            0.0
        };

        BandMetrics {
            thin_height,
            normal_height,
            padding,
        }
    }

    fn band(
        &self,
        index: &RingIndex<'_>,
        ring: &Ring,
        ring_type: RingType,
        metrics: BandMetrics,
        diagnostics: &mut DiagnosticCollector,
    ) -> RingBand {
        let center = self.config.center_radius();
        let max = self.config.max_radius();
        let padding = metrics.padding;

        match (ring_type, index.position(&ring.id, ring_type)) {
            (RingType::Thin, Some(position)) => {
                let position = position as f64;
                let inner =
                    max - (position + 1.0) * metrics.thin_height - position * padding;
                RingBand::new(inner, inner + metrics.thin_height)
            }
            (RingType::Normal, Some(position)) => {
                let inner = center + position as f64 * (metrics.normal_height + padding);
                RingBand::new(inner, inner + metrics.normal_height)
            }
            (ring_type, None) => {
                diagnostics.emit(
                    Diagnostic::error(
                        Component::Rings,
                        format!("ring `{}` is missing from the {ring_type} ring index", ring.id),
                    )
                    .with_code(DiagnosticCode::D201)
                    .with_subject(ring.id.as_str()),
                );
                default_band(ring_type, center, max, metrics)
            }
        }
    }
}

fn default_band(ring_type: RingType, center: f64, max: f64, metrics: BandMetrics) -> RingBand {
    match ring_type {
        RingType::Thin => RingBand::new(max - metrics.thin_height, max),
        RingType::Normal => RingBand::new(center, center + metrics.normal_height),
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use archedisk_core::model::FilterState;

    use super::*;

    fn allocate(disc: &Disc, filter: &FilterState) -> (Vec<(String, RingBand)>, Vec<Diagnostic>) {
        allocate_with(&LayoutConfig::default(), disc, filter)
    }

    fn allocate_with(
        config: &LayoutConfig,
        disc: &Disc,
        filter: &FilterState,
    ) -> (Vec<(String, RingBand)>, Vec<Diagnostic>) {
        let mut diagnostics = DiagnosticCollector::new();
        let resolved = ActivityFilter::resolve(filter, disc, &mut diagnostics).unwrap();
        let rings = RingAllocator::new(config).allocate(disc, &filter.ring_order, &resolved, &mut diagnostics);
        let bands = rings
            .iter()
            .map(|allocated| (allocated.ring.id.clone(), allocated.band))
            .collect();
        (bands, diagnostics.finish())
    }

    fn ids(bands: &[(String, RingBand)]) -> Vec<&str> {
        bands.iter().map(|(id, _)| id.as_str()).collect()
    }

    #[test]
    fn test_normal_rings_share_radius() {
        let disc = Disc::new("2025-01-01", "2025-12-31")
            .with_ring(Ring::new("a", "A", "normal"))
            .with_ring(Ring::new("b", "B", "normal"));
        let (bands, diagnostics) = allocate(&disc, &FilterState::default());

        assert!(diagnostics.is_empty());
        assert_approx_eq!(f64, bands[0].1.inner_radius(), 80.0);
        assert_approx_eq!(f64, bands[0].1.outer_radius(), 200.0);
        assert_approx_eq!(f64, bands[1].1.inner_radius(), 200.0);
        assert_approx_eq!(f64, bands[1].1.outer_radius(), 320.0);
    }

    #[test]
    fn test_thin_rings_stack_at_rim() {
        let disc = Disc::new("2025-01-01", "2025-12-31")
            .with_ring(Ring::new("t1", "Milestones", "thin"))
            .with_ring(Ring::new("n1", "Work", "normal"))
            .with_ring(Ring::new("t2", "Holidays", "thin"));
        let (bands, _) = allocate(&disc, &FilterState::default());

        assert_eq!(ids(&bands), vec!["n1", "t1", "t2"]);
        let (_, normal) = bands[0];
        assert_approx_eq!(f64, normal.inner_radius(), 80.0);
        assert_approx_eq!(f64, normal.outer_radius(), 300.0);

        let (_, t1) = bands[1];
        assert_approx_eq!(f64, t1.inner_radius(), 310.0);
        assert_approx_eq!(f64, t1.outer_radius(), 320.0);
        let (_, t2) = bands[2];
        assert_approx_eq!(f64, t2.inner_radius(), 300.0);
        assert_approx_eq!(f64, t2.outer_radius(), 310.0);
    }

    #[test]
    fn test_only_thin_rings() {
        let disc = Disc::new("2025-01-01", "2025-12-31").with_ring(Ring::new("t", "T", "thin"));
        let (bands, diagnostics) = allocate(&disc, &FilterState::default());
        assert!(diagnostics.is_empty());
        assert_approx_eq!(f64, bands[0].1.inner_radius(), 310.0);
    }

    #[test]
    fn test_unknown_type_is_normal() {
        let disc = Disc::new("2025-01-01", "2025-12-31")
            .with_ring(Ring::new("w", "Wide", "wide"))
            .with_ring(Ring::new("t", "T", "thin"));
        let (bands, diagnostics) = allocate(&disc, &FilterState::default());

        assert_eq!(ids(&bands), vec!["w", "t"]);
        assert_approx_eq!(f64, bands[0].1.outer_radius(), 310.0);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code(), Some(DiagnosticCode::D200));
        assert_eq!(diagnostics[0].subject(), Some("w"));
    }

    #[test]
    fn test_ring_order_moves_bands() {
        let disc = Disc::new("2025-01-01", "2025-12-31")
            .with_ring(Ring::new("a", "A", "normal"))
            .with_ring(Ring::new("b", "B", "normal"))
            .with_ring(Ring::new("c", "C", "normal"));
        let filter = FilterState {
            ring_order: vec!["c".to_string()],
            ..FilterState::default()
        };
        let (bands, _) = allocate(&disc, &filter);

        assert_eq!(ids(&bands), vec!["c", "a", "b"]);
        assert_approx_eq!(f64, bands[0].1.inner_radius(), 80.0);
    }

    #[test]
    fn test_filtered_ring_keeps_its_band() {
        let disc = Disc::new("2025-01-01", "2025-12-31")
            .with_ring(Ring::new("a", "A", "normal"))
            .with_ring(Ring::new("b", "B", "normal"));
        let filter = FilterState {
            ring_ids: vec!["b".to_string()],
            ..FilterState::default()
        };
        let (bands, _) = allocate(&disc, &filter);

        assert_eq!(ids(&bands), vec!["b"]);
        assert_approx_eq!(f64, bands[0].1.inner_radius(), 200.0);
    }

    #[test]
    fn test_thin_overflow_shrinks_height() {
        let mut disc = Disc::new("2025-01-01", "2025-12-31").with_ring(Ring::new("n", "N", "normal"));
        for i in 0..20 {
            disc = disc.with_ring(Ring::new(format!("t{i}"), "T", "thin"));
        }
        let (bands, diagnostics) = allocate(&disc, &FilterState::default());

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code(), Some(DiagnosticCode::D203));
        let normal = bands[0].1;
        assert_approx_eq!(f64, normal.inner_radius(), 80.0);
        assert_approx_eq!(f64, normal.outer_radius(), 200.0, epsilon = 1e-9);
        for (_, band) in &bands[1..] {
            assert!(band.inner_radius() >= normal.outer_radius() - 1e-9);
            assert!(band.thickness() > 0.0);
        }
    }

    #[test]
    fn test_padding_separates_rings() {
        let config = LayoutConfig::default().with_ring_padding(10.0);
        let disc = Disc::new("2025-01-01", "2025-12-31")
            .with_ring(Ring::new("a", "A", "normal"))
            .with_ring(Ring::new("b", "B", "normal"))
            .with_ring(Ring::new("t", "T", "thin"));
        let (bands, diagnostics) = allocate_with(&config, &disc, &FilterState::default());

        assert!(diagnostics.is_empty());
        assert_approx_eq!(f64, bands[0].1.inner_radius(), 80.0);
        assert_approx_eq!(f64, bands[0].1.outer_radius(), 185.0);
        assert_approx_eq!(f64, bands[1].1.inner_radius(), 195.0);
        assert_approx_eq!(f64, bands[1].1.outer_radius(), 300.0);
        assert_approx_eq!(f64, bands[2].1.inner_radius(), 310.0);
        assert_approx_eq!(f64, bands[2].1.outer_radius(), 320.0);
    }

    #[test]
    fn test_padding_overflow_shrinks_gaps() {
        let config = LayoutConfig::default().with_ring_padding(100.0);
        let disc = Disc::new("2025-01-01", "2025-12-31")
            .with_ring(Ring::new("a", "A", "normal"))
            .with_ring(Ring::new("b", "B", "normal"))
            .with_ring(Ring::new("c", "C", "normal"));
        let (bands, diagnostics) = allocate_with(&config, &disc, &FilterState::default());

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code(), Some(DiagnosticCode::D204));
        // Two gaps of 60 leave three bands of 40.
        assert_approx_eq!(f64, bands[0].1.inner_radius(), 80.0);
        assert_approx_eq!(f64, bands[0].1.outer_radius(), 120.0);
        assert_approx_eq!(f64, bands[1].1.inner_radius(), 180.0);
        assert_approx_eq!(f64, bands[2].1.outer_radius(), 320.0);
        for (_, band) in &bands {
            assert!(band.inner_radius() < band.outer_radius());
        }
    }

    #[test]
    fn test_missing_index_falls_back_to_default_band() {
        let config = LayoutConfig::default();
        let allocator = RingAllocator::new(&config);
        let ring = Ring::new("orphan", "Orphan", "thin");
        let metrics = BandMetrics {
            thin_height: 10.0,
            normal_height: 60.0,
            padding: 0.0,
        };
        let mut diagnostics = DiagnosticCollector::new();

        let band = allocator.band(&RingIndex::default(), &ring, RingType::Thin, metrics, &mut diagnostics);
        assert_eq!(band, RingBand::new(310.0, 320.0));

        let band = allocator.band(&RingIndex::default(), &ring, RingType::Normal, metrics, &mut diagnostics);
        assert_eq!(band, RingBand::new(80.0, 140.0));

        let diagnostics = diagnostics.finish();
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics.iter().all(|diag| diag.code() == Some(DiagnosticCode::D201)));
    }

    #[test]
    fn test_order_by_ignores_duplicates_and_unknowns() {
        let ids = ["a", "b", "c"];
        let order = vec!["b".to_string(), "zzz".to_string(), "b".to_string(), "a".to_string()];
        assert_eq!(order_by(&ids, &order, |id| *id), vec!["b", "a", "c"]);
    }
}
