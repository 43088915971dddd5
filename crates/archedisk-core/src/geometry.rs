//! Polar geometry for disc layout.
//!
//! This module converts between polar and Cartesian coordinates and describes
//! the shapes a rendering adapter strokes or fills.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate relative to the disc centre
//! - [`PolarPoint`] - An angle/radius pair
//! - [`ArcSegment`] - A rectangle in polar space occupied by an activity
//! - [`ArcPath`], [`SectorPath`], [`TickPath`] - Path descriptors
//!
//! # Coordinate System
//!
//! The disc centre is the origin and the frame matches SVG:
//!
//! ```text
//!              -π/2
//!               │
//!               │
//!     π ────────●────────► +X (angle 0)
//!               │
//!               ▼
//!              +Y (π/2)
//! ```
//!
//! Because `y` grows downward, increasing angles run clockwise on screen. An
//! angle of `-π/2` points to the top of the disc.
//!
//! Path descriptors carry points and flags only. Turning them into drawing
//! commands is the job of a rendering adapter.

use std::f64::consts::{PI, TAU};

use serde::Serialize;

/// A 2D point relative to the disc centre.
///
/// # Examples
///
/// ```
/// # use archedisk_core::geometry::Point;
/// let p = Point::new(3.0, 4.0);
/// assert_eq!(p.hypot(), 5.0);
/// assert_eq!(p.translate(10.0, 10.0), Point::new(13.0, 14.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f64 {
        self.x
    }

    pub fn y(self) -> f64 {
        self.y
    }

    /// Distance from the origin
    pub fn hypot(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Shifts the point by the given offsets
    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// An angle (radians) and radius pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PolarPoint {
    angle: f64,
    radius: f64,
}

impl PolarPoint {
    pub fn new(angle: f64, radius: f64) -> Self {
        Self { angle, radius }
    }

    pub fn angle(self) -> f64 {
        self.angle
    }

    pub fn radius(self) -> f64 {
        self.radius
    }

    pub fn to_cartesian(self) -> Point {
        polar_to_cartesian(self.angle, self.radius)
    }
}

/// Convert an angle and radius to a point: `x = r·cos θ`, `y = r·sin θ`.
pub fn polar_to_cartesian(angle: f64, radius: f64) -> Point {
    Point::new(radius * angle.cos(), radius * angle.sin())
}

/// Convert a point to its angle (in `(-π, π]`) and radius.
pub fn cartesian_to_polar(point: Point) -> PolarPoint {
    PolarPoint::new(point.y.atan2(point.x), point.hypot())
}

/// Normalize an angle into `[0, 2π)`.
///
/// # Examples
///
/// ```
/// # use std::f64::consts::{PI, TAU};
/// # use archedisk_core::geometry::normalize_angle;
/// assert!((normalize_angle(-PI / 2.0) - 3.0 * PI / 2.0).abs() < 1e-12);
/// assert_eq!(normalize_angle(TAU), 0.0);
/// ```
pub fn normalize_angle(angle: f64) -> f64 {
    let normalized = angle.rem_euclid(TAU);
    // rem_euclid can return TAU itself for tiny negative inputs.
    if normalized >= TAU { 0.0 } else { normalized }
}

/// The region of an annulus between two angles and two radii.
///
/// Angles are in radians with `start_angle <= end_angle` for a placed
/// activity; they are not normalized, so a segment may extend past `3π/2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArcSegment {
    start_angle: f64,
    end_angle: f64,
    inner_radius: f64,
    outer_radius: f64,
}

impl ArcSegment {
    pub fn new(start_angle: f64, end_angle: f64, inner_radius: f64, outer_radius: f64) -> Self {
        Self {
            start_angle,
            end_angle,
            inner_radius,
            outer_radius,
        }
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn end_angle(&self) -> f64 {
        self.end_angle
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    /// Angular extent in radians.
    pub fn sweep(&self) -> f64 {
        (self.end_angle - self.start_angle).abs()
    }

    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }

    pub fn mid_radius(&self) -> f64 {
        (self.inner_radius + self.outer_radius) / 2.0
    }

    /// Radial extent.
    pub fn thickness(&self) -> f64 {
        self.outer_radius - self.inner_radius
    }

    /// Arc length measured along the mid radius.
    pub fn arc_length_at_mid(&self) -> f64 {
        self.sweep() * self.mid_radius()
    }

    /// The point at mid-angle and mid-radius.
    pub fn center(&self) -> Point {
        arc_center(self)
    }

    pub fn contains(&self, point: Point) -> bool {
        is_point_in_arc(point, self)
    }
}

/// The point at the middle of an arc segment, where labels anchor.
pub fn arc_center(arc: &ArcSegment) -> Point {
    polar_to_cartesian(arc.mid_angle(), arc.mid_radius())
}

/// Returns `true` if `point` lies inside `arc`.
///
/// The radius test is inclusive on both bounds. The angular range is
/// normalized before comparison and may wrap past zero, in which case the
/// point matches if it lies after the start or before the end. A segment
/// sweeping a full turn (within rounding) contains every angle.
pub fn is_point_in_arc(point: Point, arc: &ArcSegment) -> bool {
    let polar = cartesian_to_polar(point);
    if polar.radius < arc.inner_radius || polar.radius > arc.outer_radius {
        return false;
    }
    if arc.sweep() >= TAU - 1e-9 {
        return true;
    }

    let angle = normalize_angle(polar.angle);
    let start = normalize_angle(arc.start_angle.min(arc.end_angle));
    let end = normalize_angle(arc.start_angle.max(arc.end_angle));

    if start <= end {
        angle >= start && angle <= end
    } else {
        angle >= start || angle <= end
    }
}

/// Direction an arc is traced in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SweepDirection {
    /// Increasing angle.
    Clockwise,
    CounterClockwise,
}

impl SweepDirection {
    /// The SVG `sweep-flag` value for this direction.
    pub fn flag(self) -> u8 {
        match self {
            SweepDirection::Clockwise => 1,
            SweepDirection::CounterClockwise => 0,
        }
    }
}

/// A circular arc from `start` to `end` around the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArcPath {
    start: Point,
    end: Point,
    radius: f64,
    large_arc: bool,
    sweep: SweepDirection,
}

impl ArcPath {
    /// Describe the arc of `radius` from `start_angle` to `end_angle`.
    ///
    /// The direction follows the sign of the sweep; `large_arc` is set when
    /// the arc spans more than half a turn.
    pub fn new(start_angle: f64, end_angle: f64, radius: f64) -> Self {
        let delta = end_angle - start_angle;
        let sweep = if delta >= 0.0 {
            SweepDirection::Clockwise
        } else {
            SweepDirection::CounterClockwise
        };
        Self {
            start: polar_to_cartesian(start_angle, radius),
            end: polar_to_cartesian(end_angle, radius),
            radius,
            large_arc: delta.abs() > PI,
            sweep,
        }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn large_arc(&self) -> bool {
        self.large_arc
    }

    pub fn sweep(&self) -> SweepDirection {
        self.sweep
    }
}

/// Split an arc in two halves so that a (near-)full turn stays drawable.
///
/// An elliptical arc whose end point coincides with its start draws
/// nothing, so adapters render sweeps close to `2π` as two halves.
pub fn arc_halves(start_angle: f64, end_angle: f64, radius: f64) -> [ArcPath; 2] {
    let mid = (start_angle + end_angle) / 2.0;
    [
        ArcPath::new(start_angle, mid, radius),
        ArcPath::new(mid, end_angle, radius),
    ]
}

/// A closed annular sector: outer arc, radial edge, inner arc back, radial edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorPath {
    outer: ArcPath,
    inner: ArcPath,
}

impl SectorPath {
    /// Describe the outline of `arc`.
    ///
    /// The inner arc runs from the end angle back to the start angle so the
    /// outline forms a single closed loop.
    pub fn from_arc(arc: &ArcSegment) -> Self {
        Self {
            outer: ArcPath::new(arc.start_angle, arc.end_angle, arc.outer_radius),
            inner: ArcPath::new(arc.end_angle, arc.start_angle, arc.inner_radius),
        }
    }

    pub fn outer(&self) -> &ArcPath {
        &self.outer
    }

    pub fn inner(&self) -> &ArcPath {
        &self.inner
    }

    pub fn large_arc(&self) -> bool {
        self.outer.large_arc
    }
}

/// A straight radial line at a fixed angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TickPath {
    from: Point,
    to: Point,
}

impl TickPath {
    /// A spoke at `angle` from `inner_radius` out to `outer_radius`.
    pub fn radial(angle: f64, inner_radius: f64, outer_radius: f64) -> Self {
        Self {
            from: polar_to_cartesian(angle, inner_radius),
            to: polar_to_cartesian(angle, outer_radius),
        }
    }

    pub fn from(&self) -> Point {
        self.from
    }

    pub fn to(&self) -> Point {
        self.to
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_polar_to_cartesian_axes() {
        let top = polar_to_cartesian(-FRAC_PI_2, 100.0);
        assert_approx_eq!(f64, top.x(), 0.0, epsilon = 1e-9);
        assert_approx_eq!(f64, top.y(), -100.0, epsilon = 1e-9);

        let right = polar_to_cartesian(0.0, 50.0);
        assert_approx_eq!(f64, right.x(), 50.0);
        assert_approx_eq!(f64, right.y(), 0.0);

        // Clockwise on screen: a quarter turn after the top is the right edge.
        let bottom = polar_to_cartesian(FRAC_PI_2, 10.0);
        assert_approx_eq!(f64, bottom.y(), 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_cartesian_to_polar_inverts() {
        let polar = cartesian_to_polar(polar_to_cartesian(1.0, 42.0));
        assert_approx_eq!(f64, polar.angle(), 1.0, epsilon = 1e-12);
        assert_approx_eq!(f64, polar.radius(), 42.0, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_angle() {
        assert_approx_eq!(f64, normalize_angle(-FRAC_PI_2), 3.0 * FRAC_PI_2);
        assert_approx_eq!(f64, normalize_angle(5.0 * PI), PI, epsilon = 1e-12);
        assert_eq!(normalize_angle(0.0), 0.0);
        assert!(normalize_angle(-1e-18) < TAU);
    }

    #[test]
    fn test_arc_segment_measures() {
        let arc = ArcSegment::new(0.0, 0.5, 100.0, 140.0);
        assert_approx_eq!(f64, arc.sweep(), 0.5);
        assert_approx_eq!(f64, arc.mid_radius(), 120.0);
        assert_approx_eq!(f64, arc.thickness(), 40.0);
        assert_approx_eq!(f64, arc.arc_length_at_mid(), 60.0);

        let center = arc.center();
        assert_approx_eq!(f64, center.hypot(), 120.0, epsilon = 1e-9);
    }

    #[test]
    fn test_point_in_arc_simple() {
        let arc = ArcSegment::new(0.0, FRAC_PI_2, 100.0, 200.0);
        assert!(is_point_in_arc(polar_to_cartesian(0.5, 150.0), &arc));
        assert!(is_point_in_arc(polar_to_cartesian(0.5, 100.0), &arc));
        assert!(!is_point_in_arc(polar_to_cartesian(0.5, 99.0), &arc));
        assert!(!is_point_in_arc(polar_to_cartesian(2.0, 150.0), &arc));
    }

    #[test]
    fn test_point_in_arc_wraps_past_zero() {
        // Straddles the right edge, where normalized angles wrap to zero.
        let arc = ArcSegment::new(-0.3, 0.3, 50.0, 80.0);
        assert!(is_point_in_arc(polar_to_cartesian(0.1, 60.0), &arc));
        assert!(is_point_in_arc(polar_to_cartesian(-0.1, 60.0), &arc));
        assert!(!is_point_in_arc(polar_to_cartesian(PI, 60.0), &arc));
        assert!(!is_point_in_arc(polar_to_cartesian(0.5, 60.0), &arc));

        // Same span expressed a full turn later.
        let arc = ArcSegment::new(TAU - 0.3, TAU + 0.3, 50.0, 80.0);
        assert!(is_point_in_arc(polar_to_cartesian(0.2, 60.0), &arc));
        assert!(!is_point_in_arc(polar_to_cartesian(-FRAC_PI_2, 60.0), &arc));
    }

    #[test]
    fn test_point_in_full_turn() {
        let arc = ArcSegment::new(-FRAC_PI_2, 3.0 * FRAC_PI_2, 80.0, 320.0);
        assert!(is_point_in_arc(Point::new(0.0, 100.0), &arc));
        assert!(is_point_in_arc(Point::new(-100.0, 0.0), &arc));
        assert!(!is_point_in_arc(Point::new(0.0, 10.0), &arc));
    }

    #[test]
    fn test_arc_path_flags() {
        let small = ArcPath::new(0.0, 1.0, 10.0);
        assert!(!small.large_arc());
        assert_eq!(small.sweep(), SweepDirection::Clockwise);
        assert_eq!(small.sweep().flag(), 1);

        let large = ArcPath::new(0.0, 4.0, 10.0);
        assert!(large.large_arc());

        let backwards = ArcPath::new(1.0, 0.0, 10.0);
        assert_eq!(backwards.sweep(), SweepDirection::CounterClockwise);
        assert_eq!(backwards.sweep().flag(), 0);
    }

    #[test]
    fn test_arc_halves_meet() {
        let [first, second] = arc_halves(-FRAC_PI_2, 3.0 * FRAC_PI_2, 100.0);
        assert_eq!(first.end(), second.start());
        assert!(!first.large_arc());
        assert!(!second.large_arc());
    }

    #[test]
    fn test_sector_path_closes() {
        let arc = ArcSegment::new(0.0, 1.0, 100.0, 150.0);
        let sector = SectorPath::from_arc(&arc);
        assert_approx_eq!(f64, sector.outer().radius(), 150.0);
        assert_approx_eq!(f64, sector.inner().radius(), 100.0);
        assert_eq!(sector.inner().sweep(), SweepDirection::CounterClockwise);
        assert_approx_eq!(f64, sector.inner().end().hypot(), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_tick_path_radial() {
        let tick = TickPath::radial(-FRAC_PI_2, 300.0, 320.0);
        assert_approx_eq!(f64, tick.from().y(), -300.0, epsilon = 1e-9);
        assert_approx_eq!(f64, tick.to().y(), -320.0, epsilon = 1e-9);
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        /// The mid point of any segment is inside it, wherever the segment sits.
        #[test]
        fn arc_contains_its_center(
            start in -10.0f64..10.0,
            sweep in 0.01f64..6.2,
            inner in 1.0f64..300.0,
            thickness in 1.0f64..100.0,
        ) {
            let arc = ArcSegment::new(start, start + sweep, inner, inner + thickness);
            prop_assert!(is_point_in_arc(arc.center(), &arc));
        }

        /// Points just outside the angular range are rejected.
        #[test]
        fn arc_rejects_opposite_side(
            start in -10.0f64..10.0,
            sweep in 0.01f64..3.0,
            inner in 1.0f64..300.0,
        ) {
            let arc = ArcSegment::new(start, start + sweep, inner, inner + 20.0);
            let opposite = polar_to_cartesian(arc.mid_angle() + PI, inner + 10.0);
            prop_assert!(!is_point_in_arc(opposite, &arc));
        }

        /// Polar conversion round-trips for positive radii.
        #[test]
        fn polar_round_trip(angle in -3.0f64..3.0, radius in 0.1f64..1000.0) {
            let polar = cartesian_to_polar(polar_to_cartesian(angle, radius));
            prop_assert!((polar.angle() - angle).abs() < 1e-9);
            prop_assert!((polar.radius() - radius).abs() < 1e-9);
        }
    }
}
