//! Title fitting for placed activities.
//!
//! Decides per activity whether its title is drawn, along which baseline,
//! and how much of it fits. The outcome is a [`LabelDirective`] a renderer
//! can follow without measuring anything itself.

use serde::Serialize;

use archedisk_core::{
    geometry::{ArcPath, ArcSegment, Point, normalize_angle},
    model::RingType,
};

use crate::config::LabelConfig;

/// Why an activity's title is not drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SuppressReason {
    /// Thin rings are marker rings and carry no titles.
    ThinRing,
    /// The activity lies outside the disc.
    NotVisible,
    /// The arc is too short at its mid radius.
    ArcTooShort,
    /// The label sits too close to the canvas edge for a useful title.
    NoClearance,
}

/// How an activity's title is rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "placement", rename_all = "camelCase")]
pub enum LabelDirective {
    Hidden {
        reason: SuppressReason,
    },
    /// Text follows the arc at mid radius, centred on the path.
    #[serde(rename_all = "camelCase")]
    Curved {
        text: String,
        path: ArcPath,
        flipped: bool,
        font_size: f64,
    },
    /// Straight text centred on `anchor`, rotated clockwise by `rotation` degrees.
    #[serde(rename_all = "camelCase")]
    Radial {
        text: String,
        anchor: Point,
        rotation: f64,
        flipped: bool,
        font_size: f64,
    },
}

impl LabelDirective {
    /// The text to draw, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            LabelDirective::Hidden { .. } => None,
            LabelDirective::Curved { text, .. } | LabelDirective::Radial { text, .. } => {
                Some(text)
            }
        }
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self, LabelDirective::Hidden { .. })
    }
}

/// Inputs of the heuristic for one placed activity.
#[derive(Debug, Clone, Copy)]
pub struct LabelInput<'a> {
    pub title: &'a str,
    pub arc: &'a ArcSegment,
    pub ring_type: RingType,
    pub visible: bool,
    pub duration_days: i64,
}

/// Title length allowed for a label whose midpoint is `distance` from the
/// centre: the configured maximum with full clearance, shrinking linearly to
/// zero over the last `edge_falloff` units before the canvas edge.
pub fn max_title_chars(distance: f64, config: &LabelConfig) -> usize {
    let edge_factor = ((config.canvas_radius() - distance) / config.edge_falloff()).min(1.0);
    let chars = (config.max_title_chars() as f64 * edge_factor).floor();
    if chars.is_finite() && chars > 0.0 {
        chars as usize
    } else {
        0
    }
}

/// Truncate `title` to `max_chars` characters, ending in `...` when cut.
///
/// Titles are only cut when the limit leaves room for the ellipsis.
///
/// # Examples
///
/// ```
/// # use archedisk::layout::labels::truncate_title;
/// assert_eq!(truncate_title("Quarterly planning", 10), "Quarter...");
/// assert_eq!(truncate_title("Retro", 10), "Retro");
/// ```
pub fn truncate_title(title: &str, max_chars: usize) -> String {
    if max_chars > 3 && title.chars().count() > max_chars {
        let kept: String = title.chars().take(max_chars - 3).collect();
        format!("{kept}...")
    } else {
        title.to_string()
    }
}

/// Returns `true` for angles (radians) whose text would read upside down:
/// the left half of the disc, strictly between 90° and 270° once the angle
/// is normalized into one turn. Angles a whole turn apart flip alike, so an
/// arc that starts before the top gets the same answer as its wrapped twin.
pub fn is_flipped(angle: f64) -> bool {
    let degrees = normalize_angle(angle).to_degrees();
    degrees > 90.0 && degrees < 270.0
}

/// Decide how the title of one activity is drawn.
pub fn fit_label(input: LabelInput<'_>, config: &LabelConfig) -> LabelDirective {
    if input.ring_type.is_thin() {
        return LabelDirective::Hidden {
            reason: SuppressReason::ThinRing,
        };
    }
    if !input.visible {
        return LabelDirective::Hidden {
            reason: SuppressReason::NotVisible,
        };
    }

    let arc = input.arc;
    let arc_length = arc.arc_length_at_mid();
    if arc_length <= config.min_arc_length() {
        return LabelDirective::Hidden {
            reason: SuppressReason::ArcTooShort,
        };
    }

    let max_chars = max_title_chars(arc.mid_radius(), config);
    if max_chars <= 3 {
        return LabelDirective::Hidden {
            reason: SuppressReason::NoClearance,
        };
    }

    let text = truncate_title(input.title, max_chars);
    let flipped = is_flipped(arc.mid_angle());
    let radial = (arc_length <= config.curved_max_arc_length()
        && arc.thickness() >= config.radial_min_thickness())
        || input.duration_days < config.short_duration_days();

    if radial {
        let rotation = arc.mid_angle().to_degrees() + if flipped { 180.0 } else { 0.0 };
        LabelDirective::Radial {
            text,
            anchor: arc.center(),
            rotation,
            flipped,
            font_size: config.radial_font_size(),
        }
    } else {
        LabelDirective::Curved {
            text,
            path: ArcPath::new(arc.start_angle(), arc.end_angle(), arc.mid_radius()),
            flipped,
            font_size: config.curved_font_size(),
        }
    }
}
