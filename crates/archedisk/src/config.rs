//! Configuration types for Archedisk layout and rendering.
//!
//! This module provides configuration structures that control how discs are
//! laid out, how activity titles are fitted and how the SVG adapter styles
//! its output. All types implement [`serde::Deserialize`] for loading from
//! external sources; every field has a default so partial files are valid.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`LayoutConfig`] - Radii, thin ring height and minimum arc.
//! - [`LabelConfig`] - Thresholds of the title fitting heuristic.
//! - [`StyleConfig`] - Colors used by the SVG adapter.
//!
//! # Example
//!
//! ```
//! # use archedisk::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().center_radius(), 80.0);
//! assert_eq!(config.labels().max_title_chars(), 20);
//! assert!(config.style().background_color().is_ok());
//! ```

use serde::Deserialize;

use archedisk_core::{LayoutError, color::Color};

/// Top-level configuration combining layout, label and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Label fitting section.
    #[serde(default)]
    labels: LabelConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(layout: LayoutConfig, labels: LabelConfig, style: StyleConfig) -> Self {
        Self {
            layout,
            labels,
            style,
        }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the label fitting configuration.
    pub fn labels(&self) -> &LabelConfig {
        &self.labels
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

fn default_center_radius() -> f64 {
    80.0
}

fn default_max_radius() -> f64 {
    320.0
}

fn default_thin_ring_height() -> f64 {
    10.0
}

fn default_min_arc() -> f64 {
    0.03
}

/// Radial geometry of the disc.
///
/// Normal rings share the band between `center_radius` and the innermost thin
/// ring; thin rings are stacked inward from `max_radius`.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_center_radius")]
    center_radius: f64,

    #[serde(default = "default_max_radius")]
    max_radius: f64,

    /// Fixed band height of each thin ring.
    #[serde(default = "default_thin_ring_height")]
    thin_ring_height: f64,

    /// Gap between adjacent normal rings.
    #[serde(default)]
    ring_padding: f64,

    /// Minimum angular extent of a placed activity, in radians.
    #[serde(default = "default_min_arc")]
    min_arc: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            center_radius: default_center_radius(),
            max_radius: default_max_radius(),
            thin_ring_height: default_thin_ring_height(),
            ring_padding: 0.0,
            min_arc: default_min_arc(),
        }
    }
}

impl LayoutConfig {
    /// Creates a layout configuration with the given radii and default
    /// thin ring height, padding and minimum arc.
    pub fn new(center_radius: f64, max_radius: f64) -> Self {
        Self {
            center_radius,
            max_radius,
            ..Self::default()
        }
    }

    pub fn with_thin_ring_height(mut self, height: f64) -> Self {
        self.thin_ring_height = height;
        self
    }

    pub fn with_ring_padding(mut self, padding: f64) -> Self {
        self.ring_padding = padding;
        self
    }

    pub fn with_min_arc(mut self, min_arc: f64) -> Self {
        self.min_arc = min_arc;
        self
    }

    pub fn center_radius(&self) -> f64 {
        self.center_radius
    }

    pub fn max_radius(&self) -> f64 {
        self.max_radius
    }

    pub fn thin_ring_height(&self) -> f64 {
        self.thin_ring_height
    }

    pub fn ring_padding(&self) -> f64 {
        self.ring_padding
    }

    pub fn min_arc(&self) -> f64 {
        self.min_arc
    }

    /// Checks that the radii describe a non-empty annulus, that thin rings
    /// have a height, and that one padding gap leaves room for a band.
    ///
    /// Padding that fits once but not between every ring is shrunk during
    /// allocation instead.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidRange`] if `center_radius` is negative or
    /// not below `max_radius`, if the thin ring height is not positive, if a
    /// size is negative, or if `ring_padding` reaches across the annulus.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !(self.center_radius >= 0.0 && self.center_radius < self.max_radius) {
            return Err(LayoutError::invalid_range(
                "radius",
                self.center_radius,
                self.max_radius,
            ));
        }
        if !(self.thin_ring_height > 0.0 && self.ring_padding >= 0.0 && self.min_arc >= 0.0) {
            return Err(LayoutError::invalid_range(
                "ring size",
                0.0,
                self.thin_ring_height.min(self.ring_padding).min(self.min_arc),
            ));
        }
        let available = self.max_radius - self.center_radius;
        if self.ring_padding >= available {
            return Err(LayoutError::invalid_range(
                "ring padding",
                self.ring_padding,
                available,
            ));
        }
        Ok(())
    }
}

fn default_canvas_radius() -> f64 {
    400.0
}

fn default_min_arc_length() -> f64 {
    15.0
}

fn default_curved_max_arc_length() -> f64 {
    30.0
}

fn default_radial_min_thickness() -> f64 {
    20.0
}

fn default_short_duration_days() -> i64 {
    16
}

fn default_max_title_chars() -> usize {
    20
}

fn default_edge_falloff() -> f64 {
    100.0
}

fn default_curved_font_size() -> f64 {
    10.0
}

fn default_radial_font_size() -> f64 {
    9.0
}

/// Thresholds of the activity title fitting heuristic.
///
/// Lengths share the unit of [`LayoutConfig`] radii.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelConfig {
    /// Radius of the drawing surface; title clearance is measured to it.
    #[serde(default = "default_canvas_radius")]
    canvas_radius: f64,

    /// Arcs at or below this mid-radius length get no title.
    #[serde(default = "default_min_arc_length")]
    min_arc_length: f64,

    /// Arcs at or below this length switch to radial text in thick rings.
    #[serde(default = "default_curved_max_arc_length")]
    curved_max_arc_length: f64,

    /// Minimum band thickness for the short-arc radial switch.
    #[serde(default = "default_radial_min_thickness")]
    radial_min_thickness: f64,

    /// Activities shorter than this many days use radial text.
    #[serde(default = "default_short_duration_days")]
    short_duration_days: i64,

    /// Title length limit with full clearance.
    #[serde(default = "default_max_title_chars")]
    max_title_chars: usize,

    /// Distance from the canvas edge over which the title limit shrinks to zero.
    #[serde(default = "default_edge_falloff")]
    edge_falloff: f64,

    #[serde(default = "default_curved_font_size")]
    curved_font_size: f64,

    #[serde(default = "default_radial_font_size")]
    radial_font_size: f64,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            canvas_radius: default_canvas_radius(),
            min_arc_length: default_min_arc_length(),
            curved_max_arc_length: default_curved_max_arc_length(),
            radial_min_thickness: default_radial_min_thickness(),
            short_duration_days: default_short_duration_days(),
            max_title_chars: default_max_title_chars(),
            edge_falloff: default_edge_falloff(),
            curved_font_size: default_curved_font_size(),
            radial_font_size: default_radial_font_size(),
        }
    }
}

impl LabelConfig {
    pub fn with_canvas_radius(mut self, radius: f64) -> Self {
        self.canvas_radius = radius;
        self
    }

    pub fn with_max_title_chars(mut self, chars: usize) -> Self {
        self.max_title_chars = chars;
        self
    }

    pub fn canvas_radius(&self) -> f64 {
        self.canvas_radius
    }

    pub fn min_arc_length(&self) -> f64 {
        self.min_arc_length
    }

    pub fn curved_max_arc_length(&self) -> f64 {
        self.curved_max_arc_length
    }

    pub fn radial_min_thickness(&self) -> f64 {
        self.radial_min_thickness
    }

    pub fn short_duration_days(&self) -> i64 {
        self.short_duration_days
    }

    pub fn max_title_chars(&self) -> usize {
        self.max_title_chars
    }

    pub fn edge_falloff(&self) -> f64 {
        self.edge_falloff
    }

    pub fn curved_font_size(&self) -> f64 {
        self.curved_font_size
    }

    pub fn radial_font_size(&self) -> f64 {
        self.radial_font_size
    }
}

fn default_activity_color() -> String {
    String::from("#3b82f6")
}

fn default_tick_color() -> String {
    String::from("#9ca3af")
}

fn default_current_tick_color() -> String {
    String::from("#ef4444")
}

/// Visual styling for the SVG adapter.
///
/// Fields hold color strings; they are parsed into [`Color`] on access.
#[derive(Debug, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background [`Color`] behind the disc. Transparent when unset.
    #[serde(default)]
    background_color: Option<String>,

    /// Fill for activities and rings that carry no color of their own.
    #[serde(default = "default_activity_color")]
    default_color: String,

    #[serde(default = "default_tick_color")]
    tick_color: String,

    /// Stroke of the outer tick matching the current period.
    #[serde(default = "default_current_tick_color")]
    current_tick_color: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            default_color: default_activity_color(),
            tick_color: default_tick_color(),
            current_tick_color: default_current_tick_color(),
        }
    }
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the parsed default activity [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string is invalid.
    pub fn default_color(&self) -> Result<Color, String> {
        Color::new(&self.default_color)
            .map_err(|err| format!("Invalid default color in config: {err}"))
    }

    /// Returns the parsed outer tick [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string is invalid.
    pub fn tick_color(&self) -> Result<Color, String> {
        Color::new(&self.tick_color).map_err(|err| format!("Invalid tick color in config: {err}"))
    }

    /// Returns the parsed current-period tick [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string is invalid.
    pub fn current_tick_color(&self) -> Result<Color, String> {
        Color::new(&self.current_tick_color)
            .map_err(|err| format!("Invalid current tick color in config: {err}"))
    }
}
