//! Archedisk - a radial layout engine for time-bounded discs.
//!
//! A disc is a bounded date range drawn as concentric rings of time-stamped
//! activities: time runs clockwise from the top, rings are stacked outward
//! from a central hub. This crate computes everything a renderer needs to
//! draw one (ring bands, activity arcs, tick marks and title placement) and
//! ships an SVG adapter for that output.

pub mod config;
pub mod layout;

mod error;
mod export;

pub use archedisk_core::{color, diagnostic, geometry, model, temporal};

pub use archedisk_core::LayoutError;
pub use error::ArchediskError;
pub use layout::{LayoutResult, layout_disc, layout_disc_with_config};

use chrono::{DateTime, Utc};
use log::{debug, info, trace};

use config::AppConfig;
use export::Exporter;
use model::{Disc, FilterState};

/// Builder for parsing, laying out and rendering discs.
///
/// # Examples
///
/// ```rust
/// use archedisk::{DiscBuilder, config::AppConfig};
///
/// let source = r#"{
///     "name": "Roadmap",
///     "start": "2025-01-01",
///     "end": "2025-12-31",
///     "rings": [{
///         "id": "r1",
///         "name": "Product",
///         "type": "normal",
///         "activities": [
///             { "id": "a1", "ringId": "r1", "title": "Launch", "start": "2025-03-01", "end": "2025-04-15" }
///         ]
///     }]
/// }"#;
///
/// let builder = DiscBuilder::new(AppConfig::default());
/// let disc = builder.parse_disc(source).expect("Failed to parse");
/// let layout = builder
///     .layout(&disc, &Default::default(), None, chrono::Utc::now())
///     .expect("Failed to lay out");
///
/// let svg = builder.render_svg(&layout, &disc).expect("Failed to render");
/// assert!(svg.contains("Roadmap"));
/// ```
#[derive(Default)]
pub struct DiscBuilder {
    config: AppConfig,
}

impl DiscBuilder {
    /// Create a new disc builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this builder lays out and renders with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a disc document from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ArchediskError::Json`] if `source` is not a valid disc
    /// document.
    pub fn parse_disc(&self, source: &str) -> Result<Disc, ArchediskError> {
        info!("Parsing disc");
        let disc: Disc =
            serde_json::from_str(source).map_err(|err| ArchediskError::new_json_error("disc", err))?;
        debug!(disc = disc.id, rings = disc.rings.len(); "Disc parsed successfully");
        trace!(disc:?; "Parsed disc");
        Ok(disc)
    }

    /// Parse a filter document from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ArchediskError::Json`] if `source` is not a valid filter
    /// document.
    pub fn parse_filter(&self, source: &str) -> Result<FilterState, ArchediskError> {
        let filter: FilterState = serde_json::from_str(source)
            .map_err(|err| ArchediskError::new_json_error("filter", err))?;
        debug!(filter:?; "Filter parsed successfully");
        Ok(filter)
    }

    /// Run one layout pass with this builder's configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ArchediskError::Layout`] for disc-wide range violations.
    pub fn layout(
        &self,
        disc: &Disc,
        filter: &FilterState,
        selected: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<LayoutResult, ArchediskError> {
        layout_disc_with_config(disc, filter, selected, now, &self.config).map_err(ArchediskError::from)
    }

    /// Render a finished layout of `disc` to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`ArchediskError::Export`] if a style color cannot be parsed.
    pub fn render_svg(&self, layout: &LayoutResult, disc: &Disc) -> Result<String, ArchediskError> {
        info!(rings = layout.ring_render_data().len(); "Rendering SVG");

        let exporter = export::svg::SvgBuilder::new()
            .with_style(self.config.style())
            .with_canvas_radius(self.config.labels().canvas_radius())
            .with_disc(disc)
            .build()?;

        let mut buffer = Vec::new();
        exporter.export_layout(layout, &mut buffer)?;
        let svg = String::from_utf8(buffer).map_err(export::Error::from)?;

        info!(bytes = svg.len(); "SVG rendered successfully");
        Ok(svg)
    }

    /// Serialize a finished layout to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ArchediskError::Json`] if serialization fails.
    pub fn to_json(&self, layout: &LayoutResult) -> Result<String, ArchediskError> {
        serde_json::to_string_pretty(layout).map_err(|err| ArchediskError::new_json_error("layout", err))
    }
}
