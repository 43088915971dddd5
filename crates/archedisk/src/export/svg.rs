use std::io::Write;

use log::{debug, error, info};
use svg::Document;

use archedisk_core::{
    color::Color,
    geometry::ArcPath,
    model::Disc,
    temporal::parse_timestamp,
};

use crate::{config::StyleConfig, export, layout::LayoutResult};

mod disc;
mod layer;

pub use layer::{LayeredOutput, RenderLayer};

const DEFAULT_CANVAS_RADIUS: f64 = 400.0;

/// SVG exporter for laid-out discs.
///
/// Built by [`SvgBuilder`]; the style colors are parsed once up front.
#[derive(Debug, Clone)]
pub struct Svg {
    canvas_radius: f64,
    background_color: Option<Color>,
    default_color: Color,
    tick_color: Color,
    current_tick_color: Color,
    title: String,
    subtitle: String,
}

impl Svg {
    /// Render `layout` into a complete document.
    pub fn render_document(&self, layout: &LayoutResult) -> Document {
        let size = self.canvas_radius * 2.0;
        let mut output = LayeredOutput::new();

        if let Some(background) = self.background_color {
            output.add_to_layer(
                RenderLayer::Background,
                Box::new(
                    svg::node::element::Rectangle::new()
                        .set("x", -self.canvas_radius)
                        .set("y", -self.canvas_radius)
                        .set("width", size)
                        .set("height", size)
                        .set("fill", background),
                ),
            );
        }
        output.merge(self.render_outer_ticks(layout));
        for ring in layout.ring_render_data().iter().rev() {
            output.merge(self.render_ring_band(ring));
        }
        for (index, ring) in layout.ring_render_data().iter().enumerate() {
            output.merge(self.render_ring_activities(index, ring));
        }
        output.merge(self.render_center(layout.center_radius()));

        let mut content = svg::node::element::Group::new().set(
            "transform",
            format!("translate({},{})", self.canvas_radius, self.canvas_radius),
        );
        for node in output.render() {
            content = content.add(node);
        }

        Document::new()
            .set("width", size)
            .set("height", size)
            .set("viewBox", format!("0 0 {size} {size}"))
            .add(content)
    }

    /// Path data continuing the current point along `arc`.
    pub fn arc_path_data(&self, arc: &ArcPath) -> String {
        format!(
            "A {r} {r} 0 {} {} {} {}",
            u8::from(arc.large_arc()),
            arc.sweep().flag(),
            fmt(arc.end().x()),
            fmt(arc.end().y()),
            r = fmt(arc.radius()),
        )
    }

    /// Writes an SVG document to `writer`.
    pub fn write_document(&self, doc: Document, writer: &mut dyn Write) -> Result<(), export::Error> {
        if let Err(err) = write!(writer, "{doc}") {
            error!(err:err; "Failed to write SVG content");
            return Err(export::Error::Io(err));
        }
        Ok(())
    }
}

impl export::Exporter for Svg {
    fn export_layout(&self, layout: &LayoutResult, writer: &mut dyn Write) -> Result<(), export::Error> {
        let doc = self.render_document(layout);
        debug!("SVG document rendered");

        self.write_document(doc, writer)
    }
}

/// Builder for [`Svg`].
#[derive(Debug, Default)]
pub struct SvgBuilder<'a> {
    style: Option<&'a StyleConfig>,
    canvas_radius: Option<f64>,
    title: String,
    subtitle: String,
}

impl<'a> SvgBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, style: &'a StyleConfig) -> Self {
        self.style = Some(style);
        self
    }

    /// Half the canvas size; the disc is centred on the canvas.
    pub fn with_canvas_radius(mut self, radius: f64) -> Self {
        self.canvas_radius = Some(radius);
        self
    }

    /// Caption the centre disc with the disc's name and years.
    pub fn with_disc(mut self, disc: &Disc) -> Self {
        self.title = disc.name.clone();
        self.subtitle = year_label(&disc.start, &disc.end);
        self
    }

    /// Parse the style and produce the exporter.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Style`] if a style color cannot be parsed, or
    /// [`export::Error::Canvas`] if the canvas radius is not positive.
    pub fn build(self) -> Result<Svg, export::Error> {
        let default_style = StyleConfig::default();
        let style = self.style.unwrap_or(&default_style);
        let canvas_radius = self.canvas_radius.unwrap_or(DEFAULT_CANVAS_RADIUS);
        if !(canvas_radius.is_finite() && canvas_radius > 0.0) {
            return Err(export::Error::Canvas(canvas_radius));
        }

        let svg = Svg {
            canvas_radius,
            background_color: style.background_color().map_err(export::Error::Style)?,
            default_color: style.default_color().map_err(export::Error::Style)?,
            tick_color: style.tick_color().map_err(export::Error::Style)?,
            current_tick_color: style.current_tick_color().map_err(export::Error::Style)?,
            title: self.title,
            subtitle: self.subtitle,
        };
        info!(canvas_radius = svg.canvas_radius, title = svg.title; "SVG exporter ready");
        Ok(svg)
    }
}

/// `2025` for a disc within one year, `2025/26` across years.
fn year_label(start: &str, end: &str) -> String {
    use chrono::Datelike;

    match (parse_timestamp(start), parse_timestamp(end)) {
        (Ok(start), Ok(end)) if start.year() == end.year() => start.year().to_string(),
        (Ok(start), Ok(end)) => format!("{}/{:02}", start.year(), end.year().rem_euclid(100)),
        _ => String::new(),
    }
}

/// Coordinates with two decimals, without a negative zero.
fn fmt(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        rounded.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_label() {
        assert_eq!(year_label("2025-01-01", "2025-12-31"), "2025");
        assert_eq!(year_label("2025-09-01", "2026-08-31"), "2025/26");
        assert_eq!(year_label("2099-09-01", "2100-08-31"), "2099/00");
        assert_eq!(year_label("soon", "2025-12-31"), "");
    }

    #[test]
    fn test_fmt() {
        assert_eq!(fmt(1.0e-14), "0");
        assert_eq!(fmt(-1.0e-14), "0");
        assert_eq!(fmt(319.999), "320");
        assert_eq!(fmt(-12.3456), "-12.35");
    }

    #[test]
    fn test_build_rejects_bad_canvas() {
        let result = SvgBuilder::new().with_canvas_radius(0.0).build();
        assert!(matches!(result, Err(export::Error::Canvas(_))));
    }

    #[test]
    fn test_arc_path_data() {
        let svg = SvgBuilder::new().build().unwrap();
        let arc = ArcPath::new(-std::f64::consts::FRAC_PI_2, 0.0, 100.0);
        assert_eq!(svg.arc_path_data(&arc), "A 100 100 0 0 1 100 0");

        let back = ArcPath::new(0.0, -std::f64::consts::FRAC_PI_2, 80.0);
        assert_eq!(svg.arc_path_data(&back), "A 80 80 0 0 0 0 -80");
    }
}
