//! SVG rendering of the parts of a laid-out disc.

use std::f64::consts::{FRAC_PI_2, PI};

use svg::{
    Node,
    node::{Text as SvgText, element as svg_element},
};

use archedisk_core::{
    color::Color,
    geometry::{ArcPath, ArcSegment, SectorPath, TickPath, arc_halves, polar_to_cartesian},
    model::RingType,
};

use super::{LayeredOutput, RenderLayer, Svg, fmt};
use crate::layout::{
    ActivityRenderData, LayoutResult, RingRenderData, labels::LabelDirective,
};

const RING_FILL: &str = "#f8fafc";
const RING_STROKE: &str = "#e2e8f0";
const THIN_RING_INNER_STROKE: &str = "#cbd5e1";
const TICK_LABEL_FILL: &str = "#4b5563";
const LABEL_FILL: &str = "#ffffff";
const SELECTED_STROKE: &str = "#111827";
const CENTER_FILL: &str = "#1f2937";
const CENTER_STROKE: &str = "#374151";
const CENTER_SUBTITLE_FILL: &str = "#d1d5db";

/// Distance of outer tick labels beyond the outermost ring.
const TICK_LABEL_OFFSET: f64 = 20.0;

impl Svg {
    /// Dashed spokes from the centre to the rim, labelled midway to the next tick.
    pub fn render_outer_ticks(&self, layout: &LayoutResult) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let ticks = layout.outer_ticks();
        let max_radius = layout.max_radius();
        let average_step = match (ticks.first(), ticks.last()) {
            (Some(first), Some(last)) if ticks.len() > 1 => {
                (last.angle() - first.angle()) / (ticks.len() - 1) as f64
            }
            _ => 0.0,
        };

        for (index, tick) in ticks.iter().enumerate() {
            let (stroke, width) = if tick.is_current() {
                (self.current_tick_color, 2.0)
            } else {
                (self.tick_color, 1.0)
            };
            let spoke = TickPath::radial(tick.angle(), 0.0, max_radius);
            output.add_to_layer(
                RenderLayer::Axis,
                Box::new(
                    svg_element::Line::new()
                        .set("x1", fmt(spoke.from().x()))
                        .set("y1", fmt(spoke.from().y()))
                        .set("x2", fmt(spoke.to().x()))
                        .set("y2", fmt(spoke.to().y()))
                        .set("stroke", stroke)
                        .set("stroke-width", width)
                        .set("stroke-dasharray", "2,2"),
                ),
            );

            let next_angle = ticks
                .get(index + 1)
                .map_or(tick.angle() + average_step, |next| next.angle());
            let anchor = polar_to_cartesian(
                (tick.angle() + next_angle) / 2.0,
                max_radius + TICK_LABEL_OFFSET,
            );
            let (fill, weight) = if tick.is_current() {
                (self.current_tick_color.to_string(), "bold")
            } else {
                (TICK_LABEL_FILL.to_string(), "500")
            };
            output.add_to_layer(
                RenderLayer::Axis,
                Box::new(
                    svg_element::Text::new("")
                        .set("x", fmt(anchor.x()))
                        .set("y", fmt(anchor.y()))
                        .set("text-anchor", "middle")
                        .set("dominant-baseline", "middle")
                        .set("font-size", 12)
                        .set("font-weight", weight)
                        .set("fill", fill)
                        .add(SvgText::new(tick.label())),
                ),
            );
        }

        output
    }

    /// A ring's band and its sub-ticks.
    pub fn render_ring_band(&self, ring: &RingRenderData) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let ring_color = ring.color().and_then(|color| Color::new(color).ok());

        match ring.ring_type() {
            RingType::Thin => {
                let (outer, inner) = (ring.outer_radius(), ring.inner_radius());
                let data = format!(
                    "{} Z {} Z",
                    self.circle_path_data(outer, true),
                    self.circle_path_data(inner, false)
                );
                let mut donut = svg_element::Path::new()
                    .set("d", data)
                    .set("fill-rule", "evenodd")
                    .set("stroke-width", 0.5)
                    .set("data-ring", ring.ring_id());
                donut = match ring_color {
                    Some(color) => donut
                        .set("fill", color)
                        .set("fill-opacity", 0.125)
                        .set("stroke", color),
                    None => donut.set("fill", RING_FILL).set("stroke", self.default_color),
                };
                output.add_to_layer(RenderLayer::Ring, Box::new(donut));

                let outer_stroke = ring_color.unwrap_or(self.default_color).to_string();
                let inner_stroke = ring_color.map_or(THIN_RING_INNER_STROKE.to_string(), |color| {
                    color.with_alpha(0.375).to_string()
                });
                for (radius, stroke) in [(outer, outer_stroke), (inner, inner_stroke)] {
                    output.add_to_layer(
                        RenderLayer::Ring,
                        Box::new(
                            svg_element::Circle::new()
                                .set("r", fmt(radius))
                                .set("fill", "none")
                                .set("stroke", stroke)
                                .set("stroke-width", 2)
                                .set("opacity", 0.3),
                        ),
                    );
                }
            }
            RingType::Normal => {
                let mut band = svg_element::Circle::new()
                    .set("r", fmt(ring.outer_radius()))
                    .set("stroke-width", 2)
                    .set("opacity", 0.5)
                    .set("data-ring", ring.ring_id());
                band = match ring_color {
                    Some(color) => band
                        .set("fill", color)
                        .set("fill-opacity", 0.0625)
                        .set("stroke", color),
                    None => band.set("fill", RING_FILL).set("stroke", RING_STROKE),
                };
                output.add_to_layer(RenderLayer::Ring, Box::new(band));
            }
        }

        let tick_stroke = ring_color.unwrap_or(self.tick_color);
        for tick in ring.ticks() {
            let line = TickPath::radial(tick.angle(), ring.inner_radius(), ring.outer_radius());
            output.add_to_layer(
                RenderLayer::Grid,
                Box::new(
                    svg_element::Line::new()
                        .set("x1", fmt(line.from().x()))
                        .set("y1", fmt(line.from().y()))
                        .set("x2", fmt(line.to().x()))
                        .set("y2", fmt(line.to().y()))
                        .set("stroke", tick_stroke)
                        .set("stroke-width", 1)
                        .set("stroke-opacity", 0.3),
                ),
            );
        }

        output
    }

    /// Sectors, borders and titles of a ring's visible activities.
    pub fn render_ring_activities(&self, ring_index: usize, ring: &RingRenderData) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let ring_color = Color::resolve([ring.color()], self.default_color);

        for (index, activity) in ring
            .activities()
            .iter()
            .enumerate()
            .filter(|(_, activity)| activity.is_visible())
        {
            let arc = activity.arc_segment();
            let fill = Color::resolve([activity.activity().color.as_deref(), ring.color()], self.default_color);

            let mut sector = svg_element::Path::new()
                .set("d", self.sector_path_data(arc))
                .set("fill", fill)
                .set("data-activity", activity.activity().id.as_str());
            sector = if activity.is_selected() {
                sector.set("stroke", SELECTED_STROKE).set("stroke-width", 2)
            } else {
                sector.set("stroke", "none")
            };
            output.add_to_layer(RenderLayer::Activity, Box::new(sector));

            // The rim border takes the ring color only where the activity
            // reaches the ring's outer edge.
            let border = if arc.outer_radius() == ring.outer_radius() {
                ring_color
            } else {
                fill
            };
            output.add_to_layer(
                RenderLayer::Activity,
                Box::new(
                    svg_element::Path::new()
                        .set("d", self.open_arc_path_data(arc.start_angle(), arc.end_angle(), arc.outer_radius()))
                        .set("fill", "none")
                        .set("stroke", border)
                        .set("stroke-width", 2),
                ),
            );

            let id = format!("label-{ring_index}-{index}");
            output.merge(self.render_label(&id, activity));
        }

        output
    }

    fn render_label(&self, id: &str, activity: &ActivityRenderData) -> LayeredOutput {
        let mut output = LayeredOutput::new();

        match activity.label() {
            LabelDirective::Hidden { .. } => {}
            LabelDirective::Curved {
                text,
                path,
                flipped,
                font_size,
            } => {
                let data = if path.large_arc() {
                    let arc = activity.arc_segment();
                    self.open_arc_path_data(arc.start_angle(), arc.end_angle(), path.radius())
                } else {
                    self.single_arc_path_data(path)
                };
                output.add_to_layer(
                    RenderLayer::Text,
                    Box::new(
                        svg_element::Path::new()
                            .set("id", id)
                            .set("d", data)
                            .set("fill", "none")
                            .set("stroke", "none"),
                    ),
                );

                let mut text_path = svg_element::Element::new("textPath");
                text_path.assign("href", format!("#{id}"));
                text_path.assign("startOffset", "50%");
                text_path.assign("dominant-baseline", if *flipped { "hanging" } else { "middle" });
                text_path.append(SvgText::new(text.as_str()));

                output.add_to_layer(
                    RenderLayer::Text,
                    Box::new(
                        svg_element::Text::new("")
                            .set("dy", if *flipped { -2 } else { 4 })
                            .set("fill", LABEL_FILL)
                            .set("font-size", *font_size)
                            .set("font-weight", "bold")
                            .set("text-anchor", "middle")
                            .add(text_path),
                    ),
                );
            }
            LabelDirective::Radial {
                text,
                anchor,
                rotation,
                font_size,
                ..
            } => {
                let (x, y) = (fmt(anchor.x()), fmt(anchor.y()));
                output.add_to_layer(
                    RenderLayer::Text,
                    Box::new(
                        svg_element::Text::new("")
                            .set("x", x.as_str())
                            .set("y", y.as_str())
                            .set("fill", LABEL_FILL)
                            .set("font-size", *font_size)
                            .set("font-weight", "bold")
                            .set("text-anchor", "middle")
                            .set("dominant-baseline", "middle")
                            .set("transform", format!("rotate({}, {x}, {y})", fmt(*rotation)))
                            .add(SvgText::new(text.as_str())),
                    ),
                );
            }
        }

        output
    }

    /// The dark centre disc with the disc name and its years.
    pub fn render_center(&self, center_radius: f64) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        output.add_to_layer(
            RenderLayer::Center,
            Box::new(
                svg_element::Circle::new()
                    .set("r", fmt(center_radius))
                    .set("fill", CENTER_FILL)
                    .set("stroke", CENTER_STROKE)
                    .set("stroke-width", 2),
            ),
        );
        output.add_to_layer(
            RenderLayer::Center,
            Box::new(
                svg_element::Text::new("")
                    .set("y", -5)
                    .set("text-anchor", "middle")
                    .set("font-size", 12)
                    .set("font-weight", "bold")
                    .set("fill", LABEL_FILL)
                    .add(SvgText::new(self.title.as_str())),
            ),
        );
        output.add_to_layer(
            RenderLayer::Center,
            Box::new(
                svg_element::Text::new("")
                    .set("y", 15)
                    .set("text-anchor", "middle")
                    .set("font-size", 10)
                    .set("fill", CENTER_SUBTITLE_FILL)
                    .add(SvgText::new(self.subtitle.as_str())),
            ),
        );
        output
    }

    /// Closed outline of an annular sector.
    ///
    /// Sweeps past half a turn are traced as two halves so that a full-turn
    /// activity, whose start and end points coincide, is still drawn.
    fn sector_path_data(&self, arc: &ArcSegment) -> String {
        let sector = SectorPath::from_arc(arc);
        if !sector.large_arc() {
            return format!(
                "{} {} L {} {} {} Z",
                self.move_to(sector.outer()),
                self.arc_path_data(sector.outer()),
                fmt(sector.inner().start().x()),
                fmt(sector.inner().start().y()),
                self.arc_path_data(sector.inner()),
            );
        }

        let [outer_first, outer_second] =
            arc_halves(arc.start_angle(), arc.end_angle(), arc.outer_radius());
        let [inner_first, inner_second] =
            arc_halves(arc.end_angle(), arc.start_angle(), arc.inner_radius());
        format!(
            "{} {} {} L {} {} {} {} Z",
            self.move_to(&outer_first),
            self.arc_path_data(&outer_first),
            self.arc_path_data(&outer_second),
            fmt(inner_first.start().x()),
            fmt(inner_first.start().y()),
            self.arc_path_data(&inner_first),
            self.arc_path_data(&inner_second),
        )
    }

    fn open_arc_path_data(&self, start_angle: f64, end_angle: f64, radius: f64) -> String {
        let path = ArcPath::new(start_angle, end_angle, radius);
        if !path.large_arc() {
            return self.single_arc_path_data(&path);
        }
        let [first, second] = arc_halves(start_angle, end_angle, radius);
        format!(
            "{} {} {}",
            self.move_to(&first),
            self.arc_path_data(&first),
            self.arc_path_data(&second)
        )
    }

    fn single_arc_path_data(&self, path: &ArcPath) -> String {
        format!("{} {}", self.move_to(path), self.arc_path_data(path))
    }

    /// A full circle from the top, clockwise or counter-clockwise.
    fn circle_path_data(&self, radius: f64, clockwise: bool) -> String {
        let (start, end) = if clockwise {
            (-FRAC_PI_2, 3.0 * FRAC_PI_2)
        } else {
            (3.0 * FRAC_PI_2, -FRAC_PI_2)
        };
        debug_assert!((end - start).abs() > PI);
        self.open_arc_path_data(start, end, radius)
    }

    fn move_to(&self, path: &ArcPath) -> String {
        format!("M {} {}", fmt(path.start().x()), fmt(path.start().y()))
    }
}
