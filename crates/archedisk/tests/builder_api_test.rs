//! Integration tests for the DiscBuilder API

use archedisk::{ArchediskError, DiscBuilder, config::AppConfig, model::FilterState};

const ROADMAP: &str = r##"{
    "id": "d1",
    "name": "Roadmap",
    "start": "2025-09-01",
    "end": "2026-08-31",
    "defaultTimeUnit": "month",
    "rings": [
        {
            "id": "product",
            "name": "Product",
            "type": "normal",
            "color": "#10b981",
            "activities": [
                { "id": "a1", "ringId": "product", "title": "Discovery", "start": "2025-09-15", "end": "2025-12-20" },
                { "id": "a2", "ringId": "product", "title": "Beta", "start": "2026-01-10", "end": "2026-01-18" }
            ]
        },
        {
            "id": "ops",
            "name": "Operations",
            "type": "normal",
            "timeUnit": "quarter",
            "activities": [
                { "id": "o1", "ringId": "ops", "title": "Audit", "start": "2026-03-01", "end": "2026-04-30", "labelIds": ["l1"] }
            ]
        },
        {
            "id": "markers",
            "name": "Markers",
            "type": "thin",
            "activities": [
                { "id": "m1", "ringId": "markers", "title": "Board meeting", "start": "2026-02-02" }
            ]
        }
    ],
    "labels": [{ "id": "l1", "name": "Compliance", "color": "#ef4444" }]
}"##;

fn now() -> chrono::DateTime<chrono::Utc> {
    archedisk::temporal::parse_timestamp("2025-10-10").unwrap()
}

#[test]
fn test_builder_api_exists() {
    let _builder = DiscBuilder::default();
}

#[test]
fn test_parse_disc_document() {
    let builder = DiscBuilder::default();
    let disc = builder.parse_disc(ROADMAP).expect("Failed to parse disc");

    assert_eq!(disc.name, "Roadmap");
    assert_eq!(disc.rings.len(), 3);
    assert_eq!(disc.rings[2].ring_type, "thin");
    assert_eq!(disc.rings[1].activities[0].label_ids, vec!["l1".to_string()]);
}

#[test]
fn test_parse_invalid_document_returns_error() {
    let builder = DiscBuilder::default();
    let result = builder.parse_disc(r#"{ "name": "missing bounds" }"#);
    assert!(matches!(result, Err(ArchediskError::Json { what: "disc", .. })));
}

#[test]
fn test_parse_filter_document() {
    let builder = DiscBuilder::default();
    let filter = builder
        .parse_filter(r#"{ "ringIds": ["ops"], "textSearch": "audit" }"#)
        .expect("Failed to parse filter");
    assert_eq!(filter.ring_ids, vec!["ops".to_string()]);
    assert!(filter.label_ids.is_empty());

    let layout = builder
        .layout(&builder.parse_disc(ROADMAP).unwrap(), &filter, None, now())
        .expect("Failed to lay out");
    assert_eq!(layout.ring_render_data().len(), 1);
    assert_eq!(layout.ring_render_data()[0].ring_id(), "ops");
}

#[test]
fn test_render_svg() {
    let builder = DiscBuilder::default();
    let disc = builder.parse_disc(ROADMAP).unwrap();
    let layout = builder
        .layout(&disc, &FilterState::default(), Some("a1"), now())
        .unwrap();

    let svg = builder.render_svg(&layout, &disc).expect("Failed to render");
    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    assert!(svg.contains("Roadmap"));
    assert!(svg.contains("2025/26"));
    assert!(svg.contains(r#"data-activity="a1""#));
    assert!(svg.contains("textPath"));
    for layer in ["axis", "ring", "grid", "activity", "text", "center"] {
        assert!(
            svg.contains(&format!(r#"data-layer="{layer}""#)),
            "missing layer {layer}"
        );
    }
}

#[test]
fn test_layout_json_uses_camel_case() {
    let builder = DiscBuilder::default();
    let disc = builder.parse_disc(ROADMAP).unwrap();
    let layout = builder.layout(&disc, &FilterState::default(), None, now()).unwrap();

    let json = builder.to_json(&layout).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(value["ringRenderData"].is_array());
    assert_eq!(value["ringRenderData"][0]["ringId"], "product");
    assert!(value["ringRenderData"][0]["activities"][0]["arcSegment"]["startAngle"].is_number());
    assert_eq!(value["outerTicks"].as_array().unwrap().len(), 12);
}

#[test]
fn test_invalid_style_color_is_an_export_error() {
    let config: AppConfig =
        serde_json::from_str(r#"{ "style": { "default_color": "not-a-color" } }"#).unwrap();
    let builder = DiscBuilder::new(config);
    let disc = builder.parse_disc(ROADMAP).unwrap();
    let layout = builder.layout(&disc, &FilterState::default(), None, now()).unwrap();

    let result = builder.render_svg(&layout, &disc);
    assert!(matches!(result, Err(ArchediskError::Export(_))));
}

#[test]
fn test_builder_reusability() {
    let builder = DiscBuilder::default();
    let disc = builder.parse_disc(ROADMAP).unwrap();

    let first = builder.layout(&disc, &FilterState::default(), None, now()).unwrap();
    let second = builder.layout(&disc, &FilterState::default(), None, now()).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        builder.render_svg(&first, &disc).unwrap(),
        builder.render_svg(&second, &disc).unwrap()
    );
}
