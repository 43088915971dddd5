//! The disc document as supplied by the persistence layer.
//!
//! These are plain data types mirroring the stored JSON shape (camelCase
//! field names, ring `type` as a free-form string). The layout engine only
//! reads them; it never mutates a [`Disc`].
//!
//! Dates are kept as the strings the document carries. They are parsed by
//! [`crate::temporal::parse_timestamp`] during layout so that a single
//! malformed record can be reported and skipped instead of rejecting the
//! whole document at load time.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Calendar granularity used for ring sub-ticks and labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Day,
    Week,
    #[default]
    Month,
    Quarter,
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeUnit::Day => "day",
            TimeUnit::Week => "week",
            TimeUnit::Month => "month",
            TimeUnit::Quarter => "quarter",
        };
        f.write_str(name)
    }
}

/// The closed set of ring kinds the layout understands.
///
/// Documents carry the ring type as a string; [`RingType::parse`] maps it to
/// this enum and callers normalize anything unrecognized to
/// [`RingType::Normal`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RingType {
    /// Evenly divides the space between the centre and the thin rings.
    #[default]
    Normal,
    /// Fixed-height marker ring stacked at the rim.
    Thin,
}

impl RingType {
    /// Parse a ring type tag. Returns `None` for unrecognized tags.
    ///
    /// # Examples
    ///
    /// ```
    /// # use archedisk_core::model::RingType;
    /// assert_eq!(RingType::parse("thin"), Some(RingType::Thin));
    /// assert_eq!(RingType::parse("wide"), None);
    /// ```
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "normal" => Some(RingType::Normal),
            "thin" => Some(RingType::Thin),
            _ => None,
        }
    }

    /// Returns `true` for thin rings.
    pub fn is_thin(self) -> bool {
        matches!(self, RingType::Thin)
    }
}

impl fmt::Display for RingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RingType::Normal => f.write_str("normal"),
            RingType::Thin => f.write_str("thin"),
        }
    }
}

fn default_ring_type() -> String {
    RingType::Normal.to_string()
}

/// A named, colored tag that activities can carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// A time-bounded item drawn as an arc within its ring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub ring_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Start timestamp.
    pub start: String,
    /// Inclusive end timestamp; treated as `start` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub label_ids: Vec<String>,
}

impl Activity {
    /// Create an activity that starts (and ends) at `start`.
    pub fn new(
        id: impl Into<String>,
        ring_id: impl Into<String>,
        title: impl Into<String>,
        start: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            ring_id: ring_id.into(),
            title: title.into(),
            description: None,
            start: start.into(),
            end: None,
            color: None,
            label_ids: Vec::new(),
        }
    }

    /// Set the inclusive end timestamp.
    pub fn with_end(mut self, end: impl Into<String>) -> Self {
        self.end = Some(end.into());
        self
    }

    /// Set the activity color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Attach a label id.
    pub fn with_label(mut self, label_id: impl Into<String>) -> Self {
        self.label_ids.push(label_id.into());
        self
    }

    /// The end timestamp string, defaulting to the start.
    pub fn end_or_start(&self) -> &str {
        self.end.as_deref().unwrap_or(&self.start)
    }
}

/// A concentric band of the disc holding activities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ring {
    pub id: String,
    pub name: String,
    /// Raw ring type tag as stored. See [`RingType::parse`].
    #[serde(rename = "type", default = "default_ring_type")]
    pub ring_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Overrides the disc's default time unit for this ring's sub-ticks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_unit: Option<TimeUnit>,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

impl Ring {
    /// Create an empty ring of the given type tag.
    pub fn new(id: impl Into<String>, name: impl Into<String>, ring_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ring_type: ring_type.into(),
            color: None,
            time_unit: None,
            activities: Vec::new(),
        }
    }

    /// Set the ring color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Override the time unit for this ring.
    pub fn with_time_unit(mut self, time_unit: TimeUnit) -> Self {
        self.time_unit = Some(time_unit);
        self
    }

    /// Append an activity.
    pub fn with_activity(mut self, activity: Activity) -> Self {
        self.activities.push(activity);
        self
    }

    /// The time unit in effect for this ring.
    pub fn effective_time_unit(&self, disc_default: TimeUnit) -> TimeUnit {
        self.time_unit.unwrap_or(disc_default)
    }
}

/// The top-level time-bounded container being visualized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Disc {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Start timestamp; must be strictly before `end`.
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub default_time_unit: TimeUnit,
    #[serde(default)]
    pub rings: Vec<Ring>,
    #[serde(default)]
    pub labels: Vec<Label>,
}

impl Disc {
    /// Create an empty disc spanning `start..=end`.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            start: start.into(),
            end: end.into(),
            default_time_unit: TimeUnit::default(),
            rings: Vec::new(),
            labels: Vec::new(),
        }
    }

    /// Set the disc name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the default time unit.
    pub fn with_default_time_unit(mut self, time_unit: TimeUnit) -> Self {
        self.default_time_unit = time_unit;
        self
    }

    /// Append a ring.
    pub fn with_ring(mut self, ring: Ring) -> Self {
        self.rings.push(ring);
        self
    }

    /// Append a label.
    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.push(label);
        self
    }

    /// Find a ring by id.
    pub fn ring(&self, id: &str) -> Option<&Ring> {
        self.rings.iter().find(|ring| ring.id == id)
    }
}

/// Inclusive date-range bound of a [`FilterState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// Caller-owned view filters applied before layout.
///
/// Empty lists and an empty search string mean "no filtering" on that axis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    /// Rings to show. Empty shows every ring.
    pub ring_ids: Vec<String>,
    /// Activities must carry at least one of these labels. Empty disables the check.
    pub label_ids: Vec<String>,
    /// Case-insensitive substring of the activity title.
    pub text_search: String,
    /// Activities must intersect this inclusive range.
    pub date_range: Option<DateRange>,
    /// Custom ring display order. Listed rings come first, in this order.
    pub ring_order: Vec<String>,
}

impl FilterState {
    /// Returns `true` when no filter axis is active.
    pub fn is_empty(&self) -> bool {
        self.ring_ids.is_empty()
            && self.label_ids.is_empty()
            && self.text_search.is_empty()
            && self.date_range.is_none()
    }
}
