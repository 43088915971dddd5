//! Colors of rings, activities and labels.
//!
//! Disc documents carry colors as free-form CSS strings. They stay strings in
//! the model and are parsed into [`Color`] only when a renderer needs them,
//! so one bad value never fails a layout.

use std::{fmt, str::FromStr};

use color::DynamicColor;

/// A parsed CSS color.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Parse a CSS color string such as `#3b82f6`, `rgb(16 185 129)` or `teal`.
    ///
    /// # Errors
    ///
    /// Returns a message naming the rejected string.
    pub fn new(color_str: &str) -> Result<Self, String> {
        DynamicColor::from_str(color_str)
            .map(|color| Self { color })
            .map_err(|err| format!("invalid color `{color_str}`: {err}"))
    }

    /// Resolve the first parseable color in `candidates`, falling back to `fallback`.
    ///
    /// Activities inherit their ring's color, which in turn falls back to a
    /// style default; unparseable entries are skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use archedisk_core::color::Color;
    ///
    /// let fallback = Color::new("#3b82f6").unwrap();
    /// let resolved = Color::resolve([None, Some("not-a-color"), Some("red")], fallback);
    /// assert_eq!(resolved, Color::new("red").unwrap());
    /// ```
    pub fn resolve<'a>(
        candidates: impl IntoIterator<Item = Option<&'a str>>,
        fallback: Color,
    ) -> Color {
        candidates
            .into_iter()
            .flatten()
            .find_map(|candidate| Color::new(candidate).ok())
            .unwrap_or(fallback)
    }

    /// The same color at opacity `alpha`.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            color: self.color.with_alpha(alpha),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<Color> for svg::node::Value {
    fn from(color: Color) -> Self {
        Self::from(color.to_string())
    }
}
