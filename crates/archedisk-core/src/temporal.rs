//! Date parsing and the date ⇄ angle mapping.
//!
//! A disc maps its time span onto one clockwise revolution that starts and
//! ends at the top of the circle:
//!
//! ```text
//!            start (-π/2) / end (3π/2)
//!                     │
//!                     ▼
//!                 .-""""-.
//!               /          \
//!    π (½ span) |     ●    | 0 (¼ span)
//!               \          /
//!                 '-....-'
//!                     ▲
//!                 π/2 (½ span)
//! ```
//!
//! Angles use the screen convention of [`crate::geometry`]: `0` points right
//! and angles grow clockwise because `y` grows downward.
//!
//! All timestamps are handled in UTC.

use std::f64::consts::{FRAC_PI_2, TAU};

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};

use crate::{error::LayoutError, model::TimeUnit};

const MS_PER_DAY: f64 = 86_400_000.0;

/// Tolerance used to treat an angle that overshoots a full turn by rounding
/// noise as exactly one full turn.
const FULL_TURN_EPSILON: f64 = 1e-9;

/// Parse a timestamp string.
///
/// Accepted forms are RFC 3339 (`2025-01-15T10:30:00.000Z`), a naive
/// date-time interpreted as UTC (`2025-01-15T10:30:00`), and a bare date
/// interpreted as midnight UTC (`2025-01-15`).
///
/// # Errors
///
/// Returns [`LayoutError::InvalidDate`] if none of the forms match.
///
/// # Examples
///
/// ```
/// # use archedisk_core::temporal::parse_timestamp;
/// let a = parse_timestamp("2025-01-15").unwrap();
/// let b = parse_timestamp("2025-01-15T00:00:00Z").unwrap();
/// assert_eq!(a, b);
/// assert!(parse_timestamp("next tuesday").is_err());
/// ```
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, LayoutError> {
    let trimmed = value.trim();

    if let Ok(date_time) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(date_time.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::default()).and_utc());
    }

    Err(LayoutError::invalid_date(
        value,
        "expected RFC 3339, `YYYY-MM-DDTHH:MM:SS` or `YYYY-MM-DD`",
    ))
}

/// A validated, non-empty time span: `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeSpan {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeSpan {
    /// Create a span.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidRange`] if `start >= end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, LayoutError> {
        if start >= end {
            return Err(LayoutError::invalid_range(
                "disc",
                start.to_rfc3339(),
                end.to_rfc3339(),
            ));
        }
        Ok(Self { start, end })
    }

    /// Parse both bounds and create a span.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidDate`] if a bound is unparseable, or
    /// [`LayoutError::InvalidRange`] if `start >= end`.
    pub fn parse(start: &str, end: &str) -> Result<Self, LayoutError> {
        let start_date = parse_timestamp(start)?;
        let end_date = parse_timestamp(end)?;
        if start_date >= end_date {
            return Err(LayoutError::invalid_range("disc", start, end));
        }
        Ok(Self {
            start: start_date,
            end: end_date,
        })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Span length in milliseconds.
    pub fn duration_ms(&self) -> i64 {
        (self.end - self.start).num_milliseconds()
    }

    /// Span length in fractional days.
    pub fn total_days(&self) -> f64 {
        self.duration_ms() as f64 / MS_PER_DAY
    }

    /// Returns `true` if `date` lies within the inclusive span.
    pub fn contains(&self, date: DateTime<Utc>) -> bool {
        date >= self.start && date <= self.end
    }

    /// Map a date to its angle.
    ///
    /// The span is linearly interpolated onto one clockwise turn starting at
    /// `-π/2`: the start maps to `-π/2`, the end to `3π/2`. Dates outside
    /// the span extrapolate linearly.
    pub fn date_to_angle(&self, date: DateTime<Utc>) -> f64 {
        let elapsed = (date - self.start).num_milliseconds() as f64;
        let fraction = elapsed / self.duration_ms() as f64;
        fraction * TAU - FRAC_PI_2
    }

    /// Map an angle back to a date, the inverse of [`TimeSpan::date_to_angle`].
    ///
    /// The angle is normalized into one turn measured from the top first, so
    /// any angle resolves to a date inside the span. An angle of exactly one
    /// full turn past the start resolves to the end rather than wrapping back
    /// to the start. The result is rounded to the millisecond.
    pub fn angle_to_date(&self, angle: f64) -> DateTime<Utc> {
        let mut turn = angle + FRAC_PI_2;
        if turn > TAU && turn - TAU < FULL_TURN_EPSILON {
            turn = TAU;
        }
        if !(0.0..=TAU).contains(&turn) {
            turn = turn.rem_euclid(TAU);
        }

        let offset = (turn / TAU * self.duration_ms() as f64).round();
        let offset = if offset.is_finite() { offset as i64 } else { 0 };
        self.start + TimeDelta::milliseconds(offset)
    }
}

/// Map a date string to its angle within the span `start..=end`.
///
/// # Errors
///
/// Returns [`LayoutError::InvalidDate`] if any input is unparseable, or
/// [`LayoutError::InvalidRange`] if `start >= end`.
///
/// # Examples
///
/// ```
/// # use std::f64::consts::FRAC_PI_2;
/// # use archedisk_core::temporal::date_to_angle;
/// let angle = date_to_angle("2025-01-01", "2025-01-01", "2025-12-31").unwrap();
/// assert!((angle + FRAC_PI_2).abs() < 1e-12);
/// ```
pub fn date_to_angle(date: &str, start: &str, end: &str) -> Result<f64, LayoutError> {
    let span = TimeSpan::parse(start, end)?;
    Ok(span.date_to_angle(parse_timestamp(date)?))
}

/// Map an angle back to a date within the span `start..=end`.
///
/// # Errors
///
/// Returns [`LayoutError::InvalidDate`] if a bound is unparseable, or
/// [`LayoutError::InvalidRange`] if `start >= end`.
pub fn angle_to_date(angle: f64, start: &str, end: &str) -> Result<DateTime<Utc>, LayoutError> {
    let span = TimeSpan::parse(start, end)?;
    Ok(span.angle_to_date(angle))
}

/// Advance `date` by one step of `unit`, keeping the time of day.
///
/// Month and quarter steps keep the day of month, clamped to the length of
/// the target month. Returns `None` on calendar overflow.
pub fn advance(date: DateTime<Utc>, unit: TimeUnit) -> Option<DateTime<Utc>> {
    match unit {
        TimeUnit::Day => date.checked_add_signed(TimeDelta::days(1)),
        TimeUnit::Week => date.checked_add_signed(TimeDelta::days(7)),
        TimeUnit::Month => date.checked_add_months(Months::new(1)),
        TimeUnit::Quarter => date.checked_add_months(Months::new(3)),
    }
}

/// Midnight UTC on the first day of the given month (1-based).
pub fn first_of_month(year: i32, month: u32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, 1).map(|date| date.and_time(NaiveTime::default()).and_utc())
}

/// Number of calendar days in the inclusive range, counting both ends.
///
/// # Errors
///
/// Returns [`LayoutError::InvalidRange`] if `start > end`.
///
/// # Examples
///
/// ```
/// # use archedisk_core::temporal::{days_in_range, parse_timestamp};
/// let start = parse_timestamp("2025-01-01").unwrap();
/// let end = parse_timestamp("2025-01-31").unwrap();
/// assert_eq!(days_in_range(start, end).unwrap(), 31);
/// assert_eq!(days_in_range(start, start).unwrap(), 1);
/// ```
pub fn days_in_range(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<i64, LayoutError> {
    if start > end {
        return Err(LayoutError::invalid_range(
            "date",
            start.to_rfc3339(),
            end.to_rfc3339(),
        ));
    }
    Ok((end - start).num_days() + 1)
}

/// Returns `true` if `date` lies within the inclusive range.
pub fn is_date_in_range(date: DateTime<Utc>, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    date >= start && date <= end
}

/// Snap a date to the start of its containing unit.
///
/// Day snaps to midnight, week to the Monday of its ISO week, month to the
/// first of the month and quarter to the first day of the quarter.
pub fn snap_to_time_unit(date: DateTime<Utc>, unit: TimeUnit) -> DateTime<Utc> {
    let day = date.date_naive();
    let snapped = match unit {
        TimeUnit::Day => Some(day),
        TimeUnit::Week => {
            let back = i64::from(day.weekday().num_days_from_monday());
            day.checked_sub_signed(TimeDelta::days(back))
        }
        TimeUnit::Month => day.with_day(1),
        TimeUnit::Quarter => {
            let quarter_month = (day.month0() / 3) * 3 + 1;
            NaiveDate::from_ymd_opt(day.year(), quarter_month, 1)
        }
    };
    snapped
        .unwrap_or(day)
        .and_time(NaiveTime::default())
        .and_utc()
}

/// Dates from `start` through `end` (inclusive) at `unit` resolution.
///
/// Day and week steps keep the time of day of `start`. Month and quarter
/// steps land on the first of each following month.
pub fn time_unit_ticks(start: DateTime<Utc>, end: DateTime<Utc>, unit: TimeUnit) -> Vec<DateTime<Utc>> {
    let mut ticks = Vec::new();
    let mut current = Some(start);

    while let Some(date) = current {
        if date > end {
            break;
        }
        ticks.push(date);
        current = match unit {
            TimeUnit::Day | TimeUnit::Week => advance(date, unit),
            TimeUnit::Month | TimeUnit::Quarter => {
                let step = if unit == TimeUnit::Month { 1 } else { 3 };
                let months = date.year() * 12 + date.month0() as i32 + step;
                first_of_month(months.div_euclid(12), months.rem_euclid(12) as u32 + 1)
            }
        };
    }

    ticks
}

/// Human label for a date at `unit` resolution.
///
/// # Examples
///
/// ```
/// # use archedisk_core::{model::TimeUnit, temporal::{parse_timestamp, time_unit_label}};
/// let date = parse_timestamp("2025-01-15T10:30:00Z").unwrap();
/// assert_eq!(time_unit_label(date, TimeUnit::Day), "Jan 15");
/// assert_eq!(time_unit_label(date, TimeUnit::Month), "Jan 2025");
/// assert_eq!(time_unit_label(date, TimeUnit::Quarter), "Q1 2025");
/// ```
pub fn time_unit_label(date: DateTime<Utc>, unit: TimeUnit) -> String {
    match unit {
        TimeUnit::Day | TimeUnit::Week => date.format("%b %d").to_string(),
        TimeUnit::Month => date.format("%b %Y").to_string(),
        TimeUnit::Quarter => format!("Q{} {}", date.month0() / 3 + 1, date.year()),
    }
}

/// Whole days between two instants, rounded up.
pub fn duration_days_ceil(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    ((end - start).num_milliseconds() as f64 / MS_PER_DAY).ceil() as i64
}
