//! Tick generation for the outer disc axis and per-ring sub-axes.

use chrono::{DateTime, Datelike, Months, TimeDelta, Utc};
use log::debug;
use serde::Serialize;

use archedisk_core::{
    model::TimeUnit,
    temporal::{TimeSpan, first_of_month, time_unit_label},
};

/// Discs spanning at most this many days get daily outer ticks.
const DAILY_MAX_DAYS: f64 = 32.0;
/// Discs spanning at most this many days get weekly outer ticks.
const WEEKLY_MAX_DAYS: f64 = 100.0;
/// Monthly outer ticks never exceed a year.
const MAX_MONTH_TICKS: i32 = 12;

/// Resolution of the outer axis, chosen from the disc's total span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TickResolution {
    Daily,
    Weekly,
    Monthly,
}

impl TickResolution {
    /// Pick the resolution for a span of `total_days`.
    pub fn for_span(total_days: f64) -> Self {
        if total_days <= DAILY_MAX_DAYS {
            TickResolution::Daily
        } else if total_days <= WEEKLY_MAX_DAYS {
            TickResolution::Weekly
        } else {
            TickResolution::Monthly
        }
    }
}

/// A labelled marker on the outer disc axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tick {
    date: DateTime<Utc>,
    angle: f64,
    label: String,
    is_current: bool,
}

impl Tick {
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// `true` when the tick's period contains the reference instant.
    pub fn is_current(&self) -> bool {
        self.is_current
    }
}

/// A marker on a ring's own sub-axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RingTick {
    date: DateTime<Utc>,
    angle: f64,
    label: String,
}

impl RingTick {
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Generate the outer axis ticks of a disc.
///
/// - Up to 32 days: one tick per day, labelled with the day of month.
/// - Up to 100 days: one tick per week from the start, labelled `Jan 5`.
/// - Longer: one tick on the first of each month from the start month,
///   labelled `Jan`, at most twelve.
///
/// `now` marks the tick whose period contains it as current: same day,
/// within the seven days following a weekly tick, or same month and year.
pub fn outer_ticks(span: &TimeSpan, now: DateTime<Utc>) -> Vec<Tick> {
    let resolution = TickResolution::for_span(span.total_days());
    let ticks: Vec<Tick> = match resolution {
        TickResolution::Daily => stepped(span, TimeDelta::days(1))
            .map(|date| Tick {
                date,
                angle: span.date_to_angle(date),
                label: date.day().to_string(),
                is_current: date.date_naive() == now.date_naive(),
            })
            .collect(),
        TickResolution::Weekly => stepped(span, TimeDelta::days(7))
            .map(|date| {
                let elapsed = now - date;
                Tick {
                    date,
                    angle: span.date_to_angle(date),
                    label: date.format("%b %-d").to_string(),
                    is_current: elapsed >= TimeDelta::zero() && elapsed < TimeDelta::days(7),
                }
            })
            .collect(),
        TickResolution::Monthly => {
            let (start, end) = (span.start(), span.end());
            let month_diff = (end.year() - start.year()) * 12 + end.month() as i32
                - start.month() as i32
                + 1;
            (0..month_diff.min(MAX_MONTH_TICKS))
                .filter_map(|offset| {
                    let months = start.year() * 12 + start.month0() as i32 + offset;
                    first_of_month(months.div_euclid(12), months.rem_euclid(12) as u32 + 1)
                })
                .map(|date| Tick {
                    date,
                    angle: span.date_to_angle(date),
                    label: date.format("%b").to_string(),
                    is_current: date.year() == now.year() && date.month() == now.month(),
                })
                .collect()
        }
    };

    debug!(resolution:?, ticks = ticks.len(); "Outer ticks generated");
    ticks
}

/// Generate a ring's sub-axis ticks for its effective time unit.
///
/// Steps from the disc start through the disc end (inclusive) by one day,
/// seven days or three months. Quarter steps keep the start's day of month,
/// clamped to shorter months. Rings at month resolution get no sub-ticks.
pub fn ring_ticks(span: &TimeSpan, unit: TimeUnit) -> Vec<RingTick> {
    if unit == TimeUnit::Month {
        return Vec::new();
    }

    (0u32..)
        .map_while(|k| nth_step(span.start(), unit, k).filter(|date| *date <= span.end()))
        .map(|date| RingTick {
            date,
            angle: span.date_to_angle(date),
            label: time_unit_label(date, unit),
        })
        .collect()
}

/// The date `k` steps of `unit` after `start`, computed from `start` so that
/// clamped month ends do not accumulate.
fn nth_step(start: DateTime<Utc>, unit: TimeUnit, k: u32) -> Option<DateTime<Utc>> {
    match unit {
        TimeUnit::Day => start.checked_add_signed(TimeDelta::days(i64::from(k))),
        TimeUnit::Week => start.checked_add_signed(TimeDelta::days(7 * i64::from(k))),
        TimeUnit::Month => start.checked_add_months(Months::new(k)),
        TimeUnit::Quarter => start.checked_add_months(Months::new(k.checked_mul(3)?)),
    }
}

/// Dates from the span start through its end, `step` apart.
fn stepped(span: &TimeSpan, step: TimeDelta) -> impl Iterator<Item = DateTime<Utc>> + '_ {
    std::iter::successors(Some(span.start()), move |date| date.checked_add_signed(step))
        .take_while(move |date| *date <= span.end())
}
