//! Pure date arithmetic for the timeline.
//!
//! All dates are local calendar dates (`NaiveDate`); renderer-native
//! positions carry a time of day (`NaiveDateTime`) until snapped.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

use crate::error::{Result, TimelineError};
use crate::model::Granularity;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a zero-padded `YYYY-MM-DD` string as a local calendar date.
pub fn parse_local_date(s: &str) -> Result<NaiveDate> {
    let bytes = s.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !well_formed {
        return Err(TimelineError::Format {
            input: s.to_string(),
        });
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| TimelineError::Format {
        input: s.to_string(),
    })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Drop the time of day.
pub fn snap_to_day(datetime: NaiveDateTime) -> NaiveDate {
    datetime.date()
}

/// Never let a date precede the project start.
pub fn clamp_to_start(date: NaiveDate, project_start: NaiveDate) -> NaiveDate {
    date.max(project_start)
}

/// Monday of the ISO week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Sunday of the ISO week containing `date`.
pub fn week_end(date: NaiveDate) -> NaiveDate {
    week_start(date) + Duration::days(6)
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

/// First day of the month after the one containing `date`.
pub fn next_month(date: NaiveDate) -> NaiveDate {
    last_of_month(date) + Duration::days(1)
}

/// Widen `[start, end]` so it covers whole periods of `granularity`.
///
/// Week: Monday of the first week through Sunday of the last week.
/// Month: first day of the first month through last day of the last month.
pub fn expand_to_full_period(
    start: NaiveDate,
    end: NaiveDate,
    granularity: Granularity,
) -> (NaiveDate, NaiveDate) {
    match granularity {
        Granularity::Day => (start, end),
        Granularity::Week => (week_start(start), week_end(end)),
        Granularity::Month => (first_of_month(start), last_of_month(end)),
    }
}

/// ISO-8601 week number (Monday start, week 1 holds the first Thursday).
pub fn iso_week_number(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// A project-relative axis counter such as `WEEK2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RelativeLabel {
    pub granularity: Granularity,
    /// 1-based counter.
    pub index: u32,
}

impl RelativeLabel {
    /// Recognize text that is already a relative label.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        Granularity::ALL.into_iter().find_map(|granularity| {
            let digits = text.strip_prefix(granularity.label_prefix())?;
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let index = digits.parse().ok()?;
            Some(Self { granularity, index })
        })
    }

    /// Earliest date that carries this label on an axis: the bucket start
    /// for days and months, the Monday of the counted week for weeks.
    pub fn period_start(&self, project_start: NaiveDate) -> NaiveDate {
        let steps = i64::from(self.index.saturating_sub(1));
        match self.granularity {
            Granularity::Day => project_start + Duration::days(steps),
            Granularity::Week => week_start(project_start) + Duration::weeks(steps),
            Granularity::Month => project_start + Duration::days(30 * steps),
        }
    }
}

impl fmt::Display for RelativeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.granularity.label_prefix(), self.index)
    }
}

fn bucket(diff_days: i64, size: i64) -> u32 {
    (diff_days.div_euclid(size) + 1).clamp(1, u32::MAX as i64) as u32
}

/// Counter of `date` relative to the project start, floored at 1.
///
/// Months are fixed 30-day buckets, not calendar months.
pub fn relative_time_label(
    date: NaiveDate,
    project_start: NaiveDate,
    granularity: Granularity,
) -> RelativeLabel {
    let diff = (date - project_start).num_days();
    let index = match granularity {
        Granularity::Day => bucket(diff, 1),
        Granularity::Week => bucket(diff, 7),
        Granularity::Month => bucket(diff, 30),
    };
    RelativeLabel { granularity, index }
}

/// Counter of the ISO week holding `date`, where the week holding the
/// project start is week 1.
pub fn relative_week_index(date: NaiveDate, project_start: NaiveDate) -> u32 {
    bucket((week_start(date) - week_start(project_start)).num_days(), 7)
}
