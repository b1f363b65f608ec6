use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::TimelineError;

/// Axis unit of a project: controls snapping, default duration and labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    #[default]
    Week,
    Month,
}

impl Granularity {
    pub const ALL: [Granularity; 3] = [Granularity::Day, Granularity::Week, Granularity::Month];

    /// Length in days of a task created by a single click.
    pub fn default_duration_days(self) -> i64 {
        match self {
            Granularity::Day => 1,
            Granularity::Week => 7,
            Granularity::Month => 30,
        }
    }

    /// Prefix of the relative axis labels (`DAY3`, `WEEK2`, `MONTH1`).
    pub fn label_prefix(self) -> &'static str {
        match self {
            Granularity::Day => "DAY",
            Granularity::Week => "WEEK",
            Granularity::Month => "MONTH",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Granularity::Day => "Day",
            Granularity::Week => "Week",
            Granularity::Month => "Month",
        }
    }

    /// Axis scale unit and step handed to the renderer.
    pub fn axis_scale(self) -> AxisScale {
        AxisScale {
            unit: self,
            step: 1,
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
        })
    }
}

impl FromStr for Granularity {
    type Err = TimelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "days" => Ok(Granularity::Day),
            "week" | "weeks" => Ok(Granularity::Week),
            "month" | "months" => Ok(Granularity::Month),
            other => Err(TimelineError::UnknownGranularity(other.to_string())),
        }
    }
}

/// Axis scale configuration: one tick per `step` units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisScale {
    pub unit: Granularity,
    pub step: u32,
}

/// Manages the visible viewport of the timeline.
#[derive(Debug, Clone)]
pub struct TimelineViewport {
    /// The leftmost visible date.
    pub start: NaiveDate,
    /// The first date past the visible range.
    pub end: NaiveDate,
    /// Pixels per day (controls zoom level).
    pub pixels_per_day: f32,
    pub min_pixels_per_day: f32,
    pub max_pixels_per_day: f32,
}

impl TimelineViewport {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            pixels_per_day: 18.0,
            min_pixels_per_day: 0.5,
            max_pixels_per_day: 120.0,
        }
    }

    /// Convert a date to an x-pixel offset from the viewport start.
    pub fn date_to_x(&self, date: NaiveDate) -> f32 {
        let days = (date - self.start).num_days() as f32;
        days * self.pixels_per_day
    }

    /// Convert an x-pixel offset to a date-time, keeping the time of day.
    pub fn x_to_datetime(&self, x: f32) -> NaiveDateTime {
        let millis = (x / self.pixels_per_day * 86_400_000.0).round() as i64;
        self.start.and_time(NaiveTime::MIN) + Duration::milliseconds(millis)
    }

    /// Total width in pixels for the visible range.
    pub fn total_width(&self) -> f32 {
        self.date_to_x(self.end)
    }

    /// Zoom in (increase pixels per day).
    pub fn zoom_in(&mut self) {
        self.pixels_per_day = (self.pixels_per_day * 1.2).min(self.max_pixels_per_day);
    }

    /// Zoom out (decrease pixels per day).
    pub fn zoom_out(&mut self) {
        self.pixels_per_day = (self.pixels_per_day / 1.2).max(self.min_pixels_per_day);
    }

    /// Derive the zoom limits from the narrowest and widest span that may
    /// fill `width` pixels, and pull the current zoom back inside them.
    pub fn limit_span(&mut self, width: f32, min_span: Duration, max_span: Duration) {
        if width <= 0.0 {
            return;
        }
        let min_days = min_span.num_days().max(1) as f32;
        let max_days = max_span.num_days().max(1).max(min_span.num_days()) as f32;
        self.min_pixels_per_day = width / max_days;
        self.max_pixels_per_day = width / min_days;
        self.pixels_per_day = self
            .pixels_per_day
            .clamp(self.min_pixels_per_day, self.max_pixels_per_day);
    }

    /// Pick a zoom level that shows the whole range in `width` pixels.
    pub fn fit_width(&mut self, width: f32) {
        let days = (self.end - self.start).num_days().max(1) as f32;
        self.pixels_per_day = (width / days).clamp(self.min_pixels_per_day, self.max_pixels_per_day);
    }
}
