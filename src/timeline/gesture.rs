use chrono::{Duration, NaiveDate, NaiveDateTime};
use log::debug;

use super::calendar::{clamp_to_start, snap_to_day};
use crate::model::{Granularity, ProjectWindow};

/// A drag or resize as reported by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveGesture {
    pub id: String,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    /// Lane the item was dropped on, if the renderer reports one.
    pub lane: Option<usize>,
}

/// A snapped, clamped date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// A translated move gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovedItem {
    pub id: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub lane: Option<usize>,
}

/// Turns renderer-native gestures into domain dates.
///
/// Never touches the task list; callers hand the results to whoever owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureTranslator {
    project_start: NaiveDate,
    granularity: Granularity,
}

impl GestureTranslator {
    pub fn new(window: &ProjectWindow) -> Self {
        Self {
            project_start: window.start(),
            granularity: window.granularity(),
        }
    }

    fn snap(&self, datetime: NaiveDateTime) -> NaiveDate {
        clamp_to_start(snap_to_day(datetime), self.project_start)
    }

    /// A click on empty space: one default-length task at the snapped date.
    pub fn on_add(&self, native_start: Option<NaiveDateTime>) -> Option<DateRange> {
        let Some(native_start) = native_start else {
            debug!("event=gesture_ignored module=gesture kind=add reason=missing_start");
            return None;
        };
        let start = self.snap(native_start);
        let end = start + Duration::days(self.granularity.default_duration_days());
        Some(DateRange { start, end })
    }

    /// A finished drag or resize. Only the start is clamped; the end is
    /// kept at or after the start.
    pub fn on_move(&self, gesture: MoveGesture) -> Option<MovedItem> {
        let Some(native_start) = gesture.start else {
            debug!(
                "event=gesture_ignored module=gesture kind=move id={} reason=missing_start",
                gesture.id
            );
            return None;
        };
        let start = self.snap(native_start);
        let end = gesture.end.map(snap_to_day).unwrap_or(start).max(start);
        Some(MovedItem {
            id: gesture.id,
            start,
            end,
            lane: gesture.lane,
        })
    }

    pub fn on_remove(&self, id: String) -> String {
        id
    }
}
