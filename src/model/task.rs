use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, TimelineError};

/// Colour given to tasks created without one.
pub const DEFAULT_TASK_COLOR: &str = "#6B7280";

/// A single date-ranged bar on the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque unique id.
    pub id: String,
    pub content: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Free-text category, may be empty.
    #[serde(default)]
    pub category: String,
    /// Bar colour as `#RRGGBB`.
    pub color: String,
}

impl Task {
    /// Create a new task with a fresh id and the default colour.
    pub fn new(content: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            start,
            end: end.max(start),
            category: String::new(),
            color: DEFAULT_TASK_COLOR.to_string(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Whether the content is long enough to need the compact bar style.
    pub fn is_long(&self, threshold: usize) -> bool {
        self.content.chars().count() > threshold
    }

    /// Apply a patch, keeping `start <= end`.
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(start) = patch.start {
            self.start = start;
        }
        if let Some(end) = patch.end {
            self.end = end;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if self.end < self.start {
            self.end = self.start;
        }
    }
}

/// The changed fields of a task edit. `None` leaves the field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub content: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub category: Option<String>,
    pub color: Option<String>,
}

impl TaskPatch {
    pub fn dates(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            ..Default::default()
        }
    }
}

/// Validate and normalize a `#RRGGBB` colour string to upper case.
pub fn normalize_hex_color(s: &str) -> Result<String> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(TimelineError::InvalidColor(s.to_string()));
    }
    Ok(format!("#{}", hex.to_ascii_uppercase()))
}

/// Split a `#RRGGBB` colour into its channels.
pub fn hex_to_rgb(s: &str) -> Result<[u8; 3]> {
    let normalized = normalize_hex_color(s)?;
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&normalized[range], 16)
            .map_err(|_| TimelineError::InvalidColor(s.to_string()))
    };
    Ok([channel(1..3)?, channel(3..5)?, channel(5..7)?])
}
