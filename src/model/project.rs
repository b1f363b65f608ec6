use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::task::{Task, TaskPatch};
use super::timeline::Granularity;
use crate::error::{Result, TimelineError};

/// The date window and axis unit of a project. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectWindow {
    start: NaiveDate,
    end: NaiveDate,
    granularity: Granularity,
}

impl ProjectWindow {
    /// Build a window; `start` must be strictly before `end`.
    pub fn new(start: NaiveDate, end: NaiveDate, granularity: Granularity) -> Result<Self> {
        if start >= end {
            return Err(TimelineError::InvalidWindow { start, end });
        }
        Ok(Self {
            start,
            end,
            granularity,
        })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Same dates, different axis unit.
    pub fn with_granularity(self, granularity: Granularity) -> Self {
        Self {
            granularity,
            ..self
        }
    }
}

/// A timeline project: window, template choice and the task list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    window: ProjectWindow,
    pub template_id: String,
    items: Vec<Task>,
    /// Bumped on every mutation so views can skip redundant syncs.
    #[serde(skip)]
    revision: u64,
}

impl Project {
    pub fn new(name: impl Into<String>, window: ProjectWindow, template_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            window,
            template_id: template_id.into(),
            items: Vec::new(),
            revision: 0,
        }
    }

    pub fn window(&self) -> ProjectWindow {
        self.window
    }

    pub fn items(&self) -> &[Task] {
        &self.items
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.items.iter().find(|t| t.id == id)
    }

    pub fn add_item(&mut self, item: Task) {
        self.items.push(item);
        self.touch();
    }

    /// Apply `patch` to the task with `id`. Returns false if no such task.
    pub fn update_item(&mut self, id: &str, patch: TaskPatch) -> bool {
        match self.items.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.apply(patch);
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Remove the task with `id`, returning it if it existed.
    pub fn remove_item(&mut self, id: &str) -> Option<Task> {
        let pos = self.items.iter().position(|t| t.id == id)?;
        let task = self.items.remove(pos);
        self.touch();
        Some(task)
    }

    pub fn set_window(&mut self, window: ProjectWindow) {
        self.window = window;
        self.touch();
    }

    pub fn set_template(&mut self, template_id: impl Into<String>) {
        self.template_id = template_id.into();
        self.touch();
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
