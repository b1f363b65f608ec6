//! The task-list owner behind the timeline.
//!
//! [`EditorState`] receives translated gestures through
//! [`TimelineCallbacks`] and edits from the side panel, and is the only
//! place tasks are created, changed or removed.

use chrono::{Duration, NaiveDate};
use log::info;

use crate::config::Settings;
use crate::error::Result;
use crate::model::template::{default_template, template_by_id};
use crate::model::{Granularity, Project, ProjectWindow, Task, TaskPatch, Template};
use crate::timeline::calendar::clamp_to_start;
use crate::timeline::TimelineCallbacks;

/// Values gathered by the project setup dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSetup {
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub granularity: Granularity,
    pub template_id: String,
}

#[derive(Debug, Clone)]
pub struct EditorState {
    project: Project,
    template: Template,
    selected: Option<String>,
    /// Task whose editor should be open, set right after creation.
    editing: Option<String>,
    new_task_content: String,
    status: String,
}

impl EditorState {
    pub fn new(setup: ProjectSetup, settings: &Settings) -> Result<Self> {
        let window = ProjectWindow::new(setup.start, setup.end, setup.granularity)?;
        let template = template_by_id(&setup.template_id).unwrap_or_else(default_template);
        let name = if setup.name.trim().is_empty() {
            "Untitled Project".to_string()
        } else {
            setup.name.trim().to_string()
        };
        info!(
            "event=project_create module=editor granularity={} template={}",
            window.granularity(),
            template.id
        );
        Ok(Self {
            project: Project::new(name, window, template.id.clone()),
            template,
            selected: None,
            editing: None,
            new_task_content: settings.new_task_content.clone(),
            status: "Project created".to_string(),
        })
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub fn select(&mut self, id: Option<String>) {
        self.selected = id;
    }

    pub fn finish_editing(&mut self) {
        self.editing = None;
    }

    fn create_task(&mut self, start: NaiveDate, end: NaiveDate) -> String {
        let task = Task::new(self.new_task_content.clone(), start, end)
            .with_color(self.template.primary_color());
        let id = task.id.clone();
        self.project.add_item(task);
        self.selected = Some(id.clone());
        self.editing = Some(id.clone());
        self.status = "Task added".to_string();
        id
    }

    /// Side-panel "Add Task": one default period starting at the project start.
    pub fn add_task_at_start(&mut self) -> String {
        let window = self.project.window();
        let start = window.start();
        let end = start + Duration::days(window.granularity().default_duration_days());
        self.create_task(start, end)
    }

    /// Apply a side-panel edit. The start is kept inside the project window.
    pub fn edit_task(&mut self, id: &str, mut patch: TaskPatch) -> bool {
        let project_start = self.project.window().start();
        patch.start = patch.start.map(|d| clamp_to_start(d, project_start));
        let changed = self.project.update_item(id, patch);
        if changed {
            self.status = "Task updated".to_string();
        }
        changed
    }

    pub fn delete_task(&mut self, id: &str) -> bool {
        let removed = self.project.remove_item(id).is_some();
        if removed {
            if self.selected.as_deref() == Some(id) {
                self.selected = None;
            }
            if self.editing.as_deref() == Some(id) {
                self.editing = None;
            }
            self.status = "Task deleted".to_string();
        }
        removed
    }

    pub fn set_granularity(&mut self, granularity: Granularity) {
        let window = self.project.window();
        if window.granularity() == granularity {
            return;
        }
        self.project.set_window(window.with_granularity(granularity));
        self.status = format!("Granularity set to {}", granularity.label());
    }

    /// Switch template by id. Tasks keep their colours.
    pub fn set_template(&mut self, template_id: &str) -> bool {
        match template_by_id(template_id) {
            Some(template) => {
                self.project.set_template(template.id.clone());
                self.status = format!("Template: {}", template.name);
                self.template = template;
                true
            }
            None => false,
        }
    }
}

impl TimelineCallbacks for EditorState {
    fn on_item_add(&mut self, start: NaiveDate, end: NaiveDate) {
        self.create_task(start, end);
    }

    fn on_item_update(&mut self, id: &str, start: NaiveDate, end: NaiveDate) {
        if self.edit_task(id, TaskPatch::dates(start, end)) {
            if let Some(task) = self.project.get(id) {
                self.status = format!(
                    "Updated '{}' ({} → {})",
                    task.content,
                    task.start.format("%Y-%m-%d"),
                    task.end.format("%Y-%m-%d")
                );
            }
        }
    }

    fn on_item_select(&mut self, id: Option<&str>) {
        self.selected = id.map(str::to_string);
    }

    fn on_item_remove(&mut self, id: &str) {
        self.delete_task(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn editor(granularity: Granularity) -> EditorState {
        EditorState::new(
            ProjectSetup {
                name: "  Launch ".into(),
                start: date(2026, 3, 1),
                end: date(2026, 4, 30),
                granularity,
                template_id: "corporate-blue".into(),
            },
            &Settings::default(),
        )
        .unwrap()
    }

    #[test]
    fn setup_rejects_inverted_window() {
        let setup = ProjectSetup {
            name: "x".into(),
            start: date(2026, 4, 1),
            end: date(2026, 3, 1),
            granularity: Granularity::Day,
            template_id: "clean-default".into(),
        };
        assert!(EditorState::new(setup, &Settings::default()).is_err());
    }

    #[test]
    fn gesture_add_creates_task_in_template_color_and_opens_editor() {
        let mut editor = editor(Granularity::Week);
        assert_eq!(editor.project().name, "Launch");
        editor.on_item_add(date(2026, 3, 2), date(2026, 3, 9));
        let task = &editor.project().items()[0];
        assert_eq!(task.content, "New Task");
        assert_eq!(task.color, "#1E3A5F");
        assert_eq!(editor.editing(), Some(task.id.as_str()));
        assert_eq!(editor.selected(), Some(task.id.as_str()));
    }

    #[test]
    fn sidebar_add_starts_at_project_start() {
        let mut editor = editor(Granularity::Week);
        let id = editor.add_task_at_start();
        let task = editor.project().get(&id).unwrap();
        assert_eq!(task.start, date(2026, 3, 1));
        assert_eq!(task.end, date(2026, 3, 8));
    }

    #[test]
    fn edits_clamp_start_to_project_window() {
        let mut editor = editor(Granularity::Day);
        let id = editor.add_task_at_start();
        assert!(editor.edit_task(&id, TaskPatch::dates(date(2026, 2, 1), date(2026, 3, 5))));
        let task = editor.project().get(&id).unwrap();
        assert_eq!(task.start, date(2026, 3, 1));
        assert_eq!(task.end, date(2026, 3, 5));
    }

    #[test]
    fn removing_selected_task_clears_selection() {
        let mut editor = editor(Granularity::Day);
        let id = editor.add_task_at_start();
        editor.on_item_select(Some(&id));
        editor.on_item_remove(&id);
        assert!(editor.project().items().is_empty());
        assert_eq!(editor.selected(), None);
        assert_eq!(editor.editing(), None);
    }

    #[test]
    fn template_and_granularity_switches() {
        let mut editor = editor(Granularity::Day);
        assert!(editor.set_template("minimal-dark"));
        assert_eq!(editor.template().id, "minimal-dark");
        assert!(!editor.set_template("unknown"));
        editor.set_granularity(Granularity::Month);
        assert_eq!(editor.project().window().granularity(), Granularity::Month);
        assert_eq!(editor.project().window().start(), date(2026, 3, 1));
    }
}
