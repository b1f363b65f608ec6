//! Core of the timeline editor: task model, calendar math and the layout
//! and label-translation engine that drives a [`timeline::TimelineView`].

pub mod app;
pub mod config;
pub mod editor;
pub mod error;
pub mod logging;
pub mod model;
pub mod timeline;
pub mod ui;

pub use config::Settings;
pub use editor::{EditorState, ProjectSetup};
pub use error::{DatasetError, Result, TimelineError};
pub use model::{Granularity, Project, ProjectWindow, Task, TaskPatch, Template};
pub use timeline::{TimelineCallbacks, TimelineController, TimelineView};
