pub mod project;
pub mod task;
pub mod template;
pub mod timeline;

pub use project::{Project, ProjectWindow};
pub use task::{Task, TaskPatch};
pub use template::Template;
pub use timeline::{AxisScale, Granularity, TimelineViewport};
