pub mod filter;
pub mod project;
pub mod store;
pub mod task;
pub mod timeline;

pub use filter::{ActiveProject, TaskFilter, ViewFilter};
pub use project::Project;
pub use store::ScheduleIndex;
pub use task::{Task, TaskId, TaskKind};
pub use timeline::TimelineGeometry;
