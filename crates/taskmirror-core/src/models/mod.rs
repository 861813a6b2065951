pub mod identity;
pub mod task;

pub use identity::{Credentials, Identity};
pub use task::{Task, TaskDraft, TaskPatch, TaskStatus};
