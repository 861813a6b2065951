use serde::{Deserialize, Serialize};

use crate::models::{Task, TaskStatus};

/// Status filter applied by the view projector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl StatusFilter {
    pub fn admits(self, status: TaskStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => status == TaskStatus::Pending,
            StatusFilter::Completed => status == TaskStatus::Completed,
        }
    }
}

/// The single source of truth consumed by the view projector: the complete
/// task set for the active identity as last delivered by the remote watch,
/// plus the view selectors.
///
/// The task set is replaced wholesale on each remote delivery, never
/// incrementally patched, so a local optimistic edit and a stale remote
/// value can never coexist.
#[derive(Debug, Clone, Default)]
pub struct TaskSnapshot {
    pub tasks: Vec<Task>,
    pub loading: bool,
    pub filter: StatusFilter,
    pub search_term: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_admission() {
        assert!(StatusFilter::All.admits(TaskStatus::Pending));
        assert!(StatusFilter::All.admits(TaskStatus::Completed));
        assert!(StatusFilter::Pending.admits(TaskStatus::Pending));
        assert!(!StatusFilter::Pending.admits(TaskStatus::Completed));
        assert!(StatusFilter::Completed.admits(TaskStatus::Completed));
        assert!(!StatusFilter::Completed.admits(TaskStatus::Pending));
    }
}
