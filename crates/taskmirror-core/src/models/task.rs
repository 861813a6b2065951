use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::SAMPLE_TASK_DEADLINE_DAYS;

/// The two reachable task states. The only transition is the toggle,
/// owned by the task cache; nothing else writes `status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Completed,
}

impl TaskStatus {
    pub fn toggled(self) -> Self {
        match self {
            TaskStatus::Pending => TaskStatus::Completed,
            TaskStatus::Completed => TaskStatus::Pending,
        }
    }

    pub fn is_completed(self) -> bool {
        matches!(self, TaskStatus::Completed)
    }
}

/// An identity-scoped task record as stored in the remote document store.
///
/// `id` is assigned by the store on insert; `owner_id` is stamped once at
/// creation and never changes. Field bounds (name 3-100 chars, description
/// up to 500) are enforced by the form layer before records reach this crate;
/// see [`crate::constants`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub description: Option<String>,
    /// Calendar date the task is due. Compared against the current instant
    /// at start-of-day when deciding overdue status.
    pub deadline: NaiveDate,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Overdue means the deadline has passed and the task is not completed.
    /// Recomputed at read time, never stored.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.status.is_completed() && self.deadline.and_time(NaiveTime::MIN).and_utc() < now
    }
}

/// Fields the form layer supplies when creating a task. The cache stamps
/// `owner_id`, `status` and the timestamps on top of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub name: String,
    pub description: Option<String>,
    pub deadline: NaiveDate,
}

impl TaskDraft {
    pub fn new(name: impl Into<String>, deadline: NaiveDate) -> Self {
        Self {
            name: name.into(),
            description: None,
            deadline,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// A throwaway task due a week out, handy for smoke-testing a fresh setup.
    pub fn sample(now: DateTime<Utc>) -> Self {
        Self {
            name: "Sample Task".to_string(),
            description: Some("This is a sample task to test the system".to_string()),
            deadline: (now + Duration::days(SAMPLE_TASK_DEADLINE_DAYS)).date_naive(),
        }
    }
}

/// Partial-record update: only the populated fields are written, everything
/// else on the remote record is left untouched. The cache refreshes
/// `updated_at` on every write, callers never set it themselves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl TaskPatch {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Apply the populated fields to a record in place.
    pub fn apply(&self, task: &mut Task) {
        if let Some(name) = &self.name {
            task.name = name.clone();
        }
        if let Some(description) = &self.description {
            task.description = Some(description.clone());
        }
        if let Some(deadline) = self.deadline {
            task.deadline = deadline;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(updated_at) = self.updated_at {
            task.updated_at = updated_at;
        }
    }
}
