//! Application-wide constants
//!
//! Centralized location for magic strings and field bounds used across
//! modules and published for the form layer.

/// Remote collection the task subscription and writes are scoped to.
pub const TASKS_COLLECTION: &str = "tasks";

// Task field bounds. Enforced by the form layer before input reaches the
// sync core; published here so both sides agree on the numbers.
pub const TASK_NAME_MIN_LEN: usize = 3;
pub const TASK_NAME_MAX_LEN: usize = 100;
pub const TASK_DESCRIPTION_MAX_LEN: usize = 500;

/// How far out the sample task's deadline lands.
pub const SAMPLE_TASK_DEADLINE_DAYS: i64 = 7;

/// File the session is persisted to under the data directory.
pub const SESSION_FILE: &str = "session.json";
