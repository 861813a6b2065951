//! View projector: pure, read-only derivations over the current snapshot.
//!
//! Nothing here mutates cache state; repeated calls with unchanged inputs
//! return equivalent results. Overdue status is recomputed at read time,
//! never stored.

use chrono::{DateTime, Utc};

use crate::models::Task;
use crate::store::snapshot::StatusFilter;

/// Tasks whose status matches the filter, in input order.
pub fn filtered(tasks: &[Task], filter: StatusFilter) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| filter.admits(t.status))
        .cloned()
        .collect()
}

/// Case-insensitive substring match against name OR description, applied
/// after filtering. A blank or whitespace-only term matches everything.
pub fn searched(tasks: &[Task], term: &str) -> Vec<Task> {
    let term = term.trim();
    if term.is_empty() {
        return tasks.to_vec();
    }
    tasks
        .iter()
        .filter(|t| {
            contains_ignore_case(&t.name, term)
                || t.description
                    .as_deref()
                    .is_some_and(|d| contains_ignore_case(d, term))
        })
        .cloned()
        .collect()
}

/// Filter, then search, then display order (newest created first).
pub fn project(tasks: &[Task], filter: StatusFilter, term: &str) -> Vec<Task> {
    let mut tasks = searched(&filtered(tasks, filter), term);
    tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
    tasks
}

/// Read-only indicators consumed by presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskCounts {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
}

pub fn task_counts(tasks: &[Task]) -> TaskCounts {
    let completed = tasks.iter().filter(|t| t.status.is_completed()).count();
    TaskCounts {
        total: tasks.len(),
        pending: tasks.len() - completed,
        completed,
    }
}

pub fn overdue_count(tasks: &[Task], now: DateTime<Utc>) -> usize {
    tasks.iter().filter(|t| t.is_overdue(now)).count()
}

fn contains_ignore_case(text: &str, term: &str) -> bool {
    text.to_lowercase().contains(&term.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskStatus;
    use chrono::{NaiveDate, TimeZone};

    fn task(id: &str, name: &str, description: Option<&str>, status: TaskStatus) -> Task {
        let stamp = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Task {
            id: id.to_string(),
            owner_id: "u1".to_string(),
            name: name.to_string(),
            description: description.map(|d| d.to_string()),
            deadline: NaiveDate::from_ymd_opt(2099, 1, 1).unwrap(),
            status,
            created_at: stamp,
            updated_at: stamp,
        }
    }

    fn sample_set() -> Vec<Task> {
        vec![
            task("t1", "Buy milk", None, TaskStatus::Pending),
            task("t2", "Ship report", Some("no milk needed"), TaskStatus::Completed),
            task("t3", "Water plants", None, TaskStatus::Pending),
        ]
    }

    #[test]
    fn test_pending_and_completed_partition_all() {
        let tasks = sample_set();
        let all = filtered(&tasks, StatusFilter::All);
        let pending = filtered(&tasks, StatusFilter::Pending);
        let completed = filtered(&tasks, StatusFilter::Completed);

        assert_eq!(pending.len() + completed.len(), all.len());
        for t in &pending {
            assert!(!completed.iter().any(|c| c.id == t.id), "partitions overlap");
        }
        for t in &all {
            assert!(
                pending.iter().chain(completed.iter()).any(|p| p.id == t.id),
                "task {} missing from the union",
                t.id
            );
        }
    }

    #[test]
    fn test_search_matches_name_or_description_case_insensitive() {
        let tasks = sample_set();
        let hits = searched(&tasks, "MILK");
        let ids: Vec<&str> = hits.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t2"]);
    }

    #[test]
    fn test_blank_search_term_matches_everything() {
        let tasks = sample_set();
        assert_eq!(searched(&tasks, "").len(), 3);
        assert_eq!(searched(&tasks, "   ").len(), 3);
    }

    #[test]
    fn test_search_applies_after_filter() {
        let tasks = sample_set();
        let hits = project(&tasks, StatusFilter::Pending, "milk");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "t1");
    }

    #[test]
    fn test_display_order_is_newest_first() {
        let mut tasks = sample_set();
        tasks[2].created_at = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let ordered = project(&tasks, StatusFilter::All, "");
        assert_eq!(ordered[0].id, "t3");
    }

    #[test]
    fn test_counts() {
        let counts = task_counts(&sample_set());
        assert_eq!(
            counts,
            TaskCounts {
                total: 3,
                pending: 2,
                completed: 1
            }
        );
    }

    #[test]
    fn test_overdue_count_excludes_completed() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let past = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let mut tasks = sample_set();
        tasks[0].deadline = past; // pending, overdue
        tasks[1].deadline = past; // completed, never overdue
        assert_eq!(overdue_count(&tasks, now), 1);
    }

    #[test]
    fn test_projection_does_not_mutate_input() {
        let tasks = sample_set();
        let before = tasks.clone();
        let _ = project(&tasks, StatusFilter::Pending, "milk");
        assert_eq!(tasks, before);
    }
}
