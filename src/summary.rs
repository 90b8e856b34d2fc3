//! Aggregate task counts shown in the summary panel.

use crate::fields::Status;
use crate::task::Task;

/// Counts derived from the current task list. Holds no state of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskSummary {
    pub completed: usize,
    pub incomplete: usize,
    /// Whatever is neither completed nor incomplete. With two statuses this is always zero.
    pub in_progress: usize,
}

impl TaskSummary {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|t| t.status == Status::Completed).count();
        let incomplete = tasks.iter().filter(|t| t.status == Status::Incomplete).count();
        Self {
            completed,
            incomplete,
            in_progress: tasks.len() - completed - incomplete,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::store::TaskStore;
    use crate::task::NewTask;

    #[test]
    fn test_empty() {
        assert_eq!(TaskSummary::from_tasks(&[]), TaskSummary::default());
    }

    #[test]
    fn test_counts_follow_store_changes() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut store = TaskStore::new();
        for i in 0..5 {
            store.add_task(NewTask::new(format!("task {i}"), day, day));
        }
        store.complete_task(2);
        store.complete_task(4);

        let summary = TaskSummary::from_tasks(store.tasks());
        assert_eq!(summary.completed, 2);
        assert_eq!(summary.incomplete, 3);
        assert_eq!(summary.in_progress, 0);

        store.delete_task(4);
        let summary = TaskSummary::from_tasks(store.tasks());
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.completed + summary.incomplete + summary.in_progress, store.len());
    }

    #[test]
    fn test_in_progress_is_always_zero() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut store = TaskStore::new();
        for n in 0..8u64 {
            store.add_task(NewTask::new("t", day, day));
            if n % 3 == 0 {
                store.complete_task(n + 1);
            }
            let summary = TaskSummary::from_tasks(store.tasks());
            assert_eq!(summary.in_progress, 0);
            assert_eq!(summary.completed + summary.incomplete, store.len());
        }
    }
}
