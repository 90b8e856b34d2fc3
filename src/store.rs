//! In-memory task store.
//!
//! This module provides the `TaskStore`, the single owner of the ordered task
//! sequence and the id counter. Every mutation the application performs goes
//! through one of its operations. Nothing here is persisted; the store lives
//! exactly as long as the process.

use chrono::NaiveDate;
use log::info;

use crate::dates::{format_date, tomorrow};
use crate::fields::Status;
use crate::task::{NewTask, Task};

/// Ordered collection of tasks plus the next-id counter.
#[derive(Debug)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    /// Create an empty store whose first task will get id 1.
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    /// All tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Get a task by ID.
    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Append a new incomplete task and return its id.
    ///
    /// Ids are handed out sequentially and never reused, even after deletion.
    pub fn add_task(&mut self, input: NewTask) -> u64 {
        let id = self.next_id;
        let task = Task {
            id,
            code: Task::code_for(id),
            description: input.description,
            start_date: input.start_date,
            end_date: input.end_date,
            status: Status::Incomplete,
        };
        info!("created {} ({} -> {})", task.code, format_date(task.start_date), format_date(task.end_date));
        self.tasks.push(task);
        self.next_id += 1;
        id
    }

    /// Replace the task with the same id in place.
    ///
    /// Returns false (and changes nothing) when no task has that id.
    pub fn update_task(&mut self, updated: Task) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == updated.id) {
            Some(slot) => {
                info!("updated {}", slot.code);
                *slot = updated;
                true
            }
            None => false,
        }
    }

    /// Remove the task with the given id. Returns false when absent.
    pub fn delete_task(&mut self, id: u64) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        let removed = self.tasks.len() != before;
        if removed {
            info!("deleted {}", Task::code_for(id));
        }
        removed
    }

    /// Mark a task completed. Returns false when absent.
    pub fn complete_task(&mut self, id: u64) -> bool {
        let Some(task) = self.get(id) else {
            return false;
        };
        let updated = Task {
            status: Status::Completed,
            ..task.clone()
        };
        info!("completed {}", updated.code);
        self.update_task(updated)
    }

    /// Move a task's end date to the day after `today`. Returns false when absent.
    pub fn postpone_task(&mut self, id: u64, today: NaiveDate) -> bool {
        let Some(task) = self.get(id) else {
            return false;
        };
        let updated = Task {
            end_date: tomorrow(today),
            ..task.clone()
        };
        info!("postponed {} to {}", updated.code, format_date(updated.end_date));
        self.update_task(updated)
    }
}
