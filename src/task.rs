//! Task data structure and related functionality.
//!
//! This module defines the `Task` record held by the store and the `NewTask`
//! request the creation form hands to it.

use chrono::NaiveDate;

use crate::fields::Status;

/// A dated to-do item.
///
/// `id` and `code` are assigned by the store and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: u64,
    pub code: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: Status,
}

impl Task {
    /// Display label for a task id.
    pub fn code_for(id: u64) -> String {
        format!("TASK{id}")
    }

    pub fn is_completed(&self) -> bool {
        self.status == Status::Completed
    }
}

/// A task-creation request, as produced by the creation form.
///
/// New tasks always start out `Incomplete`; the store fills in the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl NewTask {
    pub fn new(description: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            description: description.into(),
            start_date,
            end_date,
        }
    }
}
