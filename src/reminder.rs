//! Overdue-task reminder state.
//!
//! The reminder holds the flagged task picked by the deadline monitor. While a
//! task is flagged the reminder dialog is open; each of its actions clears the
//! flag again.

use chrono::NaiveDate;
use log::{debug, info};

use crate::store::TaskStore;
use crate::task::Task;

/// Actions offered by the reminder dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderAction {
    /// Mark the flagged task completed.
    Complete,
    /// Move the flagged task's end date to tomorrow.
    Postpone,
    /// Dismiss without touching the task.
    Close,
}

/// What applying an action did to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderOutcome {
    Completed(String),
    Postponed { code: String, end_date: NaiveDate },
    Dismissed,
    /// The flagged task no longer exists in the store.
    Stale(String),
    /// No task was flagged.
    Idle,
}

/// The currently flagged task, if any.
///
/// The flag is a snapshot taken at scan time. Actions look the task up again
/// by id, so edits made after flagging are not lost.
#[derive(Debug, Default)]
pub struct Reminder {
    flagged: Option<Task>,
}

impl Reminder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.flagged.is_some()
    }

    pub fn flagged(&self) -> Option<&Task> {
        self.flagged.as_ref()
    }

    /// Flag a task, replacing whatever was flagged before.
    pub fn flag(&mut self, task: Task) {
        debug!("flagging {}", task.code);
        self.flagged = Some(task);
    }

    /// Apply a dialog action to the store and close the dialog.
    pub fn apply(&mut self, action: ReminderAction, store: &mut TaskStore, today: NaiveDate) -> ReminderOutcome {
        let Some(task) = self.flagged.take() else {
            return ReminderOutcome::Idle;
        };
        match action {
            ReminderAction::Close => {
                info!("reminder for {} dismissed", task.code);
                ReminderOutcome::Dismissed
            }
            ReminderAction::Complete => {
                if store.complete_task(task.id) {
                    ReminderOutcome::Completed(task.code)
                } else {
                    ReminderOutcome::Stale(task.code)
                }
            }
            ReminderAction::Postpone => {
                if store.postpone_task(task.id, today) {
                    let end_date = store.get(task.id).map_or(task.end_date, |t| t.end_date);
                    ReminderOutcome::Postponed { code: task.code, end_date }
                } else {
                    ReminderOutcome::Stale(task.code)
                }
            }
        }
    }
}
