//! Deadline monitoring.
//!
//! Two pieces live here: `DeadlineMonitor`, the scan that picks an overdue task,
//! and `Schedule`, the recurring job that decides when the scan runs. The
//! schedule is driven by the application's event loop; it never spawns a thread,
//! so a scan always runs to completion before the next input is handled.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::NaiveDateTime;
use log::{debug, warn};

use crate::dates::deadline_passed;
use crate::task::Task;

/// Default time between deadline scans.
pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_secs(5);

/// True when the task is not completed and its end date has been reached.
pub fn is_overdue(task: &Task, now: NaiveDateTime) -> bool {
    !task.is_completed() && deadline_passed(task.end_date, now)
}

/// Scans the task list for overdue work.
///
/// Remembers the id flagged by the previous scan so a task that stays overdue
/// is only logged at `warn` once.
#[derive(Debug, Default, Clone)]
pub struct DeadlineMonitor {
    last_flagged: Option<u64>,
}

impl DeadlineMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the overdue task to flag, if any.
    ///
    /// Every overdue match in store order replaces the previous one, so when
    /// several tasks are overdue the last of them is returned.
    pub fn scan<'a>(&mut self, tasks: &'a [Task], now: NaiveDateTime) -> Option<&'a Task> {
        let mut flagged = None;
        for task in tasks {
            if is_overdue(task, now) {
                flagged = Some(task);
            }
        }
        debug!(
            "deadline scan over {} task(s): {}",
            tasks.len(),
            flagged.map_or("nothing overdue", |t| t.code.as_str())
        );
        if let Some(task) = flagged {
            if self.record(Some(task.id)) {
                warn!("{} is overdue (end date {})", task.code, task.end_date);
            }
        } else {
            self.record(None);
        }
        flagged
    }

    /// Remember the latest flagged id. True when it differs from the previous scan.
    fn record(&mut self, id: Option<u64>) -> bool {
        let changed = self.last_flagged != id;
        self.last_flagged = id;
        changed
    }
}

/// Shared flag used to stop a `Schedule`. Clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A fixed-interval recurring job owned by the event loop.
#[derive(Debug)]
pub struct Schedule {
    interval: Duration,
    next_tick: Instant,
    token: CancellationToken,
}

impl Schedule {
    /// Start a schedule whose first tick is one interval after `start`.
    /// It stops for good once `token` is cancelled.
    pub fn start(interval: Duration, start: Instant, token: CancellationToken) -> Self {
        debug!("deadline schedule started, every {:?}", interval);
        Self {
            interval,
            next_tick: start + interval,
            token,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Report whether a tick is due at `now`, and if so arm the next one.
    ///
    /// Ticks missed while the loop was busy collapse into a single tick.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.is_cancelled() || now < self.next_tick {
            return false;
        }
        self.next_tick += self.interval;
        if self.next_tick <= now {
            self.next_tick = now + self.interval;
        }
        true
    }

    /// Time left until the next tick, or `None` once cancelled.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        if self.is_cancelled() {
            return None;
        }
        Some(self.next_tick.saturating_duration_since(now))
    }
}
