//! Source of the current local date and time.

use chrono::{Local, NaiveDate, NaiveDateTime};

/// Wall-clock access, abstracted so date-dependent behavior can be driven in tests.
pub trait Clock {
    /// Current local date-time.
    fn now(&self) -> NaiveDateTime;

    /// Current local calendar date.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// The system's local clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
