//! Enumerations and field types for task management.
//!
//! This module defines the small closed sets of values used across the crate:
//! the task completion status and the log verbosity accepted on the command line.

use clap::ValueEnum;

/// Task completion status.
///
/// A task only ever moves from `Incomplete` to `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Incomplete,
    Completed,
}

impl Status {
    /// Lowercase label used in the task table.
    pub fn label(self) -> &'static str {
        match self {
            Status::Incomplete => "incomplete",
            Status::Completed => "completed",
        }
    }
}

/// Log verbosity for the `--log-level` option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}
