use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;
use crate::fields::LogLevel;

/// Terminal to-do list with overdue-task reminders.
/// Tasks live in memory for the length of the session.
#[derive(Parser, Debug)]
#[command(name = "todo", version, about = "To-do list with deadline reminders")]
pub struct Cli {
    /// Seconds between overdue-task checks.
    #[arg(long, global = true, default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    pub check_interval: u64,

    /// Write log output to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Log verbosity.
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Defaults to `ui`.
    #[command(subcommand)]
    pub command: Option<Commands>,
}
