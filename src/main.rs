//! # todo - terminal to-do list with deadline reminders
//!
//! Create tasks with a description and a start/end date, edit or delete them in
//! place, and keep an eye on the counts of completed and incomplete work.
//!
//! ## Deadline reminders
//!
//! Every few seconds (5 by default, `--check-interval` to change) the task list
//! is scanned for tasks whose end date has arrived and that are not completed.
//! When one is found a dialog pops up over the list offering to:
//!
//! - **complete** the task,
//! - **postpone** it until tomorrow, or
//! - **close** the dialog and leave the task as it is.
//!
//! If several tasks are overdue at once, the one furthest down the list is shown.
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the to-do list
//! todo
//!
//! # Check every 30 seconds and keep a debug log
//! todo --check-interval 30 --log-file todo.log --log-level debug
//!
//! # Shell completions
//! todo completions zsh > _todo
//! ```
//!
//! Tasks are held in memory only and are gone when the program exits.

use clap::Parser;

pub mod cli;
pub mod clock;
pub mod cmd;
pub mod config;
pub mod dates;
pub mod error;
pub mod fields;
pub mod logging;
pub mod monitor;
pub mod reminder;
pub mod store;
pub mod summary;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod task_form;
    pub mod task_item;
    pub mod utils;
}

use cli::Cli;
use cmd::*;
use config::Config;

fn main() {
    let cli = Cli::parse();
    let config = Config::from_cli(&cli);

    if let Err(e) = logging::init(&config) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match cli.command.unwrap_or(Commands::Ui) {
        Commands::Ui => cmd_ui(&config),
        Commands::Completions { shell } => cmd_completions(shell),
    }
}
