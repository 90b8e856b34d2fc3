//! Command implementations for the CLI interface.
//!
//! This module contains the subcommands the binary accepts: launching the
//! terminal UI and printing shell completion scripts.

use clap::Subcommand;
use clap_complete::{generate, Shell};

use crate::config::Config;
use crate::tui::run::run_tui;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch the interactive to-do list (the default).
    Ui,

    /// Generate shell completion scripts.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Launch the terminal user interface.
pub fn cmd_ui(config: &Config) {
    log::info!("starting ui");
    if let Err(e) = run_tui(config) {
        log::error!("ui exited with error: {e}");
        eprintln!("UI error: {e}");
        std::process::exit(1);
    }
    log::info!("ui closed");
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}
