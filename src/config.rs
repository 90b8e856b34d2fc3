//! Runtime configuration resolved from the command line.

use std::path::PathBuf;
use std::time::Duration;

use crate::cli::Cli;
use crate::fields::LogLevel;
use crate::monitor::DEFAULT_CHECK_INTERVAL;

/// Settings shared by the UI and the logging setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Time between deadline scans.
    pub check_interval: Duration,
    pub log_file: Option<PathBuf>,
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            check_interval: DEFAULT_CHECK_INTERVAL,
            log_file: None,
            log_level: LogLevel::Info,
        }
    }
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            check_interval: Duration::from_secs(cli.check_interval),
            log_file: cli.log_file.clone(),
            log_level: cli.log_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cmd::Commands;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["todo"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(Config::from_cli(&cli), Config::default());
        assert_eq!(Config::default().check_interval, Duration::from_secs(5));
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "todo", "ui", "--check-interval", "30", "--log-file", "/tmp/todo.log", "--log-level", "debug",
        ])
        .unwrap();
        assert!(matches!(cli.command, Some(Commands::Ui)));
        let config = Config::from_cli(&cli);
        assert_eq!(config.check_interval, Duration::from_secs(30));
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/todo.log")));
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_zero_interval_rejected() {
        assert!(Cli::try_parse_from(["todo", "--check-interval", "0"]).is_err());
        assert!(Cli::try_parse_from(["todo", "--log-level", "loud"]).is_err());
    }
}
