//! Logger setup.
//!
//! The UI owns the terminal, so log records can only go to a file. When no
//! log file is configured no logger is installed and `log` macros are no-ops.

use std::fs::OpenOptions;
use std::io::Write;

use env_logger::{Builder, Env, Target};

use crate::config::Config;
use crate::error::AppError;

pub fn init(config: &Config) -> Result<(), AppError> {
    let Some(path) = config.log_file.as_ref() else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| AppError::LogFile { path: path.clone(), source })?;

    Builder::new()
        .filter_level(config.log_level.into())
        .parse_env(Env::default())
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}: {}",
                buf.timestamp_seconds(),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .target(Target::Pipe(Box::new(file)))
        .try_init()?;
    log::info!("logging to {}", path.display());
    Ok(())
}
