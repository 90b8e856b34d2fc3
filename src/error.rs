//! Error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Reasons the creation form or an inline edit refuses to submit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Description is required")]
    MissingDescription,

    #[error("{field} date is required")]
    MissingDate { field: &'static str },

    #[error("Invalid {field} date '{value}' (use YYYY-MM-DD, 'today', 'tomorrow' or 'in Nd')")]
    InvalidDate { field: &'static str, value: String },
}

/// Fatal errors that end the program.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("could not open log file {}: {source}", path.display())]
    LogFile { path: PathBuf, source: io::Error },

    #[error("could not install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}
