//! Enumerations for TUI state management.

/// Which part of the screen receives keyboard input.
///
/// The reminder dialog is not listed here: while a task is flagged it takes
/// input ahead of whatever is focused.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AppState {
    TaskList,
    TaskForm,
    Help,
}
