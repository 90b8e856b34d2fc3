//! Color constants for the terminal user interface.

use ratatui::style::Color;

/// Header and status bar background.
pub const DARK_TEAL: Color = Color::Rgb(0, 70, 80);
/// Border of the focused panel and the active input.
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Rows whose deadline has passed.
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);
/// Completed rows.
pub const DIM_GREEN: Color = Color::Rgb(90, 140, 90);
