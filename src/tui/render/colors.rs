//! Color palette for the TUI
//!
//! Muted palette with one accent for focus and two for toast variants

use ratatui::style::Color;

// UI Chrome
/// Border color
pub const BORDER: Color = Color::Rgb(100, 110, 130);
/// Focus accent color
pub const FOCUS: Color = Color::Rgb(100, 180, 220);
/// Surface background color
pub const SURFACE: Color = Color::Rgb(30, 32, 40);
/// Highlighted surface background color
pub const SURFACE_HIGHLIGHT: Color = Color::Rgb(50, 55, 70);

// Text
/// Primary text color
pub const TEXT_PRIMARY: Color = Color::Rgb(220, 220, 230);
/// Dim text color
pub const TEXT_DIM: Color = Color::Rgb(130, 135, 150);
/// Muted text color
pub const TEXT_MUTED: Color = Color::Rgb(90, 95, 110);

// Controls
/// Primary button color
pub const BUTTON_PRIMARY: Color = Color::Rgb(70, 120, 200);
/// Loading indicator color
pub const LOADING: Color = Color::Rgb(200, 180, 100);

// Modals
/// Modal background color
pub const MODAL_BG: Color = Color::Rgb(25, 27, 35);

// Toasts
/// Positive toast accent color
pub const ACCENT_POSITIVE: Color = Color::Rgb(120, 180, 120);
/// Negative toast accent color
pub const ACCENT_NEGATIVE: Color = Color::Rgb(200, 100, 100);
