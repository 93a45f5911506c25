//! TUI rendering
//!
//! - `colors`: color palette
//! - `panel`: the preferences card
//! - `dropdown`, `help`: overlays
//! - `toast`: notification stack

pub mod colors;
mod dropdown;
mod help;
mod panel;
mod toast;

pub use panel::{CARD_HEIGHT, DESCRIPTION, TITLE};

use crate::app::App;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

/// Render the full application UI
pub fn render(frame: &mut Frame<'_>, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());

    let card = centered_rect_absolute(70, CARD_HEIGHT, chunks[0]).intersection(chunks[0]);
    panel::render_panel(frame, app, card);
    render_status_bar(frame, app, chunks[1]);

    if app.dropdown.is_some() {
        dropdown::render_dropdown_overlay(frame, app);
    }
    if app.show_help {
        help::render_help_overlay(frame, &app.config.keys);
    }
    toast::render_toasts(frame, &app.toasts);
}

fn render_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let bar = Paragraph::new(Line::from(Span::styled(
        app.config.keys.status_hints(),
        Style::default().fg(colors::TEXT_MUTED),
    )));
    frame.render_widget(bar, area);
}

/// Create a centered rect with percentage width and absolute height
#[must_use]
pub fn centered_rect_absolute(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical_padding = area.height.saturating_sub(height) / 2;
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(vertical_padding),
            Constraint::Length(height),
            Constraint::Length(vertical_padding),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
