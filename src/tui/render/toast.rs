//! Toast notifications, stacked in the top-right corner

use crate::notify::{Notification, Toasts, Variant};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::colors;

const TOAST_WIDTH: u16 = 44;
const TOAST_HEIGHT: u16 = 4;

/// Render every active toast, newest at the bottom
pub fn render_toasts(frame: &mut Frame<'_>, toasts: &Toasts) {
    let area = frame.area();
    for (idx, notification) in toasts.iter().enumerate() {
        let Some(rect) = toast_rect(area, idx) else {
            break;
        };
        frame.render_widget(Clear, rect);
        frame.render_widget(toast_widget(notification), rect);
    }
}

fn toast_rect(area: Rect, idx: usize) -> Option<Rect> {
    let idx = u16::try_from(idx).ok()?;
    let y = area.y.saturating_add(1).saturating_add(idx.saturating_mul(TOAST_HEIGHT));
    if y.saturating_add(TOAST_HEIGHT) > area.bottom() {
        return None;
    }
    let width = TOAST_WIDTH.min(area.width);
    Some(Rect {
        x: area.right().saturating_sub(width).saturating_sub(1).max(area.x),
        y,
        width,
        height: TOAST_HEIGHT,
    })
}

const fn accent(variant: Variant) -> ratatui::style::Color {
    match variant {
        Variant::Success => colors::ACCENT_POSITIVE,
        Variant::Destructive => colors::ACCENT_NEGATIVE,
    }
}

fn toast_widget(notification: &Notification) -> Paragraph<'static> {
    let color = accent(notification.variant);
    Paragraph::new(Line::from(Span::styled(
        notification.description,
        Style::default().fg(colors::TEXT_PRIMARY),
    )))
    .block(
        Block::default()
            .title(Span::styled(
                format!(" {} ", notification.title),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    )
    .style(Style::default().bg(colors::MODAL_BG))
    .wrap(Wrap { trim: true })
}
