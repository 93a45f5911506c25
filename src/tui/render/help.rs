//! Help overlay rendering

use crate::config::{Action, KeyBindings};
use ratatui::{
    Frame,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::{centered_rect_absolute, colors};

/// Render the help overlay
pub fn render_help_overlay(frame: &mut Frame<'_>, keys: &KeyBindings) {
    let mut help_text = vec![
        Line::from(Span::styled(
            "Keybindings",
            Style::default()
                .fg(colors::TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    let mut current_group = None;
    for &action in Action::ALL_FOR_HELP {
        let group = action.group();

        // Add section header when group changes
        if current_group != Some(group) {
            if current_group.is_some() {
                help_text.push(Line::from(""));
            }
            help_text.push(Line::from(Span::styled(
                group.title(),
                Style::default().fg(colors::TEXT_DIM),
            )));
            current_group = Some(group);
        }

        help_text.push(Line::from(vec![
            Span::styled(
                format!("  {:<18} ", keys.format_keys(action)),
                Style::default().fg(colors::TEXT_DIM),
            ),
            Span::styled(
                action.description(),
                Style::default().fg(colors::TEXT_PRIMARY),
            ),
        ]));
    }

    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(colors::TEXT_MUTED),
    )));

    let height = u16::try_from(help_text.len() + 2).unwrap_or(u16::MAX);
    let area = centered_rect_absolute(60, height, frame.area()).intersection(frame.area());

    let paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors::BORDER)),
        )
        .style(Style::default().bg(colors::MODAL_BG));

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}
