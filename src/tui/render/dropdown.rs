//! Open select list overlay

use crate::app::App;
use ratatui::{
    Frame,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::{centered_rect_absolute, colors};

/// Render the open dropdown, if any
pub fn render_dropdown_overlay(frame: &mut Frame<'_>, app: &App) {
    let Some(dropdown) = app.dropdown else {
        return;
    };
    let options = app.dropdown_options();
    let current = app.panel.draft().get(dropdown.category);

    let mut lines: Vec<Line<'_>> = Vec::with_capacity(options.len() + 2);
    for (idx, option) in options.iter().enumerate() {
        let is_cursor = idx == dropdown.highlighted;
        let is_current = option.value == current;

        let row_style = if is_cursor {
            Style::default()
                .fg(colors::TEXT_PRIMARY)
                .bg(colors::SURFACE_HIGHLIGHT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors::TEXT_PRIMARY)
        };

        let cursor = if is_cursor { "▶ " } else { "  " };
        let check = if is_current { "✓ " } else { "  " };

        let mut spans = vec![Span::styled(
            format!("{cursor}{check}{}", option.label),
            row_style,
        )];
        if let Some(tier) = &option.tier {
            spans.push(Span::styled(
                format!("  {tier}"),
                Style::default().fg(colors::TEXT_DIM),
            ));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "↑/↓ move • Enter choose • Esc cancel",
        Style::default().fg(colors::TEXT_MUTED),
    )));

    let height = u16::try_from(lines.len() + 2).unwrap_or(u16::MAX);
    let area = centered_rect_absolute(60, height, frame.area()).intersection(frame.area());

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(format!(" {} ", dropdown.category.label()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors::FOCUS)),
        )
        .style(Style::default().bg(colors::MODAL_BG));

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Model;
    use crate::config::{Action, Config};
    use crate::panel::{Completion, Request};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_dropdown_lists_default_and_catalog() -> Result<(), Box<dyn std::error::Error>> {
        let mut app = App::new(Config::default());
        for request in app.mount() {
            let completion = match request {
                Request::LoadPreferences { generation, .. } => Completion::Preferences {
                    generation,
                    result: Ok(None),
                },
                Request::LoadCatalog(category) => Completion::Catalog {
                    category,
                    result: Ok(vec![Model {
                        model_name: "fast-1".to_string(),
                        description: Some("quick".to_string()),
                        performance_tier: Some("fast".to_string()),
                    }]),
                },
                Request::Update(_) | Request::Reset => continue,
            };
            app.apply(completion);
        }
        app.handle_action(Action::Activate);

        let mut terminal = Terminal::new(TestBackend::new(80, 24))?;
        terminal.draw(|frame| render_dropdown_overlay(frame, &app))?;

        let text = buffer_text(&terminal);
        assert!(text.contains("Code Completion"));
        assert!(text.contains("System Default"));
        assert!(text.contains("fast-1 (quick)"));
        assert!(text.contains("fast"));
        Ok(())
    }

    #[test]
    fn test_no_dropdown_draws_nothing() -> Result<(), Box<dyn std::error::Error>> {
        let app = App::new(Config::default());
        let mut terminal = Terminal::new(TestBackend::new(40, 10))?;
        terminal.draw(|frame| render_dropdown_overlay(frame, &app))?;
        assert!(buffer_text(&terminal).trim().is_empty());
        Ok(())
    }
}
