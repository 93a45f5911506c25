//! The preferences card

use crate::api::ModelCategory;
use crate::app::{App, Focus};
use crate::panel::Operation;
use chrono::Local;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::colors;

/// Card heading.
pub const TITLE: &str = "AI Model Preferences";

/// Line under the heading.
pub const DESCRIPTION: &str =
    "Choose your preferred AI models for code completion and chat features.";

/// Rows the card needs, borders included.
pub const CARD_HEIGHT: u16 = 16;

/// Render the card into `area`
pub fn render_panel(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let inner_width = usize::from(area.width.saturating_sub(4));
    let paragraph = Paragraph::new(panel_lines(app, inner_width))
        .block(
            Block::default()
                .title(format!(" {TITLE} "))
                .title_style(
                    Style::default()
                        .fg(colors::TEXT_PRIMARY)
                        .add_modifier(Modifier::BOLD),
                )
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors::BORDER)),
        )
        .style(Style::default().bg(colors::SURFACE))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn panel_lines(app: &App, width: usize) -> Vec<Line<'static>> {
    let disabled = app.panel.is_busy();
    let mut lines = vec![
        Line::from(Span::styled(DESCRIPTION, Style::default().fg(colors::TEXT_DIM))),
        Line::from(""),
    ];

    for (category, focus) in [
        (ModelCategory::Completion, Focus::CompletionSelect),
        (ModelCategory::Chat, Focus::ChatSelect),
    ] {
        lines.push(Line::from(Span::styled(
            category.label(),
            Style::default()
                .fg(colors::TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(select_line(app, category, app.focus == focus, disabled));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "─".repeat(width),
        Style::default().fg(colors::BORDER),
    )));

    lines.push(Line::from(vec![
        button(
            "Reset to Default",
            app.focus == Focus::ResetButton,
            disabled,
            false,
        ),
        Span::raw("  "),
        button(
            "Save Preferences",
            app.focus == Focus::SaveButton,
            disabled,
            true,
        ),
    ]));
    lines.push(Line::from(""));

    if let Some(status) = busy_label(app) {
        lines.push(Line::from(Span::styled(
            status,
            Style::default().fg(colors::LOADING),
        )));
    } else if let Some(prefs) = app.panel.preferences() {
        let updated = prefs.updated_at.with_timezone(&Local);
        lines.push(Line::from(Span::styled(
            format!("Last updated: {}", updated.format("%Y-%m-%d %H:%M")),
            Style::default().fg(colors::TEXT_MUTED),
        )));
    }

    lines
}

fn select_line(app: &App, category: ModelCategory, focused: bool, disabled: bool) -> Line<'static> {
    let value = app.panel.draft().get(category);
    let options = app.panel.options(category);
    let (label, tier) = options.iter().find(|o| o.value == value).map_or_else(
        // Synced values are not filtered against the catalog
        || (value.to_string(), None),
        |o| (o.label.clone(), o.tier.clone()),
    );

    let fg = if disabled {
        colors::TEXT_MUTED
    } else {
        colors::TEXT_PRIMARY
    };
    let mut style = Style::default().fg(fg).bg(colors::SURFACE_HIGHLIGHT);
    if focused {
        style = style.add_modifier(Modifier::BOLD);
    }
    let marker = if focused { "▶ " } else { "  " };

    let mut spans = vec![
        Span::styled(marker, Style::default().fg(colors::FOCUS)),
        Span::styled(format!(" {label} ▾ "), style),
    ];
    if let Some(tier) = tier {
        spans.push(Span::styled(
            format!("  {tier}"),
            Style::default().fg(colors::TEXT_DIM),
        ));
    }
    Line::from(spans)
}

fn button(label: &'static str, focused: bool, disabled: bool, primary: bool) -> Span<'static> {
    let style = if disabled {
        Style::default()
            .fg(colors::TEXT_MUTED)
            .add_modifier(Modifier::DIM)
    } else if primary {
        Style::default().fg(colors::TEXT_PRIMARY).bg(colors::BUTTON_PRIMARY)
    } else {
        Style::default()
            .fg(colors::TEXT_PRIMARY)
            .bg(colors::SURFACE_HIGHLIGHT)
    };
    let style = if focused {
        style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        style
    };
    Span::styled(format!("[ {label} ]"), style)
}

/// Mutations win over loads
fn busy_label(app: &App) -> Option<String> {
    let in_flight = app.panel.in_flight();
    [Operation::Update, Operation::Reset]
        .into_iter()
        .find(|op| in_flight.is_active(*op))
        .or_else(|| in_flight.active().next())
        .map(|op| format!("{}...", op.label()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Model, ModelPreferences};
    use crate::config::Config;
    use crate::panel::{Completion, Request, SYSTEM_DEFAULT_LABEL};
    use chrono::Utc;

    fn text(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|s| s.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn loaded_app() -> App {
        let mut app = App::new(Config::default());
        for request in app.mount() {
            let completion = match request {
                Request::LoadPreferences { generation, .. } => Completion::Preferences {
                    generation,
                    result: Ok(Some(ModelPreferences {
                        completion_model: Some("fast-1".to_string()),
                        chat_model: Some("legacy-chat".to_string()),
                        updated_at: Utc::now(),
                    })),
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
        app
    }

    #[test]
    fn test_loading_panel_is_disabled() {
        let mut app = App::new(Config::default());
        let _requests = app.mount();
        let rendered = text(&panel_lines(&app, 40));

        assert!(rendered.contains("Loading preferences..."));
        assert!(rendered.contains(SYSTEM_DEFAULT_LABEL));
        assert!(!rendered.contains("Last updated"));
    }

    #[test]
    fn test_loaded_panel_shows_selection_and_timestamp() {
        let app = loaded_app();
        let rendered = text(&panel_lines(&app, 40));

        assert!(rendered.contains("Code Completion"));
        assert!(rendered.contains("Chat Model"));
        assert!(rendered.contains("fast-1 (quick)"));
        assert!(rendered.contains("fast"));
        // Values outside the catalog still display
        assert!(rendered.contains("legacy-chat"));
        assert!(rendered.contains("Reset to Default"));
        assert!(rendered.contains("Save Preferences"));
        assert!(rendered.contains("Last updated: "));
        assert!(!rendered.contains("Loading"));
    }

    #[test]
    fn test_saving_indicator() {
        let mut app = loaded_app();
        assert!(app.panel.save().is_some());
        let rendered = text(&panel_lines(&app, 40));
        assert!(rendered.contains("Saving preferences..."));
    }

    #[test]
    fn test_indicator_names_the_remaining_load() {
        let mut app = App::new(Config::default());
        for request in app.mount() {
            if let Request::LoadPreferences { generation, .. } = request {
                let _follow_ups = app.apply(Completion::Preferences {
                    generation,
                    result: Ok(None),
                });
            }
        }
        let rendered = text(&panel_lines(&app, 40));
        assert!(rendered.contains("Loading completion models..."));
    }

    #[test]
    fn test_selects_are_muted_while_busy() {
        let mut app = App::new(Config::default());
        let _requests = app.mount();
        let busy = select_line(&app, ModelCategory::Completion, false, app.panel.is_busy());
        assert_eq!(busy.spans[1].style.fg, Some(colors::TEXT_MUTED));

        let app = loaded_app();
        assert!(!app.panel.is_busy());
        for category in ModelCategory::ALL.iter().copied() {
            let line = select_line(&app, category, false, app.panel.is_busy());
            assert_eq!(line.spans[1].style.fg, Some(colors::TEXT_PRIMARY));
        }
    }

    #[test]
    fn test_disabled_buttons_are_dimmed() {
        let enabled = button("Save Preferences", false, false, true);
        let disabled = button("Save Preferences", false, true, true);
        assert!(!enabled.style.add_modifier.contains(Modifier::DIM));
        assert!(disabled.style.add_modifier.contains(Modifier::DIM));
        assert_eq!(disabled.style.fg, Some(colors::TEXT_MUTED));
    }
}
