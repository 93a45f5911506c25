//! Key handling

use crate::app::App;
use crate::config::Action;
use crate::panel::Request;
use ratatui::crossterm::event::{KeyCode, KeyModifiers};

/// Translate a key press into an action and apply it
///
/// Unbound keys only matter while help is open, where any key closes it.
pub fn handle_key_event(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Vec<Request> {
    match app.config.keys.get_action(code, modifiers) {
        Some(action) => app.handle_action(action),
        None if app.show_help => app.handle_action(Action::Cancel),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Focus;
    use crate::config::Config;
    use rstest::rstest;

    #[rstest]
    #[case(KeyCode::Tab, KeyModifiers::NONE, Focus::ChatSelect)]
    #[case(KeyCode::Char('j'), KeyModifiers::NONE, Focus::ChatSelect)]
    #[case(KeyCode::BackTab, KeyModifiers::SHIFT, Focus::SaveButton)]
    #[case(KeyCode::Char('x'), KeyModifiers::NONE, Focus::CompletionSelect)]
    fn test_navigation_keys(
        #[case] code: KeyCode,
        #[case] modifiers: KeyModifiers,
        #[case] expected: Focus,
    ) {
        let mut app = App::new(Config::default());
        assert!(handle_key_event(&mut app, code, modifiers).is_empty());
        assert_eq!(app.focus, expected);
    }

    #[test]
    fn test_unbound_key_closes_help() {
        let mut app = App::new(Config::default());
        app.show_help = true;
        handle_key_event(&mut app, KeyCode::Char('x'), KeyModifiers::NONE);
        assert!(!app.show_help);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = App::new(Config::default());
        handle_key_event(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }

    #[test]
    fn test_save_key_while_idle_issues_update() {
        let mut app = App::new(Config::default());
        let requests = handle_key_event(&mut app, KeyCode::Char('s'), KeyModifiers::NONE);
        assert!(matches!(requests.as_slice(), [Request::Update(_)]));
    }
}
