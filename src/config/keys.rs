//! Keybinding configuration

use ratatui::crossterm::event::{KeyCode, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Actions that can be triggered by keybindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Move focus (or the open dropdown's highlight) forward
    Next,
    /// Move focus (or the open dropdown's highlight) backward
    Prev,
    /// Open the focused select, pick the highlighted option, or press the focused button
    Activate,
    /// Close the open dropdown or overlay
    Cancel,
    /// Save the current selection
    Save,
    /// Reset both preferences to the system default
    Reset,
    /// Re-fetch preferences from the server
    Reload,
    /// Show help
    Help,
    /// Quit application
    Quit,
}

/// Categories for grouping actions in help display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionGroup {
    /// Moving between controls
    Navigation,
    /// Preference changes
    Preferences,
    /// Miscellaneous actions
    Other,
    /// Actions not shown in help (internal or context-specific)
    Hidden,
}

impl ActionGroup {
    /// Get the display title for this group
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Navigation => "Navigation",
            Self::Preferences => "Preferences",
            Self::Other => "Other",
            Self::Hidden => "",
        }
    }
}

impl Action {
    /// Get the display description for this action
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Next => "Next control / option",
            Self::Prev => "Previous control / option",
            Self::Activate => "Open select / choose / press",
            Self::Cancel => "Close",
            Self::Save => "Save preferences",
            Self::Reset => "Reset to default",
            Self::Reload => "Reload from server",
            Self::Help => "Show this help",
            Self::Quit => "Quit",
        }
    }

    /// Get the group this action belongs to
    #[must_use]
    pub const fn group(self) -> ActionGroup {
        match self {
            Self::Next | Self::Prev | Self::Activate => ActionGroup::Navigation,
            Self::Save | Self::Reset | Self::Reload => ActionGroup::Preferences,
            Self::Help | Self::Quit => ActionGroup::Other,
            Self::Cancel => ActionGroup::Hidden,
        }
    }

    /// All actions in display order for help
    pub const ALL_FOR_HELP: &'static [Self] = &[
        // Navigation
        Self::Next,
        Self::Prev,
        Self::Activate,
        // Preferences
        Self::Save,
        Self::Reset,
        Self::Reload,
        // Other
        Self::Help,
        Self::Quit,
    ];
}

/// Keybinding configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Map of key strings to actions (for serialization)
    bindings: HashMap<String, Action>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = HashMap::new();

        bindings.insert("Tab".to_string(), Action::Next);
        bindings.insert("Down".to_string(), Action::Next);
        bindings.insert("j".to_string(), Action::Next);
        bindings.insert("BackTab".to_string(), Action::Prev);
        bindings.insert("Shift+BackTab".to_string(), Action::Prev);
        bindings.insert("Up".to_string(), Action::Prev);
        bindings.insert("k".to_string(), Action::Prev);
        bindings.insert("Enter".to_string(), Action::Activate);
        bindings.insert(" ".to_string(), Action::Activate);
        bindings.insert("Esc".to_string(), Action::Cancel);
        bindings.insert("s".to_string(), Action::Save);
        bindings.insert("Ctrl+s".to_string(), Action::Save);
        bindings.insert("r".to_string(), Action::Reset);
        bindings.insert("R".to_string(), Action::Reload);
        bindings.insert("?".to_string(), Action::Help);
        bindings.insert("q".to_string(), Action::Quit);
        bindings.insert("Ctrl+c".to_string(), Action::Quit);

        Self { bindings }
    }
}

impl KeyBindings {
    /// Merge in any missing default keybindings
    ///
    /// This ensures that new keybindings added in updates are available
    /// even if the user has an older saved config.
    pub fn merge_defaults(&mut self) {
        let defaults = Self::default();
        for (key, action) in defaults.bindings {
            self.bindings.entry(key).or_insert(action);
        }
    }

    /// Get the action for a key event
    #[must_use]
    pub fn get_action(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
        let key_str = key_to_string(code, modifiers);
        self.bindings.get(&key_str).copied()
    }

    /// Set a keybinding
    pub fn set(&mut self, key: &str, action: Action) {
        self.bindings.insert(key.to_string(), action);
    }

    /// Get all bindings for an action
    #[must_use]
    pub fn keys_for_action(&self, action: Action) -> Vec<String> {
        self.bindings
            .iter()
            .filter_map(|(k, &v)| if v == action { Some(k.clone()) } else { None })
            .collect()
    }

    /// Keys bound to an action, single characters first, then alphabetical
    fn sorted_keys(&self, action: Action) -> Vec<String> {
        let mut keys = self.keys_for_action(action);
        keys.sort_by(|a, b| {
            let a_simple = a.chars().count() == 1;
            let b_simple = b.chars().count() == 1;
            match (a_simple, b_simple) {
                (true, false) => std::cmp::Ordering::Less,
                (false, true) => std::cmp::Ordering::Greater,
                _ => a.cmp(b),
            }
        });
        keys
    }

    /// Format key(s) for an action for display (e.g., "s/Ctrl+s" or "j/Down")
    #[must_use]
    pub fn format_keys(&self, action: Action) -> String {
        self.sorted_keys(action)
            .iter()
            .map(|k| display_key(k))
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Generate a formatted help line for an action: "  keys    description"
    #[must_use]
    pub fn help_line(&self, action: Action) -> String {
        let keys = self.format_keys(action);
        format!("  {keys:<18} {}", action.description())
    }

    /// Generate status bar hint text
    #[must_use]
    pub fn status_hints(&self) -> String {
        let hints = [
            (Action::Activate, "select"),
            (Action::Save, "save"),
            (Action::Reset, "reset"),
            (Action::Help, "help"),
            (Action::Quit, "quit"),
        ];

        hints
            .iter()
            .map(|(action, label)| {
                let keys = self.sorted_keys(*action);
                let key = keys.first().map_or("", |k| display_key(k));
                format!("[{key}]{label}")
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn display_key(key: &str) -> &str {
    if key == " " { "Space" } else { key }
}

/// Convert a key code and modifiers to a string representation
#[must_use]
pub fn key_to_string(code: KeyCode, modifiers: KeyModifiers) -> String {
    let mut parts = Vec::new();

    if modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl".to_string());
    }
    if modifiers.contains(KeyModifiers::ALT) {
        parts.push("Alt".to_string());
    }
    if modifiers.contains(KeyModifiers::SHIFT) && !matches!(code, KeyCode::Char(_)) {
        parts.push("Shift".to_string());
    }

    let key_part = match code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "BackTab".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        _ => return String::new(),
    };

    parts.push(key_part);
    parts.join("+")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keybindings() {
        let keys = KeyBindings::default();

        assert_eq!(
            keys.get_action(KeyCode::Char('s'), KeyModifiers::NONE),
            Some(Action::Save)
        );
        assert_eq!(
            keys.get_action(KeyCode::Char('q'), KeyModifiers::NONE),
            Some(Action::Quit)
        );
        assert_eq!(
            keys.get_action(KeyCode::Enter, KeyModifiers::NONE),
            Some(Action::Activate)
        );
        assert_eq!(
            keys.get_action(KeyCode::Tab, KeyModifiers::NONE),
            Some(Action::Next)
        );
    }

    #[test]
    fn test_modifier_keys() {
        let keys = KeyBindings::default();

        assert_eq!(
            keys.get_action(KeyCode::Char('s'), KeyModifiers::CONTROL),
            Some(Action::Save)
        );
        assert_eq!(
            keys.get_action(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(Action::Quit)
        );
        assert_eq!(
            keys.get_action(KeyCode::BackTab, KeyModifiers::SHIFT),
            Some(Action::Prev)
        );
    }

    #[test]
    fn test_uppercase_keybindings() {
        let keys = KeyBindings::default();

        assert_eq!(
            keys.get_action(KeyCode::Char('R'), KeyModifiers::SHIFT),
            Some(Action::Reload)
        );
        assert_eq!(
            keys.get_action(KeyCode::Char('r'), KeyModifiers::NONE),
            Some(Action::Reset)
        );
    }

    #[test]
    fn test_unknown_key() {
        let keys = KeyBindings::default();

        assert_eq!(
            keys.get_action(KeyCode::Char('x'), KeyModifiers::NONE),
            None
        );
        assert_eq!(
            keys.get_action(KeyCode::Insert, KeyModifiers::NONE),
            None
        );
    }

    #[test]
    fn test_set_keybinding() {
        let mut keys = KeyBindings::default();
        keys.set("x", Action::Quit);

        assert_eq!(
            keys.get_action(KeyCode::Char('x'), KeyModifiers::NONE),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_format_keys_and_help_line() {
        let keys = KeyBindings::default();

        assert_eq!(keys.format_keys(Action::Save), "s/Ctrl+s");
        assert_eq!(keys.format_keys(Action::Activate), "Space/Enter");

        let help = keys.help_line(Action::Reset);
        assert!(help.contains('r'));
        assert!(help.contains("Reset to default"));
    }

    #[test]
    fn test_status_hints() {
        let keys = KeyBindings::default();
        let hints = keys.status_hints();
        assert!(hints.contains("[Space]select"));
        assert!(hints.contains("[s]save"));
        assert!(hints.contains("[r]reset"));
        assert!(hints.contains("[q]quit"));
    }

    #[test]
    fn test_merge_defaults() {
        let mut keys = KeyBindings {
            bindings: [("x".to_string(), Action::Save)].into_iter().collect(),
        };

        assert_eq!(
            keys.get_action(KeyCode::Char('r'), KeyModifiers::NONE),
            None
        );

        keys.merge_defaults();
        assert_eq!(
            keys.get_action(KeyCode::Char('r'), KeyModifiers::NONE),
            Some(Action::Reset)
        );
        assert_eq!(
            keys.get_action(KeyCode::Char('x'), KeyModifiers::NONE),
            Some(Action::Save)
        );
    }

    #[test]
    fn test_key_to_string() {
        assert_eq!(key_to_string(KeyCode::Char('a'), KeyModifiers::NONE), "a");
        assert_eq!(
            key_to_string(KeyCode::Char('a'), KeyModifiers::CONTROL),
            "Ctrl+a"
        );
        assert_eq!(key_to_string(KeyCode::Enter, KeyModifiers::NONE), "Enter");
        assert_eq!(
            key_to_string(KeyCode::BackTab, KeyModifiers::SHIFT),
            "Shift+BackTab"
        );
        assert_eq!(key_to_string(KeyCode::F(1), KeyModifiers::NONE), "F1");
    }

    #[test]
    fn test_serde_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
        let keys = KeyBindings::default();
        let json = serde_json::to_string(&keys)?;
        let parsed: KeyBindings = serde_json::from_str(&json)?;
        assert_eq!(keys, parsed);
        Ok(())
    }
}
