//! Application state

use crate::api::{ModelCategory, RequestPolicy};
use crate::config::{Action, Config};
use crate::notify::Toasts;
use crate::panel::{Completion, ModelPreferencesPanel, Request, SelectOption};
use std::time::Instant;
use tracing::debug;

/// Focusable controls of the preferences card, in tab order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    /// "Code Completion" select
    #[default]
    CompletionSelect,
    /// "Chat Model" select
    ChatSelect,
    /// "Reset to Default" button
    ResetButton,
    /// "Save Preferences" button
    SaveButton,
}

impl Focus {
    const ORDER: [Self; 4] = [
        Self::CompletionSelect,
        Self::ChatSelect,
        Self::ResetButton,
        Self::SaveButton,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    /// Next control, wrapping around
    #[must_use]
    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    /// Previous control, wrapping around
    #[must_use]
    pub fn prev(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    /// Category edited by this control, if it is a select
    #[must_use]
    pub const fn category(self) -> Option<ModelCategory> {
        match self {
            Self::CompletionSelect => Some(ModelCategory::Completion),
            Self::ChatSelect => Some(ModelCategory::Chat),
            Self::ResetButton | Self::SaveButton => None,
        }
    }
}

/// An open select list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dropdown {
    /// Category whose options are listed
    pub category: ModelCategory,
    /// Highlighted option index
    pub highlighted: usize,
}

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Application configuration
    pub config: Config,

    /// Preferences panel state
    pub panel: ModelPreferencesPanel,

    /// Focused control
    pub focus: Focus,

    /// Open select list, if any
    pub dropdown: Option<Dropdown>,

    /// Active toast notifications
    pub toasts: Toasts,

    /// Whether the help overlay is shown
    pub show_help: bool,

    /// Whether the application should quit
    pub should_quit: bool,
}

impl App {
    /// Create a new application state
    #[must_use]
    pub fn new(config: Config) -> Self {
        let toasts = Toasts::new(config.toast_duration());
        Self {
            config,
            panel: ModelPreferencesPanel::new(),
            focus: Focus::default(),
            dropdown: None,
            toasts,
            show_help: false,
            should_quit: false,
        }
    }

    /// Initial loads for the panel
    pub fn mount(&mut self) -> Vec<Request> {
        self.panel.mount()
    }

    /// Feed a finished request back into the panel, collecting follow-ups
    pub fn apply(&mut self, completion: Completion) -> Vec<Request> {
        self.panel.complete(completion, &mut self.toasts)
    }

    /// Expire old toasts
    pub fn tick(&mut self, now: Instant) {
        self.toasts.prune(now);
    }

    /// Options of the open dropdown
    #[must_use]
    pub fn dropdown_options(&self) -> Vec<SelectOption> {
        self.dropdown
            .map(|d| self.panel.options(d.category))
            .unwrap_or_default()
    }

    /// Perform a keybinding action, returning requests to dispatch
    pub fn handle_action(&mut self, action: Action) -> Vec<Request> {
        if self.show_help {
            // Any action dismisses help; quit still quits.
            self.show_help = false;
            if action == Action::Quit {
                self.should_quit = true;
            }
            return Vec::new();
        }

        if self.dropdown.is_some() {
            self.handle_dropdown_action(action);
            return Vec::new();
        }

        match action {
            Action::Next => self.focus = self.focus.next(),
            Action::Prev => self.focus = self.focus.prev(),
            Action::Activate => return self.activate(),
            Action::Save => return self.panel.save().into_iter().collect(),
            Action::Reset => return self.panel.reset().into_iter().collect(),
            Action::Reload => return vec![self.panel.reload(RequestPolicy::NetworkOnly)],
            Action::Help => self.show_help = true,
            Action::Quit => self.should_quit = true,
            Action::Cancel => {}
        }
        Vec::new()
    }

    fn activate(&mut self) -> Vec<Request> {
        match self.focus {
            Focus::CompletionSelect | Focus::ChatSelect => {
                if let Some(category) = self.focus.category() {
                    self.open_dropdown(category);
                }
                Vec::new()
            }
            Focus::ResetButton => self.panel.reset().into_iter().collect(),
            Focus::SaveButton => self.panel.save().into_iter().collect(),
        }
    }

    fn open_dropdown(&mut self, category: ModelCategory) {
        if self.panel.is_busy() {
            debug!(%category, "Select is disabled while busy");
            return;
        }
        let current = self.panel.draft().get(category);
        let highlighted = self
            .panel
            .options(category)
            .iter()
            .position(|o| o.value == current)
            .unwrap_or(0);
        self.dropdown = Some(Dropdown {
            category,
            highlighted,
        });
    }

    fn handle_dropdown_action(&mut self, action: Action) {
        let Some(mut dropdown) = self.dropdown else {
            return;
        };
        let options = self.panel.options(dropdown.category);
        let last = options.len().saturating_sub(1);

        match action {
            Action::Next => {
                dropdown.highlighted = (dropdown.highlighted + 1).min(last);
                self.dropdown = Some(dropdown);
            }
            Action::Prev => {
                dropdown.highlighted = dropdown.highlighted.saturating_sub(1);
                self.dropdown = Some(dropdown);
            }
            Action::Activate => {
                if let Some(option) = options.get(dropdown.highlighted) {
                    self.panel.select(dropdown.category, &option.value);
                }
                self.dropdown = None;
            }
            Action::Cancel => self.dropdown = None,
            Action::Quit => {
                self.dropdown = None;
                self.should_quit = true;
            }
            Action::Save | Action::Reset | Action::Reload | Action::Help => {}
        }
    }
}
