//! Locally edited, not-yet-saved selection.

use crate::api::{ModelCategory, ModelPreferences, UpdatePreferencesInput};

/// The user's draft selection. An empty string means "System Default".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionDraft {
    /// Selected completion model.
    pub completion: String,
    /// Selected chat model.
    pub chat: String,
}

impl SelectionDraft {
    /// Draft mirroring stored preferences, absent fields becoming empty.
    #[must_use]
    pub fn from_preferences(preferences: &ModelPreferences) -> Self {
        Self {
            completion: preferences.completion_model.clone().unwrap_or_default(),
            chat: preferences.chat_model.clone().unwrap_or_default(),
        }
    }

    /// Selected value for a category.
    #[must_use]
    pub fn get(&self, category: ModelCategory) -> &str {
        match category {
            ModelCategory::Completion => &self.completion,
            ModelCategory::Chat => &self.chat,
        }
    }

    /// Overwrite the value for a category.
    pub fn set(&mut self, category: ModelCategory, value: impl Into<String>) {
        let value = value.into();
        match category {
            ModelCategory::Completion => self.completion = value,
            ModelCategory::Chat => self.chat = value,
        }
    }

    /// Reset both fields to the system default.
    pub fn clear(&mut self) {
        self.completion.clear();
        self.chat.clear();
    }

    /// Mutation input for this draft; empty fields become explicit nulls.
    #[must_use]
    pub fn to_input(&self) -> UpdatePreferencesInput {
        UpdatePreferencesInput {
            completion_model: none_if_empty(&self.completion),
            chat_model: none_if_empty(&self.chat),
        }
    }
}

fn none_if_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
