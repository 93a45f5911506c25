//! Wire types shared by the GraphQL operations.
//!
//! Everything here is server-owned data. Null and empty-string fields both mean
//! "system default"; `normalized` collapses the two before anything binds to UI
//! state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Feature category partitioning the model catalog and the preference fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModelCategory {
    /// Code completion models.
    Completion,
    /// Chat models.
    Chat,
}

impl ModelCategory {
    /// Both categories, in display order.
    pub const ALL: &'static [Self] = &[Self::Completion, Self::Chat];

    /// Label shown next to the category's select.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Completion => "Code Completion",
            Self::Chat => "Chat Model",
        }
    }

    /// Value of the `ModelTypeEnum` GraphQL variable.
    #[must_use]
    pub const fn as_graphql(self) -> &'static str {
        match self {
            Self::Completion => "COMPLETION",
            Self::Chat => "CHAT",
        }
    }
}

impl fmt::Display for ModelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completion => f.write_str("completion"),
            Self::Chat => f.write_str("chat"),
        }
    }
}

impl FromStr for ModelCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "completion" => Ok(Self::Completion),
            "chat" => Ok(Self::Chat),
            other => Err(format!("unknown model category: {other}")),
        }
    }
}

/// The user's persisted model choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelPreferences {
    /// Preferred completion model, `None` for the system default.
    #[serde(default)]
    pub completion_model: Option<String>,
    /// Preferred chat model, `None` for the system default.
    #[serde(default)]
    pub chat_model: Option<String>,
    /// When the preferences were last written.
    pub updated_at: DateTime<Utc>,
}

impl ModelPreferences {
    /// Collapse empty-string model names into `None`.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.completion_model = non_empty(self.completion_model);
        self.chat_model = non_empty(self.chat_model);
        self
    }

    /// Preferred model for a category.
    #[must_use]
    pub fn model_for(&self, category: ModelCategory) -> Option<&str> {
        match category {
            ModelCategory::Completion => self.completion_model.as_deref(),
            ModelCategory::Chat => self.chat_model.as_deref(),
        }
    }
}

/// A selectable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Identifier, unique within a category.
    pub model_name: String,
    /// Optional human-readable description.
    #[serde(default)]
    pub description: Option<String>,
    /// Optional performance tier (e.g. "fast", "balanced", "quality").
    #[serde(default)]
    pub performance_tier: Option<String>,
}

impl Model {
    /// Create a catalog entry with no description or tier.
    #[must_use]
    pub fn named(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            description: None,
            performance_tier: None,
        }
    }

    /// Name plus the description in parentheses, if any.
    #[must_use]
    pub fn display_label(&self) -> String {
        match &self.description {
            Some(description) => format!("{} ({description})", self.model_name),
            None => self.model_name.clone(),
        }
    }
}

/// Drop unnamed entries, keep the first of duplicate names and blank out empty
/// optional fields.
#[must_use]
pub fn normalize_catalog(models: Vec<Model>) -> Vec<Model> {
    let mut seen = HashSet::new();
    models
        .into_iter()
        .filter(|model| !model.model_name.is_empty())
        .filter(|model| seen.insert(model.model_name.clone()))
        .map(|model| Model {
            model_name: model.model_name,
            description: non_empty(model.description),
            performance_tier: non_empty(model.performance_tier),
        })
        .collect()
}

/// Input of the `updateUserModelPreferences` mutation.
///
/// Both keys are always serialized; `null` asks the server to fall back to the
/// system default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePreferencesInput {
    /// Completion model to store, or `None` to clear.
    pub completion_model: Option<String>,
    /// Chat model to store, or `None` to clear.
    pub chat_model: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
