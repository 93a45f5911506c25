//! Model preference queries and mutations.

use super::client::{ApiError, GraphqlClient};
use super::types::{
    Model, ModelCategory, ModelPreferences, UpdatePreferencesInput, normalize_catalog,
};
use serde::Deserialize;
use serde_json::json;

/// Current preferences of the signed-in user.
pub const GET_USER_MODEL_PREFERENCES: &str = r"query GetUserModelPreferences {
  userModelPreferences {
    completionModel
    chatModel
    updatedAt
  }
}";

/// Catalog of selectable models, optionally filtered by category.
pub const GET_AVAILABLE_MODELS: &str = r"query GetAvailableModels($type: ModelTypeEnum) {
  availableModels(type: $type) {
    modelName
    description
    performanceTier
  }
}";

/// Store new preferences; `null` fields fall back to the system default.
pub const UPDATE_USER_MODEL_PREFERENCES: &str = r"mutation UpdateUserModelPreferences($input: UpdateUserModelPreferencesInput!) {
  updateUserModelPreferences(input: $input) {
    completionModel
    chatModel
    updatedAt
  }
}";

/// Clear both preferences.
pub const RESET_USER_MODEL_PREFERENCES: &str = r"mutation ResetUserModelPreferences {
  resetUserModelPreferences {
    completionModel
    chatModel
    updatedAt
  }
}";

/// The four operations the preferences panel depends on.
///
/// Implementations block until the server answers; callers that need a
/// responsive UI run them off the event loop thread.
pub trait PreferencesApi: Send + Sync {
    /// Fetch the stored preferences, `None` if the user never saved any.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn user_model_preferences(&self) -> Result<Option<ModelPreferences>, ApiError>;

    /// List the selectable models of one category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn available_models(&self, category: ModelCategory) -> Result<Vec<Model>, ApiError>;

    /// Persist new preferences.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn update_user_model_preferences(
        &self,
        input: &UpdatePreferencesInput,
    ) -> Result<ModelPreferences, ApiError>;

    /// Reset both preferences to the system default.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn reset_user_model_preferences(&self) -> Result<ModelPreferences, ApiError>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PreferencesData {
    user_model_preferences: Option<ModelPreferences>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AvailableModelsData {
    #[serde(default)]
    available_models: Option<Vec<Model>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateData {
    update_user_model_preferences: ModelPreferences,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResetData {
    reset_user_model_preferences: ModelPreferences,
}

impl PreferencesApi for GraphqlClient {
    fn user_model_preferences(&self) -> Result<Option<ModelPreferences>, ApiError> {
        let data: PreferencesData = self.execute(
            "GetUserModelPreferences",
            GET_USER_MODEL_PREFERENCES,
            json!({}),
        )?;
        Ok(data.user_model_preferences.map(ModelPreferences::normalized))
    }

    fn available_models(&self, category: ModelCategory) -> Result<Vec<Model>, ApiError> {
        let data: AvailableModelsData = self.execute(
            "GetAvailableModels",
            GET_AVAILABLE_MODELS,
            json!({ "type": category.as_graphql() }),
        )?;
        Ok(normalize_catalog(data.available_models.unwrap_or_default()))
    }

    fn update_user_model_preferences(
        &self,
        input: &UpdatePreferencesInput,
    ) -> Result<ModelPreferences, ApiError> {
        let data: UpdateData = self.execute(
            "UpdateUserModelPreferences",
            UPDATE_USER_MODEL_PREFERENCES,
            json!({ "input": input }),
        )?;
        Ok(data.update_user_model_preferences.normalized())
    }

    fn reset_user_model_preferences(&self) -> Result<ModelPreferences, ApiError> {
        let data: ResetData = self.execute(
            "ResetUserModelPreferences",
            RESET_USER_MODEL_PREFERENCES,
            json!({}),
        )?;
        Ok(data.reset_user_model_preferences.normalized())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    const PREFS_BODY: &str = r#"{"data":{"userModelPreferences":{"completionModel":"fast-1","chatModel":"","updatedAt":"2024-05-01T12:00:00Z"}}}"#;

    fn client_for(server: &mockito::Server) -> GraphqlClient {
        GraphqlClient::new(
            format!("{}/graphql", server.url()),
            None,
            Duration::from_secs(3),
        )
    }

    #[test]
    fn test_user_model_preferences_normalizes() -> Result<(), Box<dyn std::error::Error>> {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/graphql")
            .match_body(Matcher::PartialJson(
                json!({ "operationName": "GetUserModelPreferences" }),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(PREFS_BODY)
            .create();

        let prefs = client_for(&server).user_model_preferences()?;
        mock.assert();

        let prefs = prefs.ok_or("expected preferences")?;
        assert_eq!(prefs.completion_model.as_deref(), Some("fast-1"));
        assert_eq!(prefs.chat_model, None);
        Ok(())
    }

    #[test]
    fn test_user_model_preferences_null() -> Result<(), Box<dyn std::error::Error>> {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/graphql")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data":{"userModelPreferences":null}}"#)
            .create();

        let prefs = client_for(&server).user_model_preferences()?;
        mock.assert();

        assert!(prefs.is_none());
        Ok(())
    }

    #[test]
    fn test_available_models_sends_category() -> Result<(), Box<dyn std::error::Error>> {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/graphql")
            .match_body(Matcher::PartialJson(json!({
                "operationName": "GetAvailableModels",
                "variables": { "type": "COMPLETION" }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"data":{"availableModels":[{"modelName":"fast-1","description":"Low latency","performanceTier":"fast"},{"modelName":""}]}}"#,
            )
            .create();

        let models = client_for(&server).available_models(ModelCategory::Completion)?;
        mock.assert();

        assert_eq!(
            models,
            vec![Model {
                model_name: "fast-1".to_string(),
                description: Some("Low latency".to_string()),
                performance_tier: Some("fast".to_string()),
            }]
        );
        Ok(())
    }

    #[test]
    fn test_available_models_null_list_is_empty() -> Result<(), Box<dyn std::error::Error>> {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/graphql")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data":{"availableModels":null}}"#)
            .create();

        let models = client_for(&server).available_models(ModelCategory::Chat)?;
        mock.assert();

        assert!(models.is_empty());
        Ok(())
    }

    #[test]
    fn test_update_sends_explicit_null() -> Result<(), Box<dyn std::error::Error>> {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/graphql")
            .match_body(Matcher::PartialJson(json!({
                "operationName": "UpdateUserModelPreferences",
                "variables": { "input": { "completionModel": null, "chatModel": "gpt-x" } }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"data":{"updateUserModelPreferences":{"completionModel":null,"chatModel":"gpt-x","updatedAt":"2024-05-02T08:30:00Z"}}}"#,
            )
            .create();

        let input = UpdatePreferencesInput {
            completion_model: None,
            chat_model: Some("gpt-x".to_string()),
        };
        let prefs = client_for(&server).update_user_model_preferences(&input)?;
        mock.assert();

        assert_eq!(prefs.chat_model.as_deref(), Some("gpt-x"));
        assert_eq!(prefs.completion_model, None);
        Ok(())
    }

    #[test]
    fn test_reset_error_is_reported() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/graphql")
            .match_body(Matcher::PartialJson(
                json!({ "operationName": "ResetUserModelPreferences" }),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data":null,"errors":[{"message":"Unauthorized"}]}"#)
            .create();

        let result = client_for(&server).reset_user_model_preferences();
        mock.assert();

        assert!(matches!(result, Err(ApiError::GraphQL(_))));
    }
}
