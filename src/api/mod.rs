//! GraphQL access to the model preference service
//!
//! - `types`: wire types and boundary normalisation
//! - `client`: blocking HTTP transport and `ApiError`
//! - `operations`: query documents and the `PreferencesApi` seam
//! - `cache`: client-side result cache honouring a `RequestPolicy`

mod cache;
mod client;
mod operations;
mod types;

pub use cache::{CachedApi, RequestPolicy};
pub use client::{ApiError, GraphqlClient};
pub use operations::{
    GET_AVAILABLE_MODELS, GET_USER_MODEL_PREFERENCES, PreferencesApi,
    RESET_USER_MODEL_PREFERENCES, UPDATE_USER_MODEL_PREFERENCES,
};
pub use types::{Model, ModelCategory, ModelPreferences, UpdatePreferencesInput, normalize_catalog};
