//! Client-side result cache in front of a `PreferencesApi`.

use super::client::ApiError;
use super::operations::PreferencesApi;
use super::types::{Model, ModelCategory, ModelPreferences, UpdatePreferencesInput};
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::debug;

/// How a query may use cached results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestPolicy {
    /// Serve a cached result when one exists, otherwise hit the network.
    #[default]
    CacheFirst,
    /// Always hit the network and refresh the cache.
    NetworkOnly,
}

#[derive(Debug, Default)]
struct Entries {
    preferences: Option<Option<ModelPreferences>>,
    catalogs: HashMap<ModelCategory, Vec<Model>>,
}

/// Wraps an API and caches successful query results.
///
/// Mutations always go to the network and invalidate the cached preferences;
/// the caller is expected to re-fetch them with `RequestPolicy::NetworkOnly`.
#[derive(Debug)]
pub struct CachedApi<A> {
    inner: A,
    entries: Mutex<Entries>,
}

impl<A: PreferencesApi> CachedApi<A> {
    /// Wrap `inner` with an empty cache.
    #[must_use]
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            entries: Mutex::new(Entries::default()),
        }
    }

    /// The wrapped API.
    #[must_use]
    pub const fn inner(&self) -> &A {
        &self.inner
    }

    /// Fetch the user's preferences.
    ///
    /// # Errors
    ///
    /// Returns an error if a network request was needed and failed.
    pub fn user_model_preferences(
        &self,
        policy: RequestPolicy,
    ) -> Result<Option<ModelPreferences>, ApiError> {
        if policy == RequestPolicy::CacheFirst {
            let cached = self.entries.lock().preferences.clone();
            if let Some(cached) = cached {
                debug!("Serving preferences from cache");
                return Ok(cached);
            }
        }

        let fresh = self.inner.user_model_preferences()?;
        self.entries.lock().preferences = Some(fresh.clone());
        Ok(fresh)
    }

    /// Fetch the catalog of one category.
    ///
    /// # Errors
    ///
    /// Returns an error if a network request was needed and failed.
    pub fn available_models(
        &self,
        category: ModelCategory,
        policy: RequestPolicy,
    ) -> Result<Vec<Model>, ApiError> {
        if policy == RequestPolicy::CacheFirst {
            let cached = self.entries.lock().catalogs.get(&category).cloned();
            if let Some(cached) = cached {
                debug!(%category, "Serving catalog from cache");
                return Ok(cached);
            }
        }

        let fresh = self.inner.available_models(category)?;
        self.entries.lock().catalogs.insert(category, fresh.clone());
        Ok(fresh)
    }

    /// Submit the update mutation.
    ///
    /// # Errors
    ///
    /// Returns an error if the mutation fails.
    pub fn update_user_model_preferences(
        &self,
        input: &UpdatePreferencesInput,
    ) -> Result<ModelPreferences, ApiError> {
        let result = self.inner.update_user_model_preferences(input);
        self.invalidate_preferences();
        result
    }

    /// Submit the reset mutation.
    ///
    /// # Errors
    ///
    /// Returns an error if the mutation fails.
    pub fn reset_user_model_preferences(&self) -> Result<ModelPreferences, ApiError> {
        let result = self.inner.reset_user_model_preferences();
        self.invalidate_preferences();
        result
    }

    fn invalidate_preferences(&self) {
        self.entries.lock().preferences = None;
    }
}
