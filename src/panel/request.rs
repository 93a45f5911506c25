//! Messages exchanged between the panel and whatever runs its network calls.

use super::inflight::Operation;
use crate::api::{
    ApiError, CachedApi, Model, ModelCategory, ModelPreferences, PreferencesApi, RequestPolicy,
    UpdatePreferencesInput,
};

/// A network operation the panel wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Load the stored preferences.
    LoadPreferences {
        /// Cache policy for this load.
        policy: RequestPolicy,
        /// Sequence number; only the latest load is applied.
        generation: u64,
    },
    /// Load the catalog of one category.
    LoadCatalog(ModelCategory),
    /// Submit the update mutation.
    Update(UpdatePreferencesInput),
    /// Submit the reset mutation.
    Reset,
}

impl Request {
    /// The in-flight operation this request counts against.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        match self {
            Self::LoadPreferences { .. } => Operation::Preferences,
            Self::LoadCatalog(ModelCategory::Completion) => Operation::CompletionCatalog,
            Self::LoadCatalog(ModelCategory::Chat) => Operation::ChatCatalog,
            Self::Update(_) => Operation::Update,
            Self::Reset => Operation::Reset,
        }
    }
}

/// The outcome of a `Request`.
#[derive(Debug)]
pub enum Completion {
    /// Result of `Request::LoadPreferences`.
    Preferences {
        /// Generation of the request this answers.
        generation: u64,
        /// Stored preferences, `None` if the user has none.
        result: Result<Option<ModelPreferences>, ApiError>,
    },
    /// Result of `Request::LoadCatalog`.
    Catalog {
        /// Category that was loaded.
        category: ModelCategory,
        /// Catalog entries.
        result: Result<Vec<Model>, ApiError>,
    },
    /// Result of `Request::Update`.
    Update(Result<ModelPreferences, ApiError>),
    /// Result of `Request::Reset`.
    Reset(Result<ModelPreferences, ApiError>),
}

impl Completion {
    /// The completion of `request` when it could not be run at all.
    #[must_use]
    pub fn failed(request: Request, error: ApiError) -> Self {
        match request {
            Request::LoadPreferences { generation, .. } => Self::Preferences {
                generation,
                result: Err(error),
            },
            Request::LoadCatalog(category) => Self::Catalog {
                category,
                result: Err(error),
            },
            Request::Update(_) => Self::Update(Err(error)),
            Request::Reset => Self::Reset(Err(error)),
        }
    }
}

/// Perform `request` against `api`, blocking until it finishes.
pub fn execute<A: PreferencesApi>(api: &CachedApi<A>, request: Request) -> Completion {
    match request {
        Request::LoadPreferences { policy, generation } => Completion::Preferences {
            generation,
            result: api.user_model_preferences(policy),
        },
        Request::LoadCatalog(category) => Completion::Catalog {
            category,
            result: api.available_models(category, RequestPolicy::CacheFirst),
        },
        Request::Update(input) => Completion::Update(api.update_user_model_preferences(&input)),
        Request::Reset => Completion::Reset(api.reset_user_model_preferences()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn worker_error() -> ApiError {
        ApiError::Worker(std::io::Error::other("no threads"))
    }

    #[rstest]
    #[case(
        Request::LoadPreferences { policy: RequestPolicy::NetworkOnly, generation: 7 },
        Operation::Preferences
    )]
    #[case(Request::LoadCatalog(ModelCategory::Completion), Operation::CompletionCatalog)]
    #[case(Request::LoadCatalog(ModelCategory::Chat), Operation::ChatCatalog)]
    #[case(Request::Update(UpdatePreferencesInput::default()), Operation::Update)]
    #[case(Request::Reset, Operation::Reset)]
    fn test_request_operation(#[case] request: Request, #[case] expected: Operation) {
        assert_eq!(request.operation(), expected);
    }

    #[test]
    fn test_failed_preferences_keeps_generation() {
        let request = Request::LoadPreferences {
            policy: RequestPolicy::CacheFirst,
            generation: 3,
        };
        assert!(matches!(
            Completion::failed(request, worker_error()),
            Completion::Preferences {
                generation: 3,
                result: Err(ApiError::Worker(_))
            }
        ));
    }

    #[test]
    fn test_failed_mutations_carry_the_error() {
        assert!(matches!(
            Completion::failed(Request::Update(UpdatePreferencesInput::default()), worker_error()),
            Completion::Update(Err(ApiError::Worker(_)))
        ));
        assert!(matches!(
            Completion::failed(Request::Reset, worker_error()),
            Completion::Reset(Err(ApiError::Worker(_)))
        ));
    }
}
