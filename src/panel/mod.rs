//! AI model preferences panel
//!
//! The panel owns every piece of state behind the settings screen:
//! - the preferences query and the two catalog queries (`QueryState`)
//! - the user's draft selection (`SelectionDraft`)
//! - the in-flight set that disables the controls (`InFlight`)
//!
//! It never performs I/O itself. Operations return `Request`s for the caller to
//! run, and results come back through `complete` as `Completion`s. A successful
//! mutation publishes `PanelEvent::MutationSucceeded`; the refresh subscription
//! answers it with a network-only preferences reload.

mod draft;
mod inflight;
mod query;
mod request;

pub use draft::SelectionDraft;
pub use inflight::{InFlight, Operation};
pub use query::QueryState;
pub use request::{Completion, Request, execute};

use crate::api::{Model, ModelCategory, ModelPreferences, RequestPolicy};
use crate::notify::{Notification, NotificationSink};
use std::collections::VecDeque;
use tracing::{debug, info, warn};

/// Label of the empty selection.
pub const SYSTEM_DEFAULT_LABEL: &str = "System Default";

/// Mutations whose success is announced on the event bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    /// `updateUserModelPreferences`.
    Update,
    /// `resetUserModelPreferences`.
    Reset,
}

/// Events published inside the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    /// A mutation was confirmed by the server.
    MutationSucceeded(MutationKind),
}

/// One entry of a category's select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Value written to the draft; empty for the system default.
    pub value: String,
    /// Name plus optional description.
    pub label: String,
    /// Performance tier, if the catalog provides one.
    pub tier: Option<String>,
}

/// State of the model preferences settings panel.
#[derive(Debug, Default)]
pub struct ModelPreferencesPanel {
    preferences: QueryState<Option<ModelPreferences>>,
    completion_models: QueryState<Vec<Model>>,
    chat_models: QueryState<Vec<Model>>,
    draft: SelectionDraft,
    in_flight: InFlight,
    latest_generation: u64,
    mounted: bool,
    events: VecDeque<PanelEvent>,
}

impl ModelPreferencesPanel {
    /// Create an unmounted panel with an empty draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial loads: preferences (cache-first) and both catalogs.
    ///
    /// Returns nothing when called on an already mounted panel.
    pub fn mount(&mut self) -> Vec<Request> {
        if self.mounted {
            return Vec::new();
        }
        self.mounted = true;
        vec![
            self.reload(RequestPolicy::CacheFirst),
            self.load_catalog(ModelCategory::Completion),
            self.load_catalog(ModelCategory::Chat),
        ]
    }

    /// Re-execute the preferences query.
    ///
    /// Only the result of the most recent reload is applied; earlier ones still
    /// in flight are discarded when they land.
    pub fn reload(&mut self, policy: RequestPolicy) -> Request {
        self.latest_generation += 1;
        self.preferences.start();
        self.in_flight.begin(Operation::Preferences);
        debug!(generation = self.latest_generation, ?policy, "Loading preferences");
        Request::LoadPreferences {
            policy,
            generation: self.latest_generation,
        }
    }

    fn load_catalog(&mut self, category: ModelCategory) -> Request {
        self.catalog_mut(category).start();
        self.in_flight.begin(catalog_operation(category));
        Request::LoadCatalog(category)
    }

    /// Whether any of the five network operations is outstanding.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_busy()
    }

    /// The in-flight set behind `is_busy`.
    #[must_use]
    pub const fn in_flight(&self) -> &InFlight {
        &self.in_flight
    }

    /// Current draft selection.
    #[must_use]
    pub const fn draft(&self) -> &SelectionDraft {
        &self.draft
    }

    /// Last loaded server preferences.
    #[must_use]
    pub fn preferences(&self) -> Option<&ModelPreferences> {
        self.preferences.data().and_then(Option::as_ref)
    }

    /// Preferences query state.
    #[must_use]
    pub const fn preferences_state(&self) -> &QueryState<Option<ModelPreferences>> {
        &self.preferences
    }

    /// Catalog query state of a category.
    #[must_use]
    pub const fn catalog_state(&self, category: ModelCategory) -> &QueryState<Vec<Model>> {
        match category {
            ModelCategory::Completion => &self.completion_models,
            ModelCategory::Chat => &self.chat_models,
        }
    }

    fn catalog_mut(&mut self, category: ModelCategory) -> &mut QueryState<Vec<Model>> {
        match category {
            ModelCategory::Completion => &mut self.completion_models,
            ModelCategory::Chat => &mut self.chat_models,
        }
    }

    /// Loaded catalog of a category; empty while loading or after an error.
    #[must_use]
    pub fn models(&self, category: ModelCategory) -> &[Model] {
        self.catalog_state(category)
            .data()
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Choices offered for a category: the system default, then the catalog.
    #[must_use]
    pub fn options(&self, category: ModelCategory) -> Vec<SelectOption> {
        std::iter::once(SelectOption {
            value: String::new(),
            label: SYSTEM_DEFAULT_LABEL.to_string(),
            tier: None,
        })
        .chain(self.models(category).iter().map(|model| SelectOption {
            value: model.model_name.clone(),
            label: model.display_label(),
            tier: model.performance_tier.clone(),
        }))
        .collect()
    }

    /// Change the draft for a category.
    ///
    /// Refused while busy, and for non-empty values missing from the catalog.
    pub fn select(&mut self, category: ModelCategory, value: &str) -> bool {
        if self.is_busy() {
            debug!(%category, "Ignoring selection while busy");
            return false;
        }
        if !value.is_empty() && !self.models(category).iter().any(|m| m.model_name == value) {
            warn!(%category, value, "Ignoring selection of unknown model");
            return false;
        }
        self.draft.set(category, value);
        true
    }

    /// Start the save flow. Returns `None` while busy.
    pub fn save(&mut self) -> Option<Request> {
        if self.is_busy() {
            return None;
        }
        self.in_flight.begin(Operation::Update);
        let input = self.draft.to_input();
        info!(?input, "Saving model preferences");
        Some(Request::Update(input))
    }

    /// Start the reset flow. Returns `None` while busy.
    pub fn reset(&mut self) -> Option<Request> {
        if self.is_busy() {
            return None;
        }
        self.in_flight.begin(Operation::Reset);
        info!("Resetting model preferences");
        Some(Request::Reset)
    }

    /// Apply the outcome of a request, notifying `sink` for mutations.
    ///
    /// Returns follow-up requests, i.e. the reload after a successful mutation.
    pub fn complete(
        &mut self,
        completion: Completion,
        sink: &mut dyn NotificationSink,
    ) -> Vec<Request> {
        match completion {
            Completion::Preferences { generation, result } => {
                self.in_flight.finish(Operation::Preferences);
                self.apply_preferences(generation, result);
            }
            Completion::Catalog { category, result } => {
                self.in_flight.finish(catalog_operation(category));
                match result {
                    Ok(models) => {
                        debug!(%category, count = models.len(), "Loaded model catalog");
                        self.catalog_mut(category).succeed(models);
                    }
                    Err(e) => {
                        warn!(%category, "Failed to load model catalog: {}", e);
                        self.catalog_mut(category).fail();
                    }
                }
            }
            Completion::Update(result) => {
                self.in_flight.finish(Operation::Update);
                match result {
                    Ok(_) => {
                        sink.notify(Notification::UPDATED);
                        self.publish(PanelEvent::MutationSucceeded(MutationKind::Update));
                    }
                    Err(e) => {
                        warn!("Failed to update model preferences: {}", e);
                        sink.notify(Notification::UPDATE_FAILED);
                    }
                }
            }
            Completion::Reset(result) => {
                self.in_flight.finish(Operation::Reset);
                match result {
                    Ok(_) => {
                        sink.notify(Notification::RESET);
                        self.draft.clear();
                        self.publish(PanelEvent::MutationSucceeded(MutationKind::Reset));
                    }
                    Err(e) => {
                        warn!("Failed to reset model preferences: {}", e);
                        sink.notify(Notification::RESET_FAILED);
                    }
                }
            }
        }

        self.drain_events()
    }

    fn apply_preferences(
        &mut self,
        generation: u64,
        result: Result<Option<ModelPreferences>, crate::api::ApiError>,
    ) {
        if generation != self.latest_generation {
            debug!(
                generation,
                latest = self.latest_generation,
                "Discarding superseded preferences result"
            );
            if !self.in_flight.is_active(Operation::Preferences) {
                self.preferences.settle();
            }
            return;
        }

        match result {
            Ok(preferences) => {
                // Selection sync: loaded preferences overwrite the draft.
                if let Some(prefs) = &preferences {
                    self.draft = SelectionDraft::from_preferences(prefs);
                }
                self.preferences.succeed(preferences);
            }
            Err(e) => {
                warn!("Failed to load model preferences: {}", e);
                self.preferences.fail();
            }
        }
    }

    fn publish(&mut self, event: PanelEvent) {
        self.events.push_back(event);
    }

    fn drain_events(&mut self) -> Vec<Request> {
        let mut follow_ups = Vec::new();
        while let Some(event) = self.events.pop_front() {
            match event {
                PanelEvent::MutationSucceeded(kind) => {
                    debug!(?kind, "Refreshing preferences after mutation");
                    follow_ups.push(self.reload(RequestPolicy::NetworkOnly));
                }
            }
        }
        follow_ups
    }
}

const fn catalog_operation(category: ModelCategory) -> Operation {
    match category {
        ModelCategory::Completion => Operation::CompletionCatalog,
        ModelCategory::Chat => Operation::ChatCatalog,
    }
}
