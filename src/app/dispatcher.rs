//! Background execution of panel requests.

use crate::api::{ApiError, CachedApi, PreferencesApi};
use crate::panel::{Completion, Request, execute};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;
use tracing::{debug, warn};

/// Runs each `Request` on its own worker thread and collects the `Completion`s.
///
/// Completions arrive in the order the requests finish, not the order they
/// were submitted.
#[derive(Debug)]
pub struct Dispatcher<A> {
    api: Arc<CachedApi<A>>,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
}

impl<A: PreferencesApi + 'static> Dispatcher<A> {
    /// Create a dispatcher over a shared cached API.
    #[must_use]
    pub fn new(api: CachedApi<A>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            api: Arc::new(api),
            tx,
            rx,
        }
    }

    /// The API requests are executed against.
    #[must_use]
    pub fn api(&self) -> &CachedApi<A> {
        &self.api
    }

    /// Start `request` in the background.
    ///
    /// If no worker can be started the request completes immediately with
    /// `ApiError::Worker`, so its operation is still released.
    pub fn submit(&self, request: Request) {
        let operation = request.operation().label();
        debug!(operation, ?request, "Dispatching request");
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        let pending = request.clone();
        let spawned = std::thread::Builder::new()
            .name("modelprefs-request".to_string())
            .spawn(move || {
                let completion = execute(&api, request);
                if tx.send(completion).is_err() {
                    debug!("Completion dropped, dispatcher is gone");
                }
            });
        if let Err(e) = spawned {
            warn!(operation, "Failed to spawn request worker: {}", e);
            self.fail(pending, ApiError::Worker(e));
        }
    }

    fn fail(&self, request: Request, error: ApiError) {
        // The receiver lives in `self`, so this cannot be disconnected
        let _ = self.tx.send(Completion::failed(request, error));
    }

    /// Start every request in `requests`.
    pub fn submit_all(&self, requests: impl IntoIterator<Item = Request>) {
        for request in requests {
            self.submit(request);
        }
    }

    /// All completions that have arrived so far, without blocking.
    #[must_use]
    pub fn drain(&self) -> Vec<Completion> {
        self.rx.try_iter().collect()
    }

    /// Wait up to `timeout` for the next completion.
    #[must_use]
    pub fn recv_timeout(&self, timeout: Duration) -> Option<Completion> {
        match self.rx.recv_timeout(timeout) {
            Ok(completion) => Some(completion),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }
}
