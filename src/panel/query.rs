//! Result slot of a single query.

/// Last known result of a query plus its progress flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState<T> {
    data: Option<T>,
    fetching: bool,
    error: bool,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            data: None,
            fetching: false,
            error: false,
        }
    }
}

impl<T> QueryState<T> {
    /// Loaded data, if any.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Whether a request is outstanding.
    #[must_use]
    pub const fn is_fetching(&self) -> bool {
        self.fetching
    }

    /// Whether the last request failed.
    #[must_use]
    pub const fn has_error(&self) -> bool {
        self.error
    }

    /// Mark a request as issued. Previous data stays visible until it resolves.
    pub const fn start(&mut self) {
        self.fetching = true;
    }

    /// Store a successful result.
    pub fn succeed(&mut self, data: T) {
        self.data = Some(data);
        self.fetching = false;
        self.error = false;
    }

    /// Record a failure. Failed queries resolve to absent data.
    pub fn fail(&mut self) {
        self.data = None;
        self.fetching = false;
        self.error = true;
    }

    /// Clear the fetching flag without touching data, for superseded results.
    pub const fn settle(&mut self) {
        self.fetching = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let mut state: QueryState<Vec<u8>> = QueryState::default();
        assert!(state.data().is_none());
        assert!(!state.is_fetching());

        state.start();
        assert!(state.is_fetching());

        state.succeed(vec![1]);
        assert_eq!(state.data(), Some(&vec![1]));
        assert!(!state.is_fetching());
        assert!(!state.has_error());

        state.start();
        state.fail();
        assert!(state.data().is_none());
        assert!(state.has_error());
    }

    #[test]
    fn test_settle_keeps_data() {
        let mut state = QueryState::default();
        state.succeed(7_u32);
        state.start();
        state.settle();
        assert_eq!(state.data(), Some(&7));
        assert!(!state.is_fetching());
    }
}
