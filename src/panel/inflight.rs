//! Aggregated in-flight tracking for the panel's network operations.

/// The network operations whose progress disables the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Preferences query.
    Preferences,
    /// Completion catalog query.
    CompletionCatalog,
    /// Chat catalog query.
    ChatCatalog,
    /// Update mutation.
    Update,
    /// Reset mutation.
    Reset,
}

impl Operation {
    /// Every tracked operation.
    pub const ALL: [Self; 5] = [
        Self::Preferences,
        Self::CompletionCatalog,
        Self::ChatCatalog,
        Self::Update,
        Self::Reset,
    ];

    const fn index(self) -> usize {
        match self {
            Self::Preferences => 0,
            Self::CompletionCatalog => 1,
            Self::ChatCatalog => 2,
            Self::Update => 3,
            Self::Reset => 4,
        }
    }

    /// Progress text for the loading indicator and logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Preferences => "Loading preferences",
            Self::CompletionCatalog => "Loading completion models",
            Self::ChatCatalog => "Loading chat models",
            Self::Update => "Saving preferences",
            Self::Reset => "Resetting preferences",
        }
    }
}

/// Outstanding request counts per operation.
///
/// The panel is busy while any count is non-zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InFlight {
    counts: [u32; 5],
}

impl InFlight {
    /// Record that a request for `op` was issued.
    pub fn begin(&mut self, op: Operation) {
        let slot = &mut self.counts[op.index()];
        *slot = slot.saturating_add(1);
    }

    /// Record that a request for `op` finished.
    pub fn finish(&mut self, op: Operation) {
        let slot = &mut self.counts[op.index()];
        *slot = slot.saturating_sub(1);
    }

    /// Whether `op` has an outstanding request.
    #[must_use]
    pub const fn is_active(&self, op: Operation) -> bool {
        self.counts[op.index()] > 0
    }

    /// Whether any tracked operation is outstanding.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        Operation::ALL.iter().any(|op| self.is_active(*op))
    }

    /// Outstanding operations in declaration order.
    pub fn active(&self) -> impl Iterator<Item = Operation> + '_ {
        Operation::ALL.into_iter().filter(|op| self.is_active(*op))
    }
}
