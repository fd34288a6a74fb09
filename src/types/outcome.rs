use std::fmt;

/// Result of evaluating one notification against the rule set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification<E> {
    NoMatch,
    /// A rule selected `control` for activation.
    Matched { rule: usize, control: E },
    /// The target is an interrupt prompt scope; resolve it in place.
    Prompt,
}

/// What a call to [`Engine::classify`](crate::Engine::classify) did with a
/// batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Dropped whole because the debounce window had not elapsed.
    Throttled,
    /// Every notification was examined; nothing was dispatched.
    Consumed,
    /// A rule matched at `position`; the rest of the batch was discarded.
    Dispatched { rule: String, position: usize },
    /// An interrupt prompt was dismissed at `position`; the rest of the
    /// batch was discarded.
    Resolved { position: usize },
}

impl BatchOutcome {
    /// Whether this batch initiated an activation.
    #[must_use]
    pub fn acted(&self) -> bool {
        matches!(self, Self::Dispatched { .. } | Self::Resolved { .. })
    }
}

impl fmt::Display for BatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Throttled => write!(f, "throttled"),
            Self::Consumed => write!(f, "consumed"),
            Self::Dispatched { rule, position } => write!(f, "dispatched {rule} at {position}"),
            Self::Resolved { position } => write!(f, "resolved prompt at {position}"),
        }
    }
}

/// What a polling tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Location unchanged since the last successful scan; nothing scanned.
    Unchanged,
    /// Location changed and an interrupt was dismissed; location recorded.
    Resolved,
    /// Location changed but nothing was found; the next tick scans again.
    Pending,
}
