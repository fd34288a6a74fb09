/// Tracks the last location at which the polling scanner succeeded.
///
/// The location is only committed after a successful scan, so a navigation
/// whose interrupt has not rendered yet is rescanned on every tick.
#[derive(Debug, Clone)]
pub(crate) struct PollingScanner {
    location: String,
}

impl PollingScanner {
    pub(crate) fn new(initial: String) -> Self {
        Self { location: initial }
    }

    pub(crate) fn has_changed(&self, current: &str) -> bool {
        self.location != current
    }

    pub(crate) fn commit(&mut self, current: String) {
        self.location = current;
    }

    pub(crate) fn location(&self) -> &str {
        &self.location
    }
}
