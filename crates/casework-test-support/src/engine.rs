//! Stub workflow engine recording listener registrations.

use std::sync::{Arc, Mutex};

use casework_notifications::application::ports::{CaseEngine, CaseEventListener};

/// A case engine that records registered listeners and never calls back.
#[derive(Default)]
pub struct StubCaseEngine {
    listeners: Mutex<Vec<Arc<dyn CaseEventListener>>>,
}

impl StubCaseEngine {
    /// Creates an engine with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of listeners registered so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().unwrap().len()
    }
}

impl CaseEngine for StubCaseEngine {
    fn register_event_listener(&self, listener: Arc<dyn CaseEventListener>) {
        self.listeners.lock().unwrap().push(listener);
    }
}
