//! In-memory history source.
//!
//! Holds histories in a map so tests and embedders can drive
//! [`SetupService`](crate::application::setup_service::SetupService) without
//! touching the file system.

use std::collections::HashMap;

use setup_core::{DomainEvent, SetupUuid};

use crate::application::setup_service::{HistoryError, HistorySource};

/// A [`HistorySource`] backed by a `HashMap`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHistory {
    histories: HashMap<SetupUuid, Vec<DomainEvent>>,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`InMemoryHistory::insert`].
    pub fn with_history(mut self, setup: SetupUuid, events: Vec<DomainEvent>) -> Self {
        self.insert(setup, events);
        self
    }

    /// Stores `events` as the history of `setup`, replacing any previous one.
    pub fn insert(&mut self, setup: SetupUuid, events: Vec<DomainEvent>) {
        self.histories.insert(setup, events);
    }

    pub fn len(&self) -> usize {
        self.histories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.histories.is_empty()
    }
}

impl HistorySource for InMemoryHistory {
    fn load(&self, setup: &SetupUuid) -> Result<Vec<DomainEvent>, HistoryError> {
        self.histories
            .get(setup)
            .cloned()
            .ok_or_else(|| HistoryError::NotFound(setup.clone()))
    }
}
