//! Point-in-time reconstruction of a setup from its event history.

use thiserror::Error;

use crate::domain::error::DomainError;
use crate::domain::setup::{EditableSetup, Setup};
use crate::events::types::{DomainEvent, DomainEventType, EntityEvent};
use crate::reducer::{apply, StateWithEvents};

/// Errors that can occur while replaying a history.
#[derive(Debug, Error, PartialEq)]
pub enum SnapshotError {
    #[error("can not create snapshot from empty history")]
    EmptyHistory,

    /// The history is empty or does not start with `SETUP_ADDED`.
    #[error("history must start with SETUP_ADDED, found {found:?}")]
    MissingSetupAdded { found: Option<DomainEventType> },

    /// A second `SETUP_ADDED` appears at `position` inside the replayed range.
    #[error("unexpected SETUP_ADDED at position {position}")]
    UnexpectedSetupAdded { position: usize },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Rebuilds the setup as it was after the first `index` events.
///
/// `events[0]` builds the initial setup; `events[1..index]` are then folded
/// through the reducer.  An `index` at or beyond the history length replays
/// everything.
///
/// # Errors
///
/// - [`SnapshotError::EmptyHistory`] when `index == 0`;
/// - [`SnapshotError::MissingSetupAdded`] when the first event is absent or
///   not `SetupAdded`;
/// - [`SnapshotError::UnexpectedSetupAdded`] when a later event in range is
///   `SetupAdded`;
/// - [`SnapshotError::Domain`] with the first reducer failure.
pub fn get_history_snapshot(events: &[DomainEvent], index: usize) -> Result<Setup, SnapshotError> {
    if index == 0 {
        return Err(SnapshotError::EmptyHistory);
    }

    let added = match events.first() {
        Some(DomainEvent::SetupAdded(added)) => added,
        other => {
            return Err(SnapshotError::MissingSetupAdded {
                found: other.map(DomainEvent::event_type),
            })
        }
    };

    let initial = EditableSetup::new(
        added.uuid.clone(),
        added.dante_enabled,
        added.screens.clone(),
    )?;
    let mut state = StateWithEvents {
        state: Setup::Editable(initial),
        events: Vec::new(),
    };

    let end = index.min(events.len());
    for (position, event) in events.iter().enumerate().take(end).skip(1) {
        let entity = EntityEvent::try_from(event.clone())
            .map_err(|_| SnapshotError::UnexpectedSetupAdded { position })?;
        state = apply(state, entity)?;
    }

    Ok(state.state)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
