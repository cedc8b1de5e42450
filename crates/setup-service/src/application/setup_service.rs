//! SetupService: read-side use cases over a stored event history.
//!
//! The service never appends to a history.  [`SetupService::plan_update`]
//! returns the events an update *would* append, after checking that they fold
//! cleanly onto the replayed state.

use std::path::PathBuf;

use setup_core::{
    get_history_snapshot, update_setup_action, AuditUser, CodecError, DomainError, DomainEvent,
    EditableSetup, Setup, SetupState, SetupUuid, SnapshotError, StateWithEvents,
    UpdateSetupProps,
};
use thiserror::Error;
use tracing::{debug, info};

/// Error type for history lookups.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// No history is stored for the setup.
    #[error("no history stored for setup {0}")]
    NotFound(SetupUuid),

    /// A file system I/O error occurred.
    #[error("I/O error reading history at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored history could not be decoded.
    #[error("history of setup {setup} is malformed: {source}")]
    Malformed {
        setup: SetupUuid,
        #[source]
        source: CodecError,
    },
}

/// Error type for [`SetupService`] operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    History(#[from] HistoryError),

    #[error("replay failed: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("update rejected: {0}")]
    Domain(#[from] DomainError),

    /// The desired setup does not describe the setup being updated.
    #[error("desired setup {desired} does not match setup {requested}")]
    SetupMismatch {
        requested: SetupUuid,
        desired: SetupUuid,
    },
}

/// Supplies the ordered event history of a setup.
///
/// Implementations must return events in log order, starting with the
/// `SetupAdded` event.
pub trait HistorySource {
    /// Loads every stored event of `setup`.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::NotFound`] when nothing is stored for `setup`.
    fn load(&self, setup: &SetupUuid) -> Result<Vec<DomainEvent>, HistoryError>;
}

impl<T: HistorySource + ?Sized> HistorySource for &T {
    fn load(&self, setup: &SetupUuid) -> Result<Vec<DomainEvent>, HistoryError> {
        (**self).load(setup)
    }
}

/// Use cases over the histories of a [`HistorySource`].
pub struct SetupService<H> {
    history: H,
}

impl<H: HistorySource> SetupService<H> {
    pub fn new(history: H) -> Self {
        Self { history }
    }

    /// Rebuilds `setup` as it was after its first `index` events.
    ///
    /// # Errors
    ///
    /// [`ServiceError::History`] when the history cannot be loaded and
    /// [`ServiceError::Snapshot`] when it cannot be replayed (including
    /// `index == 0`).
    pub fn snapshot(&self, setup: &SetupUuid, index: usize) -> Result<Setup, ServiceError> {
        let events = self.history.load(setup)?;
        debug!(%setup, index, total = events.len(), "building snapshot");
        Ok(get_history_snapshot(&events, index)?)
    }

    /// Replays the whole history of `setup`, returning the current state and
    /// the full log.
    ///
    /// # Errors
    ///
    /// Same as [`SetupService::snapshot`].
    pub fn replay(&self, setup: &SetupUuid) -> Result<SetupState, ServiceError> {
        let events = self.history.load(setup)?;
        let state = get_history_snapshot(&events, events.len())?;
        info!(%setup, events = events.len(), deleted = state.is_deleted(), "history replayed");
        Ok(StateWithEvents { state, events })
    }

    /// Computes the events that would bring `setup` to `desired`.
    ///
    /// The events are folded onto the replayed state first, so a plan that
    /// the reducer would reject is reported as an error instead of returned.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::SetupMismatch`] if `desired` has another identifier;
    /// - anything [`SetupService::replay`] returns;
    /// - [`ServiceError::Domain`] with the first rejected event.
    pub fn plan_update(
        &self,
        setup: &SetupUuid,
        user: AuditUser,
        desired: EditableSetup,
    ) -> Result<Vec<DomainEvent>, ServiceError> {
        if desired.uuid() != setup {
            return Err(ServiceError::SetupMismatch {
                requested: setup.clone(),
                desired: desired.uuid().clone(),
            });
        }

        let current = self.replay(setup)?;
        let stored = current.events.len();
        let updated = update_setup_action(
            UpdateSetupProps {
                user,
                setup: desired,
            },
            &current,
        )?;

        let planned = updated.events[stored..].to_vec();
        info!(%setup, planned = planned.len(), "update planned");
        Ok(planned)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::memory::InMemoryHistory;
    use setup_core::{
        create_setup_action, CreateSetupProps, DomainEventType, EditableScreen, Screen,
        ScreenHeight, ScreenUuid, Segment, SegmentUuid, SegmentWidth,
    };

    fn user() -> AuditUser {
        AuditUser::new("user-uuid", "user@example.com")
    }

    fn screen(height: i64) -> Screen {
        Screen::Editable(
            EditableScreen::new(
                ScreenUuid::new("screen"),
                ScreenHeight::new(height).unwrap(),
                vec![Segment::create(
                    SegmentUuid::new("seg"),
                    SegmentWidth::new(100).unwrap(),
                    None,
                )],
            )
            .unwrap(),
        )
    }

    fn service_with_setup() -> SetupService<InMemoryHistory> {
        let created = create_setup_action(CreateSetupProps {
            user: user(),
            uuid: SetupUuid::new("hall"),
            dante_enabled: false,
            screens: vec![screen(100)],
        })
        .unwrap();
        let history = InMemoryHistory::new().with_history(SetupUuid::new("hall"), created.events);
        SetupService::new(history)
    }

    fn desired(uuid: &str, height: i64) -> EditableSetup {
        EditableSetup::new(SetupUuid::new(uuid), false, vec![screen(height)]).unwrap()
    }

    // ── snapshot / replay ─────────────────────────────────────────────────────

    #[test]
    fn test_snapshot_of_unknown_setup_is_not_found() {
        let service = service_with_setup();
        let result = service.snapshot(&SetupUuid::new("ghost"), 1);
        assert!(matches!(
            result,
            Err(ServiceError::History(HistoryError::NotFound(_)))
        ));
    }

    #[test]
    fn test_snapshot_index_zero_is_snapshot_error() {
        let service = service_with_setup();
        let result = service.snapshot(&SetupUuid::new("hall"), 0);
        assert!(matches!(
            result,
            Err(ServiceError::Snapshot(SnapshotError::EmptyHistory))
        ));
    }

    #[test]
    fn test_replay_returns_state_and_full_log() {
        let service = service_with_setup();
        let state = service.replay(&SetupUuid::new("hall")).unwrap();
        assert_eq!(state.events.len(), 1);
        assert_eq!(state.state.screens()[0].height().get(), 100);
    }

    // ── plan_update ───────────────────────────────────────────────────────────

    #[test]
    fn test_plan_update_returns_only_new_events() {
        let service = service_with_setup();

        let planned = service
            .plan_update(&SetupUuid::new("hall"), user(), desired("hall", 300))
            .unwrap();

        let tags: Vec<_> = planned.iter().map(DomainEvent::event_type).collect();
        assert_eq!(tags, vec![DomainEventType::ScreenUpdated]);
    }

    #[test]
    fn test_plan_update_with_mismatched_uuid_fails() {
        let service = service_with_setup();
        let result = service.plan_update(&SetupUuid::new("hall"), user(), desired("other", 300));
        assert!(matches!(result, Err(ServiceError::SetupMismatch { .. })));
    }

    #[test]
    fn test_plan_update_without_changes_is_empty() {
        let service = service_with_setup();
        let planned = service
            .plan_update(&SetupUuid::new("hall"), user(), desired("hall", 100))
            .unwrap();
        assert!(planned.is_empty());
    }
}
