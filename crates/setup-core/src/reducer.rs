//! Event reducer: the single fold step of the event-sourced setup.
//!
//! # How replay works
//!
//! A setup's history is an ordered list of events.  The first one is always
//! [`SetupAdded`]; it is turned into the initial state by
//! [`create_initial_setup`].  Every later event is an [`EntityEvent`] and is
//! applied with [`reduce_domain_event`]:
//!
//! ```text
//! SetupAdded ──create_initial_setup──► state₀
//! state₀ ──reduce(e₁)──► state₁ ──reduce(e₂)──► state₂ ...
//! ```
//!
//! Each step either returns the next [`SetupState`] (the new setup plus the
//! event appended to the log) or the [`DomainError`] that rejected the event.
//! A rejected event is never appended.  The input state is never modified.

use tracing::{debug, warn};

use crate::domain::error::DomainError;
use crate::domain::screen::Screen;
use crate::domain::setup::{EditableSetup, Setup};
use crate::domain::user::AuditUser;
use crate::domain::values::SetupUuid;
use crate::events::types::{DomainEvent, EntityEvent, SetupAdded};

/// A derived state paired with the events that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateWithEvents<S, E> {
    pub state: S,
    pub events: Vec<E>,
}

/// The state every action and the reducer operate on.
pub type SetupState = StateWithEvents<Setup, DomainEvent>;

/// Input of [`create_initial_setup`].
#[derive(Debug, Clone)]
pub struct CreateSetupProps {
    pub user: AuditUser,
    pub uuid: SetupUuid,
    pub dante_enabled: bool,
    pub screens: Vec<Screen>,
}

/// Builds the initial state of a new setup.
///
/// The returned log is exactly one [`SetupAdded`] event carrying `props`.
///
/// # Errors
///
/// Any [`DomainError`] raised by [`EditableSetup::new`] (Dante rule, empty
/// screen list).
pub fn create_initial_setup(props: CreateSetupProps) -> Result<SetupState, DomainError> {
    let CreateSetupProps {
        user,
        uuid,
        dante_enabled,
        screens,
    } = props;

    let setup = EditableSetup::new(uuid.clone(), dante_enabled, screens.clone())?;
    let added = SetupAdded {
        user,
        uuid,
        dante_enabled,
        screens,
    };

    debug!(setup = %setup.uuid(), "setup created");
    Ok(StateWithEvents {
        state: Setup::Editable(setup),
        events: vec![DomainEvent::SetupAdded(added)],
    })
}

/// Applies one entity event to `state`.
///
/// Every branch first asserts the setup is editable, then runs the matching
/// aggregate mutator.  On success the event is appended to the log.
///
/// # Errors
///
/// - [`DomainError::SetupNotEditable`] if the setup was deleted;
/// - [`DomainError::SegmentNotFound`] for a [`EntityEvent::SegmentRemoved`]
///   whose segment is in no screen;
/// - any error returned by the mutator.
pub fn reduce_domain_event(
    state: &SetupState,
    event: EntityEvent,
) -> Result<SetupState, DomainError> {
    apply(state.clone(), event)
}

/// By-value fold step shared by the reducer and the actions.
pub(crate) fn apply(state: SetupState, event: EntityEvent) -> Result<SetupState, DomainError> {
    let StateWithEvents { state: setup, mut events } = state;
    let setup_uuid = setup.uuid().clone();
    let event_type = event.event_type();

    match next_setup(setup, &event) {
        Ok(next) => {
            debug!(setup = %setup_uuid, event = %event_type, "event applied");
            events.push(event.into());
            Ok(StateWithEvents {
                state: next,
                events,
            })
        }
        Err(err) => {
            warn!(setup = %setup_uuid, event = %event_type, error = %err, "event rejected");
            Err(err)
        }
    }
}

// ── Private helpers ───────────────────────────────────────────────────────────

fn next_setup(setup: Setup, event: &EntityEvent) -> Result<Setup, DomainError> {
    // Checked against the raw screen list, deleted screens included.
    if let EntityEvent::SegmentRemoved(e) = event {
        if !setup
            .screens()
            .iter()
            .any(|screen| screen.contains_segment(&e.uuid))
        {
            return Err(DomainError::SegmentNotFound);
        }
    }

    let editable = setup.into_editable()?;

    match event {
        EntityEvent::SetupRemoved(_) => editable.delete().map(Setup::Deleted),
        EntityEvent::DanteEnabled(e) => editable
            .enable_dante(e.default_audio_channel)
            .map(Setup::Editable),
        EntityEvent::DanteDisabled(_) => editable.disable_dante().map(Setup::Editable),
        EntityEvent::ScreenAdded(e) => editable
            .create_screen(e.uuid.clone(), e.height, e.segments.clone())
            .map(Setup::Editable),
        EntityEvent::ScreenUpdated(e) => editable
            .update_screen_properties(&e.uuid, e.height)
            .map(Setup::Editable),
        EntityEvent::ScreenRemoved(e) => editable.remove_screen(&e.uuid).map(Setup::Editable),
        EntityEvent::SegmentAdded(e) => editable
            .add_segment_to_screen(&e.screen_uuid, e.uuid.clone(), e.width, e.audio_channel)
            .map(Setup::Editable),
        EntityEvent::SegmentUpdated(e) => editable
            .update_segment_properties(&e.uuid, e.width, e.audio_channel)
            .map(Setup::Editable),
        EntityEvent::SegmentRemoved(e) => editable.remove_segment(&e.uuid).map(Setup::Editable),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
