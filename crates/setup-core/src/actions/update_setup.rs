//! Diff-based update: compares the current setup with a desired one and
//! folds the resulting events.
//!
//! Emission order:
//!
//! 1. `DanteEnabled` (default channel 1) or `DanteDisabled` when the flag differs.
//! 2. For each desired screen, in order:
//!    - not in the current setup → `ScreenAdded` with all of its segments;
//!    - otherwise `ScreenUpdated` if the height differs, then the segment diff:
//!      `SegmentAdded` / `SegmentUpdated` for each desired segment, then
//!      `SegmentRemoved` for each current segment that disappeared.
//! 3. `ScreenRemoved` for each current screen missing from the desired setup.
//!
//! The diff is computed once against the state before folding, so it does not
//! see the effect of its own earlier events.  For example enabling Dante emits
//! `DanteEnabled` and then a `SegmentUpdated` per segment carrying the desired
//! channel.

use tracing::debug;

use crate::domain::error::DomainError;
use crate::domain::screen::Screen;
use crate::domain::segment::Segment;
use crate::domain::setup::{EditableSetup, Setup};
use crate::domain::user::AuditUser;
use crate::domain::values::{ScreenUuid, SegmentAudioChannel};
use crate::events::types::{
    DanteDisabled, DanteEnabled, EntityEvent, ScreenAdded, ScreenRemoved, ScreenUpdated,
    SegmentAdded, SegmentRemoved, SegmentUpdated,
};
use crate::reducer::{apply, SetupState};

#[derive(Debug, Clone)]
pub struct UpdateSetupProps {
    pub user: AuditUser,
    /// The desired setup.
    pub setup: EditableSetup,
}

/// Brings `state` in line with `props.setup` by emitting and folding the
/// events of the diff.
///
/// Moving a segment between screens is not supported: the removal half of the
/// move targets the first screen owning the segment id, which may be the one
/// it was just added to.
///
/// # Errors
///
/// The first [`DomainError`] raised while folding; no partial state is
/// returned.
pub fn update_setup_action(
    props: UpdateSetupProps,
    state: &SetupState,
) -> Result<SetupState, DomainError> {
    let events = plan_setup_update(&props, &state.state);
    debug!(
        setup = %props.setup.uuid(),
        events = events.len(),
        "setup update diff computed"
    );
    events.into_iter().try_fold(state.clone(), apply)
}

/// Computes the events [`update_setup_action`] would fold, without applying
/// them.
pub fn plan_setup_update(props: &UpdateSetupProps, current: &Setup) -> Vec<EntityEvent> {
    let mut events = dante_updates(props, current);
    events.extend(screen_updates(
        &props.user,
        props.setup.screens(),
        current.screens(),
    ));
    events
}

// ── Private helpers ───────────────────────────────────────────────────────────

fn dante_updates(props: &UpdateSetupProps, current: &Setup) -> Vec<EntityEvent> {
    let desired = &props.setup;
    if desired.dante_enabled() == current.dante_enabled() {
        return Vec::new();
    }

    let event = if desired.dante_enabled() {
        EntityEvent::DanteEnabled(DanteEnabled {
            user: props.user.clone(),
            uuid: desired.uuid().clone(),
            default_audio_channel: SegmentAudioChannel::DANTE_DEFAULT,
        })
    } else {
        EntityEvent::DanteDisabled(DanteDisabled {
            user: props.user.clone(),
            uuid: desired.uuid().clone(),
        })
    };
    vec![event]
}

fn screen_updates(user: &AuditUser, desired: &[Screen], current: &[Screen]) -> Vec<EntityEvent> {
    let mut events = Vec::new();

    for screen in desired {
        match current.iter().find(|old| old.uuid() == screen.uuid()) {
            None => events.push(EntityEvent::ScreenAdded(ScreenAdded {
                user: user.clone(),
                uuid: screen.uuid().clone(),
                height: screen.height(),
                segments: screen.segments().to_vec(),
            })),
            Some(old) => {
                if old.height() != screen.height() {
                    events.push(EntityEvent::ScreenUpdated(ScreenUpdated {
                        user: user.clone(),
                        uuid: screen.uuid().clone(),
                        height: screen.height(),
                    }));
                }
                events.extend(segment_updates(
                    user,
                    screen.uuid(),
                    screen.segments(),
                    old.segments(),
                ));
            }
        }
    }

    events.extend(
        current
            .iter()
            .filter(|old| !desired.iter().any(|screen| screen.uuid() == old.uuid()))
            .map(|old| {
                EntityEvent::ScreenRemoved(ScreenRemoved {
                    user: user.clone(),
                    uuid: old.uuid().clone(),
                })
            }),
    );
    events
}

fn segment_updates(
    user: &AuditUser,
    screen_uuid: &ScreenUuid,
    desired: &[Segment],
    current: &[Segment],
) -> Vec<EntityEvent> {
    let added_or_updated = desired.iter().filter_map(|segment| {
        match current.iter().find(|old| old.uuid == segment.uuid) {
            None => Some(EntityEvent::SegmentAdded(SegmentAdded {
                user: user.clone(),
                uuid: segment.uuid.clone(),
                screen_uuid: screen_uuid.clone(),
                width: segment.width,
                audio_channel: segment.audio_channel,
            })),
            Some(old) if old.same_properties(segment) => None,
            Some(_) => Some(EntityEvent::SegmentUpdated(SegmentUpdated {
                user: user.clone(),
                uuid: segment.uuid.clone(),
                width: segment.width,
                audio_channel: segment.audio_channel,
            })),
        }
    });

    let removed = current
        .iter()
        .filter(|old| !desired.iter().any(|segment| segment.uuid == old.uuid))
        .map(|old| {
            EntityEvent::SegmentRemoved(SegmentRemoved {
                user: user.clone(),
                uuid: old.uuid.clone(),
            })
        });

    added_or_updated.chain(removed).collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
