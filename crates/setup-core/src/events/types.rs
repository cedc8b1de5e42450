//! All domain event types.
//!
//! Every event is an immutable record `{ type, version, payload }`.  The
//! payload structs below are the `payload` part; the tag is
//! [`DomainEventType`] and the schema version is [`EVENT_SCHEMA_VERSION`].
//!
//! Two enums group the payloads:
//!
//! - [`DomainEvent`] – anything that may appear in an event log.
//! - [`EntityEvent`] – every event except [`SetupAdded`].  Only these can be
//!   fed to [`crate::reducer::reduce_domain_event`]; `SetupAdded` creates a
//!   log instead of transforming one.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::screen::Screen;
use crate::domain::segment::Segment;
use crate::domain::user::AuditUser;
use crate::domain::values::{
    ScreenHeight, ScreenUuid, SegmentAudioChannel, SegmentUuid, SegmentWidth, SetupUuid,
};

// ── Schema constants ──────────────────────────────────────────────────────────

/// Current schema version of every event payload.
pub const EVENT_SCHEMA_VERSION: u16 = 1;

// ── Event tags ────────────────────────────────────────────────────────────────

/// Tag identifying the kind of an event on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEventType {
    SegmentAdded,
    SegmentUpdated,
    SegmentRemoved,
    ScreenAdded,
    ScreenUpdated,
    ScreenRemoved,
    SetupAdded,
    DanteEnabled,
    DanteDisabled,
    SetupRemoved,
}

impl DomainEventType {
    pub const ALL: [DomainEventType; 10] = [
        DomainEventType::SegmentAdded,
        DomainEventType::SegmentUpdated,
        DomainEventType::SegmentRemoved,
        DomainEventType::ScreenAdded,
        DomainEventType::ScreenUpdated,
        DomainEventType::ScreenRemoved,
        DomainEventType::SetupAdded,
        DomainEventType::DanteEnabled,
        DomainEventType::DanteDisabled,
        DomainEventType::SetupRemoved,
    ];

    /// The wire tag, e.g. `"SEGMENT_ADDED"`.
    pub fn as_str(self) -> &'static str {
        match self {
            DomainEventType::SegmentAdded => "SEGMENT_ADDED",
            DomainEventType::SegmentUpdated => "SEGMENT_UPDATED",
            DomainEventType::SegmentRemoved => "SEGMENT_REMOVED",
            DomainEventType::ScreenAdded => "SCREEN_ADDED",
            DomainEventType::ScreenUpdated => "SCREEN_UPDATED",
            DomainEventType::ScreenRemoved => "SCREEN_REMOVED",
            DomainEventType::SetupAdded => "SETUP_ADDED",
            DomainEventType::DanteEnabled => "DANTE_ENABLED",
            DomainEventType::DanteDisabled => "DANTE_DISABLED",
            DomainEventType::SetupRemoved => "SETUP_REMOVED",
        }
    }

    /// Parses a wire tag.  Returns `None` for unknown tags.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == tag)
    }
}

impl fmt::Display for DomainEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Setup payloads ────────────────────────────────────────────────────────────

/// A new setup was created with its initial screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupAdded {
    pub user: AuditUser,
    pub uuid: SetupUuid,
    pub dante_enabled: bool,
    pub screens: Vec<Screen>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupRemoved {
    pub user: AuditUser,
    pub uuid: SetupUuid,
}

/// Dante was switched on; every live segment receives `default_audio_channel`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DanteEnabled {
    pub user: AuditUser,
    pub uuid: SetupUuid,
    pub default_audio_channel: SegmentAudioChannel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DanteDisabled {
    pub user: AuditUser,
    pub uuid: SetupUuid,
}

// ── Screen payloads ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenAdded {
    pub user: AuditUser,
    pub uuid: ScreenUuid,
    pub height: ScreenHeight,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenUpdated {
    pub user: AuditUser,
    pub uuid: ScreenUuid,
    pub height: ScreenHeight,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenRemoved {
    pub user: AuditUser,
    pub uuid: ScreenUuid,
}

// ── Segment payloads ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentAdded {
    pub user: AuditUser,
    pub uuid: SegmentUuid,
    pub screen_uuid: ScreenUuid,
    pub width: SegmentWidth,
    pub audio_channel: Option<SegmentAudioChannel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentUpdated {
    pub user: AuditUser,
    pub uuid: SegmentUuid,
    pub width: SegmentWidth,
    pub audio_channel: Option<SegmentAudioChannel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentRemoved {
    pub user: AuditUser,
    pub uuid: SegmentUuid,
}

// ── Event enums ───────────────────────────────────────────────────────────────

/// Every event the reducer can apply to an existing setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityEvent {
    SetupRemoved(SetupRemoved),
    DanteEnabled(DanteEnabled),
    DanteDisabled(DanteDisabled),
    ScreenAdded(ScreenAdded),
    ScreenUpdated(ScreenUpdated),
    ScreenRemoved(ScreenRemoved),
    SegmentAdded(SegmentAdded),
    SegmentUpdated(SegmentUpdated),
    SegmentRemoved(SegmentRemoved),
}

/// Any event that can appear in a setup's event log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainEvent {
    SetupAdded(SetupAdded),
    SetupRemoved(SetupRemoved),
    DanteEnabled(DanteEnabled),
    DanteDisabled(DanteDisabled),
    ScreenAdded(ScreenAdded),
    ScreenUpdated(ScreenUpdated),
    ScreenRemoved(ScreenRemoved),
    SegmentAdded(SegmentAdded),
    SegmentUpdated(SegmentUpdated),
    SegmentRemoved(SegmentRemoved),
}

impl EntityEvent {
    pub fn event_type(&self) -> DomainEventType {
        match self {
            EntityEvent::SetupRemoved(_) => DomainEventType::SetupRemoved,
            EntityEvent::DanteEnabled(_) => DomainEventType::DanteEnabled,
            EntityEvent::DanteDisabled(_) => DomainEventType::DanteDisabled,
            EntityEvent::ScreenAdded(_) => DomainEventType::ScreenAdded,
            EntityEvent::ScreenUpdated(_) => DomainEventType::ScreenUpdated,
            EntityEvent::ScreenRemoved(_) => DomainEventType::ScreenRemoved,
            EntityEvent::SegmentAdded(_) => DomainEventType::SegmentAdded,
            EntityEvent::SegmentUpdated(_) => DomainEventType::SegmentUpdated,
            EntityEvent::SegmentRemoved(_) => DomainEventType::SegmentRemoved,
        }
    }

    pub fn user(&self) -> &AuditUser {
        match self {
            EntityEvent::SetupRemoved(e) => &e.user,
            EntityEvent::DanteEnabled(e) => &e.user,
            EntityEvent::DanteDisabled(e) => &e.user,
            EntityEvent::ScreenAdded(e) => &e.user,
            EntityEvent::ScreenUpdated(e) => &e.user,
            EntityEvent::ScreenRemoved(e) => &e.user,
            EntityEvent::SegmentAdded(e) => &e.user,
            EntityEvent::SegmentUpdated(e) => &e.user,
            EntityEvent::SegmentRemoved(e) => &e.user,
        }
    }
}

impl DomainEvent {
    pub fn event_type(&self) -> DomainEventType {
        match self {
            DomainEvent::SetupAdded(_) => DomainEventType::SetupAdded,
            DomainEvent::SetupRemoved(_) => DomainEventType::SetupRemoved,
            DomainEvent::DanteEnabled(_) => DomainEventType::DanteEnabled,
            DomainEvent::DanteDisabled(_) => DomainEventType::DanteDisabled,
            DomainEvent::ScreenAdded(_) => DomainEventType::ScreenAdded,
            DomainEvent::ScreenUpdated(_) => DomainEventType::ScreenUpdated,
            DomainEvent::ScreenRemoved(_) => DomainEventType::ScreenRemoved,
            DomainEvent::SegmentAdded(_) => DomainEventType::SegmentAdded,
            DomainEvent::SegmentUpdated(_) => DomainEventType::SegmentUpdated,
            DomainEvent::SegmentRemoved(_) => DomainEventType::SegmentRemoved,
        }
    }

    /// Schema version of the payload; always [`EVENT_SCHEMA_VERSION`] for
    /// events built by this crate.
    pub fn version(&self) -> u16 {
        EVENT_SCHEMA_VERSION
    }

    pub fn user(&self) -> &AuditUser {
        match self {
            DomainEvent::SetupAdded(e) => &e.user,
            DomainEvent::SetupRemoved(e) => &e.user,
            DomainEvent::DanteEnabled(e) => &e.user,
            DomainEvent::DanteDisabled(e) => &e.user,
            DomainEvent::ScreenAdded(e) => &e.user,
            DomainEvent::ScreenUpdated(e) => &e.user,
            DomainEvent::ScreenRemoved(e) => &e.user,
            DomainEvent::SegmentAdded(e) => &e.user,
            DomainEvent::SegmentUpdated(e) => &e.user,
            DomainEvent::SegmentRemoved(e) => &e.user,
        }
    }
}

impl From<EntityEvent> for DomainEvent {
    fn from(event: EntityEvent) -> Self {
        match event {
            EntityEvent::SetupRemoved(e) => DomainEvent::SetupRemoved(e),
            EntityEvent::DanteEnabled(e) => DomainEvent::DanteEnabled(e),
            EntityEvent::DanteDisabled(e) => DomainEvent::DanteDisabled(e),
            EntityEvent::ScreenAdded(e) => DomainEvent::ScreenAdded(e),
            EntityEvent::ScreenUpdated(e) => DomainEvent::ScreenUpdated(e),
            EntityEvent::ScreenRemoved(e) => DomainEvent::ScreenRemoved(e),
            EntityEvent::SegmentAdded(e) => DomainEvent::SegmentAdded(e),
            EntityEvent::SegmentUpdated(e) => DomainEvent::SegmentUpdated(e),
            EntityEvent::SegmentRemoved(e) => DomainEvent::SegmentRemoved(e),
        }
    }
}

impl From<SetupAdded> for DomainEvent {
    fn from(event: SetupAdded) -> Self {
        DomainEvent::SetupAdded(event)
    }
}

/// Fails with the `SetupAdded` payload, the only non-entity event.
impl TryFrom<DomainEvent> for EntityEvent {
    type Error = SetupAdded;

    fn try_from(event: DomainEvent) -> Result<Self, Self::Error> {
        match event {
            DomainEvent::SetupAdded(e) => Err(e),
            DomainEvent::SetupRemoved(e) => Ok(EntityEvent::SetupRemoved(e)),
            DomainEvent::DanteEnabled(e) => Ok(EntityEvent::DanteEnabled(e)),
            DomainEvent::DanteDisabled(e) => Ok(EntityEvent::DanteDisabled(e)),
            DomainEvent::ScreenAdded(e) => Ok(EntityEvent::ScreenAdded(e)),
            DomainEvent::ScreenUpdated(e) => Ok(EntityEvent::ScreenUpdated(e)),
            DomainEvent::ScreenRemoved(e) => Ok(EntityEvent::ScreenRemoved(e)),
            DomainEvent::SegmentAdded(e) => Ok(EntityEvent::SegmentAdded(e)),
            DomainEvent::SegmentUpdated(e) => Ok(EntityEvent::SegmentUpdated(e)),
            DomainEvent::SegmentRemoved(e) => Ok(EntityEvent::SegmentRemoved(e)),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
