//! JSON codec for domain events.
//!
//! Wire format of a single event (the "envelope"):
//!
//! ```json
//! { "type": "SCREEN_UPDATED", "version": 1, "payload": { "user": {..}, "uuid": "..", "height": 200 } }
//! ```
//!
//! A history is a JSON array of envelopes in log order.  Decoding validates the
//! tag and the schema version before the payload is deserialized, and the
//! payload itself goes through the value-type smart constructors, so a decoded
//! event never carries an out-of-range number.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::types::{DomainEvent, DomainEventType, EVENT_SCHEMA_VERSION};

/// Errors that can occur while encoding or decoding events.
#[derive(Debug, Error, PartialEq)]
pub enum CodecError {
    /// The input is not a JSON envelope `{ type, version, payload }`.
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// The `type` field is not a known event tag.
    #[error("unknown event type: {0}")]
    UnknownEventType(String),

    /// The `version` field is not [`EVENT_SCHEMA_VERSION`].
    #[error("unsupported schema version {found} for {event_type} (expected {EVENT_SCHEMA_VERSION})")]
    UnsupportedVersion {
        event_type: DomainEventType,
        found: u16,
    },

    /// The payload does not match its event type (missing field, invalid value, ...).
    #[error("malformed {event_type} payload: {reason}")]
    MalformedPayload {
        event_type: DomainEventType,
        reason: String,
    },
}

/// Envelope with an undecoded payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EventEnvelope {
    #[serde(rename = "type")]
    event_type: String,
    version: u16,
    payload: Value,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Encodes one event as its JSON envelope.
///
/// # Errors
///
/// Returns [`CodecError::MalformedPayload`] if the payload cannot be
/// represented as JSON.
///
/// # Examples
///
/// ```rust
/// use setup_core::events::{decode_event, encode_event, DomainEvent, SetupRemoved};
/// use setup_core::{AuditUser, SetupUuid};
///
/// let event = DomainEvent::SetupRemoved(SetupRemoved {
///     user: AuditUser::new("u-1", "ops@example.com"),
///     uuid: SetupUuid::new("stage-left"),
/// });
/// let json = encode_event(&event).unwrap();
/// assert!(json.contains("\"type\":\"SETUP_REMOVED\""));
/// assert_eq!(decode_event(&json).unwrap(), event);
/// ```
pub fn encode_event(event: &DomainEvent) -> Result<String, CodecError> {
    let envelope = to_envelope(event)?;
    serde_json::to_string(&envelope).map_err(|e| CodecError::MalformedPayload {
        event_type: event.event_type(),
        reason: e.to_string(),
    })
}

/// Decodes one event from its JSON envelope.
///
/// # Errors
///
/// Returns [`CodecError`] if the envelope, tag, version or payload is invalid.
pub fn decode_event(json: &str) -> Result<DomainEvent, CodecError> {
    let envelope: EventEnvelope =
        serde_json::from_str(json).map_err(|e| CodecError::MalformedEnvelope(e.to_string()))?;
    from_envelope(envelope)
}

/// Encodes a whole history as a JSON array of envelopes.
///
/// # Errors
///
/// Returns the first [`CodecError`] raised by any event.
pub fn encode_history(events: &[DomainEvent]) -> Result<String, CodecError> {
    let envelopes = events
        .iter()
        .map(to_envelope)
        .collect::<Result<Vec<_>, _>>()?;
    serde_json::to_string_pretty(&envelopes)
        .map_err(|e| CodecError::MalformedEnvelope(e.to_string()))
}

/// Decodes a JSON array of envelopes, preserving order.
///
/// # Errors
///
/// Returns the first [`CodecError`] raised by any element.
pub fn decode_history(json: &str) -> Result<Vec<DomainEvent>, CodecError> {
    let envelopes: Vec<EventEnvelope> =
        serde_json::from_str(json).map_err(|e| CodecError::MalformedEnvelope(e.to_string()))?;
    envelopes.into_iter().map(from_envelope).collect()
}

// ── Private helpers ───────────────────────────────────────────────────────────

fn to_envelope(event: &DomainEvent) -> Result<EventEnvelope, CodecError> {
    let payload = match event {
        DomainEvent::SetupAdded(p) => serde_json::to_value(p),
        DomainEvent::SetupRemoved(p) => serde_json::to_value(p),
        DomainEvent::DanteEnabled(p) => serde_json::to_value(p),
        DomainEvent::DanteDisabled(p) => serde_json::to_value(p),
        DomainEvent::ScreenAdded(p) => serde_json::to_value(p),
        DomainEvent::ScreenUpdated(p) => serde_json::to_value(p),
        DomainEvent::ScreenRemoved(p) => serde_json::to_value(p),
        DomainEvent::SegmentAdded(p) => serde_json::to_value(p),
        DomainEvent::SegmentUpdated(p) => serde_json::to_value(p),
        DomainEvent::SegmentRemoved(p) => serde_json::to_value(p),
    }
    .map_err(|e| CodecError::MalformedPayload {
        event_type: event.event_type(),
        reason: e.to_string(),
    })?;

    Ok(EventEnvelope {
        event_type: event.event_type().as_str().to_string(),
        version: event.version(),
        payload,
    })
}

fn from_envelope(envelope: EventEnvelope) -> Result<DomainEvent, CodecError> {
    let event_type = DomainEventType::from_tag(&envelope.event_type)
        .ok_or_else(|| CodecError::UnknownEventType(envelope.event_type.clone()))?;

    if envelope.version != EVENT_SCHEMA_VERSION {
        return Err(CodecError::UnsupportedVersion {
            event_type,
            found: envelope.version,
        });
    }

    let payload = envelope.payload;
    let event = match event_type {
        DomainEventType::SetupAdded => DomainEvent::SetupAdded(payload_as(event_type, payload)?),
        DomainEventType::SetupRemoved => {
            DomainEvent::SetupRemoved(payload_as(event_type, payload)?)
        }
        DomainEventType::DanteEnabled => {
            DomainEvent::DanteEnabled(payload_as(event_type, payload)?)
        }
        DomainEventType::DanteDisabled => {
            DomainEvent::DanteDisabled(payload_as(event_type, payload)?)
        }
        DomainEventType::ScreenAdded => DomainEvent::ScreenAdded(payload_as(event_type, payload)?),
        DomainEventType::ScreenUpdated => {
            DomainEvent::ScreenUpdated(payload_as(event_type, payload)?)
        }
        DomainEventType::ScreenRemoved => {
            DomainEvent::ScreenRemoved(payload_as(event_type, payload)?)
        }
        DomainEventType::SegmentAdded => {
            DomainEvent::SegmentAdded(payload_as(event_type, payload)?)
        }
        DomainEventType::SegmentUpdated => {
            DomainEvent::SegmentUpdated(payload_as(event_type, payload)?)
        }
        DomainEventType::SegmentRemoved => {
            DomainEvent::SegmentRemoved(payload_as(event_type, payload)?)
        }
    };
    Ok(event)
}

fn payload_as<T: DeserializeOwned>(
    event_type: DomainEventType,
    payload: Value,
) -> Result<T, CodecError> {
    serde_json::from_value(payload).map_err(|e| CodecError::MalformedPayload {
        event_type,
        reason: e.to_string(),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
