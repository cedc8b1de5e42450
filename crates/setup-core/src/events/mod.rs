//! Domain events and their JSON encoding.
//!
//! - **`types`** – the ten event payloads, the [`DomainEvent`] /
//!   [`EntityEvent`] enums and the wire tags.
//! - **`codec`** – versioned `{ type, version, payload }` envelopes, used by
//!   whatever stores the event log.

pub mod codec;
pub mod types;

pub use codec::{decode_event, decode_history, encode_event, encode_history, CodecError};
pub use types::{
    DanteDisabled, DanteEnabled, DomainEvent, DomainEventType, EntityEvent, ScreenAdded,
    ScreenRemoved, ScreenUpdated, SegmentAdded, SegmentRemoved, SegmentUpdated, SetupAdded,
    SetupRemoved, EVENT_SCHEMA_VERSION,
};
