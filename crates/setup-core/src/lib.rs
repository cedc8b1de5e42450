//! # setup-core
//!
//! Event-sourced domain model for audio/video setups.
//!
//! A *setup* is a set of *screens*, each split into horizontal *segments*.
//! When the setup routes audio over Dante, every segment carries an audio
//! channel; otherwise none does.  The setup is never stored directly: it is
//! derived by folding an ordered log of domain events.
//!
//! # Architecture overview
//!
//! - **`domain`** – value types with validated constructors and the
//!   Segment / Screen / Setup entities.  Screens and setups have an
//!   Editable → Deleted lifecycle; only editable values expose mutators.
//!
//! - **`events`** – the ten event payloads and their JSON envelope codec.
//!
//! - **`reducer`** – [`create_initial_setup`] turns a `SetupAdded` into the
//!   first state and [`reduce_domain_event`] applies every later event.
//!
//! - **`actions`** – the use cases: create, delete, diff-based update and
//!   point-in-time history snapshots.
//!
//! Nothing here does I/O.  The crate logs through `tracing` and leaves the
//! choice of subscriber to the binary.

pub mod actions;
pub mod domain;
pub mod events;
pub mod reducer;

// Re-export the most-used types at the crate root so callers can write
// `setup_core::Setup` instead of `setup_core::domain::setup::Setup`.
pub use actions::{
    create_setup_action, delete_setup_action, get_history_snapshot, plan_setup_update,
    update_setup_action, DeleteSetupProps, SnapshotError, UpdateSetupProps,
};
pub use domain::error::{DomainError, ValueError};
pub use domain::screen::{DeletedScreen, EditableScreen, Screen};
pub use domain::segment::Segment;
pub use domain::setup::{DeletedSetup, EditableSetup, Setup};
pub use domain::user::AuditUser;
pub use domain::values::{
    ScreenHeight, ScreenUuid, SegmentAudioChannel, SegmentUuid, SegmentWidth, SetupUuid,
};
pub use events::codec::{decode_event, decode_history, encode_event, encode_history, CodecError};
pub use events::types::{DomainEvent, DomainEventType, EntityEvent};
pub use reducer::{
    create_initial_setup, reduce_domain_event, CreateSetupProps, SetupState, StateWithEvents,
};
