//! Domain entities for audio/video setups.
//!
//! This module contains pure business logic with no infrastructure dependencies.
//!
//! # Entity tree
//!
//! ```text
//! Setup (aggregate root, Editable | Deleted)
//!  └─ Screen (Editable | Deleted), non-empty list of
//!      └─ Segment (no lifecycle; simply removed from its screen)
//! ```
//!
//! Every mutator is a pure function: it consumes an entity value and returns
//! either the next value or a [`error::DomainError`].  Nothing here performs
//! I/O, logs, or touches shared state, so the types are trivially `Send + Sync`.

pub mod error;
pub mod screen;
pub mod segment;
pub mod setup;
pub mod user;
/// Smart constructors for identifiers and bounded quantities.
pub mod values;
