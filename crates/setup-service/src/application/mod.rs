//! Application layer use cases.
//!
//! Use cases here orchestrate the `setup_core` actions to fulfil a user goal
//! and depend only on the [`setup_service::HistorySource`] abstraction, never
//! on a concrete store.  They perform no file-system access themselves.
//!
//! # Sub-modules
//!
//! - **`setup_service`** – snapshot, replay and plan-update over a history
//!   source.
//!
//! - **`draft`** – the raw JSON shape of a desired setup and its conversion
//!   into a validated [`setup_core::EditableSetup`].

pub mod draft;
pub mod setup_service;
