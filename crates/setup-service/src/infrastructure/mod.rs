//! Infrastructure layer for the setup service.
//!
//! Contains the file-system adapters: configuration loading and the history
//! sources behind [`crate::application::setup_service::HistorySource`].
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `setup_core`, but MUST NOT be imported by the `application` layer outside
//! of tests.

pub mod storage;
