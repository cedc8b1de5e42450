//! Storage infrastructure.
//!
//! - **`config`** – reads and writes `config.toml` in the platform config
//!   directory, with defaults on first run.
//! - **`history`** – [`history::JsonFileHistory`], one JSON array of event
//!   envelopes per setup.
//! - **`memory`** – [`memory::InMemoryHistory`], a map-backed history source
//!   for tests and embedding.

pub mod config;
pub mod history;
pub mod memory;
