//! Use-case functions built on the reducer.
//!
//! | Action | Emits |
//! |---|---|
//! | [`create_setup_action`] | `SetupAdded` |
//! | [`delete_setup_action`] | `SetupRemoved` |
//! | [`update_setup_action`] | the diff between the current and the desired setup |
//! | [`get_history_snapshot`] | nothing; replays a stored history |

pub mod create_setup;
pub mod delete_setup;
pub mod history_snapshot;
pub mod update_setup;

pub use create_setup::create_setup_action;
pub use delete_setup::{delete_setup_action, DeleteSetupProps};
pub use history_snapshot::{get_history_snapshot, SnapshotError};
pub use update_setup::{plan_setup_update, update_setup_action, UpdateSetupProps};
