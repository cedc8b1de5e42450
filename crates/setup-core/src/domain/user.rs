//! The acting user recorded on every event.

use serde::{Deserialize, Serialize};

/// Identity of whoever triggered an event.
///
/// Supplied by the caller's identity source; the domain attaches it to events
/// for auditing and never validates it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuditUser {
    pub uuid: String,
    pub email: String,
}

impl AuditUser {
    pub fn new(uuid: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            email: email.into(),
        }
    }
}
