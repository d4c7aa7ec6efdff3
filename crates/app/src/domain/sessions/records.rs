//! Session Records

use std::fmt;

use jiff::Timestamp;

use crate::domain::users::records::UserId;

/// Session Record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionRecord {
    pub user_id: UserId,
    pub expires_at: Timestamp,
}

impl SessionRecord {
    #[must_use]
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        self.expires_at <= now
    }
}

/// A freshly issued session. `token` is only ever available here.
#[derive(Clone)]
pub struct IssuedSession {
    pub token: String,
    pub expires_at: Timestamp,
}

impl fmt::Debug for IssuedSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedSession")
            .field("token", &"**redacted**")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
