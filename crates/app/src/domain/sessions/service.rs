//! Sessions service.

use async_trait::async_trait;
use mockall::automock;

use crate::domain::{
    sessions::{
        errors::SessionsServiceError,
        records::{IssuedSession, SessionRecord},
    },
    users::records::UserId,
};

#[automock]
#[async_trait]
/// Session binder storage.
///
/// Unknown, malformed and expired tokens all resolve to `None`.
pub trait SessionsService: Send + Sync {
    /// Start a session for a user and return its token.
    async fn issue_session(&self, user: UserId) -> Result<IssuedSession, SessionsServiceError>;

    /// Look up a live session. Expired sessions are purged on access.
    async fn resolve_session(
        &self,
        token: &str,
    ) -> Result<Option<SessionRecord>, SessionsServiceError>;

    /// Purge a session. Returns whether one existed.
    async fn revoke_session(&self, token: &str) -> Result<bool, SessionsServiceError>;

    /// Drop every expired session and return how many were removed.
    async fn purge_expired(&self) -> Result<usize, SessionsServiceError>;
}
