//! In-memory sessions store.

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::{
    sessions::{
        SessionsService,
        errors::SessionsServiceError,
        records::{IssuedSession, SessionRecord},
        token::{SessionKey, SessionToken},
    },
    users::records::UserId,
};

/// Sessions kept in process memory, keyed by token digest.
#[derive(Debug)]
pub struct MemorySessionsService {
    ttl: SignedDuration,
    sessions: RwLock<FxHashMap<SessionKey, SessionRecord>>,
}

impl MemorySessionsService {
    #[must_use]
    pub fn new(ttl: SignedDuration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(FxHashMap::default()),
        }
    }

    fn key(token: &str) -> Option<SessionKey> {
        token.parse::<SessionToken>().ok().map(|token| token.key())
    }
}

#[async_trait]
impl SessionsService for MemorySessionsService {
    async fn issue_session(&self, user: UserId) -> Result<IssuedSession, SessionsServiceError> {
        let token = SessionToken::generate();
        let now = Timestamp::now();
        let expires_at = now.checked_add(self.ttl)?;

        let mut sessions = self.sessions.write().await;

        // Abandoned sessions are never presented again, so sweep them here.
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired_at(now));
        let swept = before - sessions.len();

        sessions.insert(
            token.key(),
            SessionRecord {
                user_id: user,
                expires_at,
            },
        );

        drop(sessions);

        debug!(user_id = %user, swept, "session issued");

        Ok(IssuedSession {
            token: token.encode(),
            expires_at,
        })
    }

    async fn resolve_session(
        &self,
        token: &str,
    ) -> Result<Option<SessionRecord>, SessionsServiceError> {
        let Some(key) = Self::key(token) else {
            return Ok(None);
        };

        let now = Timestamp::now();

        let session = self.sessions.read().await.get(&key).copied();

        match session {
            Some(session) if session.is_expired_at(now) => {
                self.sessions.write().await.remove(&key);

                debug!(user_id = %session.user_id, "expired session purged");

                Ok(None)
            }
            session => Ok(session),
        }
    }

    async fn revoke_session(&self, token: &str) -> Result<bool, SessionsServiceError> {
        let Some(key) = Self::key(token) else {
            return Ok(false);
        };

        Ok(self.sessions.write().await.remove(&key).is_some())
    }

    async fn purge_expired(&self) -> Result<usize, SessionsServiceError> {
        let now = Timestamp::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();

        sessions.retain(|_, session| !session.is_expired_at(now));

        Ok(before - sessions.len())
    }
}
