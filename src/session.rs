//! In-memory doctor sessions.
//!
//! The store is created at startup and shared through the application
//! state; sessions do not survive a restart.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "session_id";

#[derive(Debug, Clone, Copy)]
struct Session {
    doctor_id: u32,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<DashMap<String, Session>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Open a session for `doctor_id` and return its opaque token. Expired
    /// sessions are pruned first.
    pub fn create(&self, doctor_id: u32) -> String {
        let now = Utc::now();
        self.prune_at(now);
        let token = Uuid::new_v4().simple().to_string();
        self.sessions.insert(
            token.clone(),
            Session {
                doctor_id,
                created_at: now,
            },
        );
        debug!(doctor_id, "session opened");
        token
    }

    /// Doctor id behind `token`, if the session exists and has not expired.
    pub fn resolve(&self, token: &str) -> Option<u32> {
        self.resolve_at(token, Utc::now())
    }

    fn resolve_at(&self, token: &str, now: DateTime<Utc>) -> Option<u32> {
        let session = *self.sessions.get(token)?;
        if now - session.created_at >= self.ttl {
            self.sessions.remove(token);
            debug!(doctor_id = session.doctor_id, "session expired");
            return None;
        }
        Some(session.doctor_id)
    }

    fn prune_at(&self, now: DateTime<Utc>) {
        let before = self.sessions.len();
        self.sessions.retain(|_, s| now - s.created_at < self.ttl);
        let pruned = before.saturating_sub(self.sessions.len());
        if pruned > 0 {
            debug!(pruned, "expired sessions pruned");
        }
    }

    /// Returns whether a session was removed.
    pub fn revoke(&self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_resolve_revoke() {
        let store = SessionStore::new(Duration::hours(12));
        let token = store.create(7);
        assert_eq!(token.len(), 32);
        assert_eq!(store.resolve(&token), Some(7));
        assert!(store.revoke(&token));
        assert_eq!(store.resolve(&token), None);
        assert!(!store.revoke(&token));
    }

    #[test]
    fn tokens_are_unique() {
        let store = SessionStore::new(Duration::hours(1));
        assert_ne!(store.create(1), store.create(1));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn creating_a_session_prunes_expired_ones() {
        let store = SessionStore::new(Duration::hours(12));
        let stale = store.create(1);
        store.sessions.alter(&stale, |_, mut s| {
            s.created_at = s.created_at - Duration::hours(13);
            s
        });
        let fresh = store.create(2);
        assert_eq!(store.len(), 1);
        assert_eq!(store.resolve(&fresh), Some(2));
        assert_eq!(store.resolve(&stale), None);
    }

    #[test]
    fn expired_sessions_are_evicted() {
        let store = SessionStore::new(Duration::hours(12));
        let token = store.create(3);
        let later = Utc::now() + Duration::hours(13);
        assert_eq!(store.resolve_at(&token, later), None);
        assert!(store.is_empty());
    }

    #[test]
    fn unknown_token_resolves_to_nobody() {
        let store = SessionStore::new(Duration::hours(12));
        assert_eq!(store.resolve("nope"), None);
    }
}
