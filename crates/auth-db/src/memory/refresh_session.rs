//! In-memory RefreshSessionRepository
//!
//! Rows live in a `DashMap` keyed by id with a second map indexing them by
//! token. `DashMap::remove` hands the removed row to exactly one caller, which
//! gives the at-most-once delete the rotation path needs.
//!
//! Lock order: the token index may be held while touching `sessions`, never
//! the other way round.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::{mapref::entry::Entry, DashMap};

use auth_core::entities::{NewRefreshSession, RefreshSession};
use auth_core::error::DomainError;
use auth_core::traits::{RefreshSessionRepository, RepoResult};

/// Session store backed by concurrent maps
#[derive(Debug, Default)]
pub struct InMemoryRefreshSessionRepository {
    sessions: DashMap<i64, RefreshSession>,
    by_token: DashMap<String, i64>,
    next_id: AtomicI64,
}

impl InMemoryRefreshSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Snapshot of a user's sessions
    pub fn sessions_of(&self, user_id: i64) -> Vec<RefreshSession> {
        self.sessions
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect()
    }

    fn remove_id(&self, id: i64) -> bool {
        match self.sessions.remove(&id) {
            Some((_, session)) => {
                self.by_token.remove(&session.refresh_token);
                true
            }
            None => false,
        }
    }

    fn remove_where<F>(&self, predicate: F) -> u64
    where
        F: Fn(&RefreshSession) -> bool,
    {
        let ids: Vec<i64> = self
            .sessions
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| *entry.key())
            .collect();

        ids.into_iter().filter(|id| self.remove_id(*id)).count() as u64
    }
}

#[async_trait]
impl RefreshSessionRepository for InMemoryRefreshSessionRepository {
    async fn create(&self, session: &NewRefreshSession) -> RepoResult<RefreshSession> {
        match self.by_token.entry(session.refresh_token.clone()) {
            Entry::Occupied(_) => Err(DomainError::DuplicateRefreshToken),
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
                let created = RefreshSession {
                    id,
                    fingerprint: session.fingerprint.clone(),
                    refresh_token: session.refresh_token.clone(),
                    user_id: session.user_id,
                    expires_at: session.expires_at,
                    created_at: Utc::now(),
                };
                self.sessions.insert(id, created.clone());
                slot.insert(id);
                Ok(created)
            }
        }
    }

    async fn find_by_token(&self, refresh_token: &str) -> RepoResult<Option<RefreshSession>> {
        let id = self.by_token.get(refresh_token).map(|entry| *entry.value());
        Ok(id.and_then(|id| self.sessions.get(&id).map(|entry| entry.value().clone())))
    }

    async fn delete_by_token(&self, refresh_token: &str) -> RepoResult<bool> {
        match self.by_token.remove(refresh_token) {
            Some((_, id)) => Ok(self.sessions.remove(&id).is_some()),
            None => Ok(false),
        }
    }

    async fn delete_by_id(&self, id: i64) -> RepoResult<bool> {
        Ok(self.remove_id(id))
    }

    async fn delete_by_user(&self, user_id: i64) -> RepoResult<u64> {
        Ok(self.remove_where(|s| s.user_id == user_id))
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> RepoResult<u64> {
        Ok(self.remove_where(|s| s.is_expired_at(now)))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use auth_core::value_objects::Fingerprint;
    use chrono::Duration;

    use super::*;

    fn new_session(token: &str, user_id: i64, ttl: Duration) -> NewRefreshSession {
        NewRefreshSession::new(Fingerprint::new("F1"), token, user_id, Utc::now() + ttl)
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryRefreshSessionRepository::new();
        let created = repo
            .create(&new_session("t1", 1, Duration::days(15)))
            .await
            .unwrap();

        let found = repo.find_by_token("t1").await.unwrap().unwrap();
        assert_eq!(found, created);
        assert!(repo.find_by_token("t2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_token_rejected() {
        let repo = InMemoryRefreshSessionRepository::new();
        repo.create(&new_session("t1", 1, Duration::days(1)))
            .await
            .unwrap();

        let dup = repo.create(&new_session("t1", 2, Duration::days(1))).await;
        assert!(matches!(dup, Err(DomainError::DuplicateRefreshToken)));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_by_token_reports_once() {
        let repo = InMemoryRefreshSessionRepository::new();
        repo.create(&new_session("t1", 1, Duration::days(1)))
            .await
            .unwrap();

        assert!(repo.delete_by_token("t1").await.unwrap());
        assert!(!repo.delete_by_token("t1").await.unwrap());
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_delete_by_id_clears_token_index() {
        let repo = InMemoryRefreshSessionRepository::new();
        let s = repo
            .create(&new_session("t1", 1, Duration::days(1)))
            .await
            .unwrap();

        assert!(repo.delete_by_id(s.id).await.unwrap());
        assert!(repo.find_by_token("t1").await.unwrap().is_none());
        // token can be stored again once its row is gone
        assert!(repo
            .create(&new_session("t1", 1, Duration::days(1)))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_concurrent_delete_by_id_single_winner() {
        let repo = Arc::new(InMemoryRefreshSessionRepository::new());
        let s = repo
            .create(&new_session("t1", 1, Duration::days(1)))
            .await
            .unwrap();

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move { repo.delete_by_id(s.id).await.unwrap() })
            })
            .collect();

        let mut wins = 0;
        for handle in handles {
            if handle.await.unwrap() {
                wins += 1;
            }
        }
        assert_eq!(wins, 1);
    }

    #[tokio::test]
    async fn test_delete_by_user() {
        let repo = InMemoryRefreshSessionRepository::new();
        for token in ["a", "b", "c"] {
            repo.create(&new_session(token, 1, Duration::days(1)))
                .await
                .unwrap();
        }
        repo.create(&new_session("d", 2, Duration::days(1)))
            .await
            .unwrap();

        assert_eq!(repo.delete_by_user(1).await.unwrap(), 3);
        assert!(repo.sessions_of(1).is_empty());
        assert_eq!(repo.sessions_of(2).len(), 1);
    }

    #[tokio::test]
    async fn test_delete_expired() {
        let repo = InMemoryRefreshSessionRepository::new();
        repo.create(&new_session("old", 1, Duration::seconds(-5)))
            .await
            .unwrap();
        repo.create(&new_session("fresh", 1, Duration::days(1)))
            .await
            .unwrap();

        assert_eq!(repo.delete_expired(Utc::now()).await.unwrap(), 1);
        assert!(repo.find_by_token("old").await.unwrap().is_none());
        assert!(repo.find_by_token("fresh").await.unwrap().is_some());
    }
}
