//! Refresh session entity
//!
//! One row per issued refresh token that has not been rotated, logged out,
//! or expired. Rows are inserted and deleted, never updated.

use chrono::{DateTime, Utc};

use crate::value_objects::Fingerprint;

/// An outstanding refresh token bound to the device that received it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshSession {
    pub id: i64,
    pub fingerprint: Fingerprint,
    pub refresh_token: String,
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl RefreshSession {
    /// Whether the session was issued to the given client context
    #[inline]
    pub fn is_bound_to(&self, fingerprint: &Fingerprint) -> bool {
        self.fingerprint == *fingerprint
    }

    /// Whether the refresh token backing this session has expired
    #[inline]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Values needed to insert a refresh session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRefreshSession {
    pub fingerprint: Fingerprint,
    pub refresh_token: String,
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
}

impl NewRefreshSession {
    pub fn new(
        fingerprint: Fingerprint,
        refresh_token: impl Into<String>,
        user_id: i64,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            fingerprint,
            refresh_token: refresh_token.into(),
            user_id,
            expires_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn session(fingerprint: &str, expires_at: DateTime<Utc>) -> RefreshSession {
        RefreshSession {
            id: 1,
            fingerprint: Fingerprint::new(fingerprint),
            refresh_token: "token".to_string(),
            user_id: 42,
            expires_at,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_bound_to_same_fingerprint() {
        let s = session("F1", Utc::now() + Duration::days(15));
        assert!(s.is_bound_to(&Fingerprint::new("F1")));
        assert!(!s.is_bound_to(&Fingerprint::new("F2")));
    }

    #[test]
    fn test_expiry() {
        let now = Utc::now();
        assert!(session("F1", now - Duration::seconds(1)).is_expired_at(now));
        assert!(session("F1", now).is_expired_at(now));
        assert!(!session("F1", now + Duration::seconds(1)).is_expired_at(now));
    }
}
