//! In-memory UserRepository

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use auth_core::entities::{NewUser, User, UserCredentials};
use auth_core::error::DomainError;
use auth_core::traits::{RepoResult, UserRepository};

#[derive(Debug, Default)]
struct UserTable {
    next_id: i64,
    rows: HashMap<i64, UserCredentials>,
}

/// User store backed by a `RwLock`ed map.
///
/// Username and email uniqueness is checked and the row inserted under a
/// single write lock, mirroring the unique constraints of the SQL table.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    table: RwLock<UserTable>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub fn len(&self) -> usize {
        self.table.read().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserCredentials>> {
        let table = self.table.read();
        Ok(table.rows.values().find(|c| c.user.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let table = self.table.read();
        Ok(table
            .rows
            .values()
            .find(|c| c.user.username == username)
            .map(|c| c.user.clone()))
    }

    async fn create(&self, user: &NewUser) -> RepoResult<User> {
        let mut table = self.table.write();

        let taken = table
            .rows
            .values()
            .any(|c| c.user.username == user.username || c.user.email == user.email);
        if taken {
            return Err(DomainError::UsernameOrEmailTaken);
        }

        table.next_id += 1;
        let id = table.next_id;
        let now = Utc::now();
        let created = User {
            id,
            username: user.username.clone(),
            email: user.email.clone(),
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(
            id,
            UserCredentials {
                user: created.clone(),
                password_hash: user.password_hash.clone(),
            },
        );

        Ok(created)
    }
}
