//! # auth-db
//!
//! Store adapters implementing the `auth-core` repository traits.
//!
//! ## Overview
//!
//! - Connection pool management and schema bootstrap for PostgreSQL
//! - Database models with SQLx `FromRow` derives
//! - Model to entity mappers
//! - PostgreSQL repositories
//! - In-process repositories for tests and local runs
//!
//! ## Usage
//!
//! ```rust,ignore
//! use auth_db::{create_pool, ensure_schema, PgUserRepository, PoolConfig};
//!
//! async fn example() -> Result<(), sqlx::Error> {
//!     let pool = create_pool(&PoolConfig::new("postgres://localhost/auth", 20, 5)).await?;
//!     ensure_schema(&pool).await?;
//!     let user_repo = PgUserRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;
pub mod schema;

// Re-export commonly used types
pub use memory::{InMemoryRefreshSessionRepository, InMemoryUserRepository};
pub use pool::{create_pool, PgPool, PoolConfig};
pub use repositories::{PgRefreshSessionRepository, PgUserRepository};
pub use schema::ensure_schema;
