//! Connection pool

mod postgres;

pub use postgres::{create_pool, PoolConfig};
pub use sqlx::postgres::PgPool;
