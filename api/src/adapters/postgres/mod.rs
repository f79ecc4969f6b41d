//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod connection;
pub mod follow_repo;
pub mod like_repo;
pub mod media_repo;
pub mod schema;
pub mod tweet_repo;
pub mod user_repo;


use sea_orm::{DbErr, SqlErr};

use crate::error::DomainError;

pub use connection::connect_with_retry;
pub use follow_repo::PostgresFollowRepository;
pub use like_repo::PostgresLikeRepository;
pub use media_repo::PostgresMediaRepository;
pub use schema::create_schema;
pub use tweet_repo::PostgresTweetRepository;
pub use user_repo::PostgresUserRepository;

/// Map a SeaORM error, reporting unique violations as `Conflict(conflict_message)`
pub(crate) fn map_db_err(e: DbErr, conflict_message: &str) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            DomainError::Conflict(conflict_message.to_string())
        }
        _ => DomainError::Database(e.to_string()),
    }
}

pub(crate) fn db_err(e: DbErr) -> DomainError {
    DomainError::Database(e.to_string())
}
