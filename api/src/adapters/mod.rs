//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod postgres;

pub use postgres::{
    connect_with_retry, create_schema, PostgresFollowRepository, PostgresLikeRepository,
    PostgresMediaRepository, PostgresTweetRepository, PostgresUserRepository,
};
