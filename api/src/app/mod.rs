//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities and the repository ports.

pub mod media_service;
pub mod tweet_service;
pub mod user_service;

pub use media_service::MediaService;
pub use tweet_service::TweetService;
pub use user_service::{hash_api_key, UserService};
