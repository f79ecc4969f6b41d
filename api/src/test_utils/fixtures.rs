//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use chrono::Utc;

use crate::app::hash_api_key;
use crate::domain::entities::{Media, MediaId, Tweet, TweetId, User, UserId};

/// Create a test user with default values
pub fn test_user() -> User {
    test_user_with_key(1, "test-user", "test-api-key")
}

/// Create a user whose stored hash matches `api_key`
pub fn test_user_with_key(id: i32, name: &str, api_key: &str) -> User {
    User {
        id: UserId(id),
        name: name.to_string(),
        api_key_hash: hash_api_key(api_key),
        created_at: Utc::now(),
    }
}

/// Create a test tweet written by `author_id`
pub fn test_tweet(id: i32, author_id: UserId) -> Tweet {
    Tweet {
        id: TweetId(id),
        content: format!("Test tweet #{}", id),
        author_id,
        created_at: Utc::now(),
    }
}

/// Create an uploaded PNG, optionally already attached
pub fn test_media(id: i32, tweet_id: Option<TweetId>) -> Media {
    Media {
        id: MediaId(id),
        file_name: format!("{}.png", uuid::Uuid::new_v4()),
        content_type: "image/png".to_string(),
        data: b"image content".to_vec(),
        tweet_id,
        created_at: Utc::now(),
    }
}
