//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;

use crate::domain::entities::{
    Follow, Like, Media, MediaId, NewMedia, NewTweet, NewUser, Page, Tweet, TweetId, TweetView,
    User, UserId, UserSummary,
};
use crate::error::DomainError;

/// Repository for User entities
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Find a user by API key hash
    async fn find_by_api_key_hash(&self, hash: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by name
    async fn find_by_name(&self, name: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user
    ///
    /// Fails with `Conflict` if the name or key hash is already taken.
    async fn create(&self, user: &NewUser) -> Result<User, DomainError>;
}

/// Repository for the follow graph
#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Check whether the edge exists
    async fn exists(&self, follow: &Follow) -> Result<bool, DomainError>;

    /// Create an edge. Fails with `Conflict` on duplicates.
    async fn create(&self, follow: &Follow) -> Result<(), DomainError>;

    /// Delete an edge, returns whether anything was removed
    async fn delete(&self, follow: &Follow) -> Result<bool, DomainError>;

    /// Users following `user_id`, ordered by id
    async fn followers_of(&self, user_id: &UserId) -> Result<Vec<UserSummary>, DomainError>;

    /// Users `user_id` follows, ordered by id
    async fn following_of(&self, user_id: &UserId) -> Result<Vec<UserSummary>, DomainError>;
}

/// Repository for Tweet entities
#[async_trait]
pub trait TweetRepository: Send + Sync {
    /// Find a tweet by ID
    async fn find_by_id(&self, id: &TweetId) -> Result<Option<Tweet>, DomainError>;

    /// Insert a tweet and attach its media in one transaction
    ///
    /// Fails with `Conflict` (and writes nothing) if any media is already
    /// attached to a tweet.
    async fn create(&self, tweet: &NewTweet) -> Result<Tweet, DomainError>;

    /// Delete a tweet with its likes and media, returns whether it existed
    async fn delete(&self, id: &TweetId) -> Result<bool, DomainError>;

    /// Timeline entries, most liked first then newest first
    async fn timeline(&self, page: Page) -> Result<Vec<TweetView>, DomainError>;
}

/// Repository for uploaded media
#[async_trait]
pub trait MediaRepository: Send + Sync {
    /// Store an upload
    async fn create(&self, media: &NewMedia) -> Result<Media, DomainError>;

    /// Find a media by ID, including its bytes
    async fn find_by_id(&self, id: &MediaId) -> Result<Option<Media>, DomainError>;

    /// Which of `ids` exist and the tweet each is attached to, without loading bytes
    async fn find_attachment_state(
        &self,
        ids: &[MediaId],
    ) -> Result<Vec<(MediaId, Option<TweetId>)>, DomainError>;
}

/// Repository for likes
#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Check whether the like exists
    async fn exists(&self, like: &Like) -> Result<bool, DomainError>;

    /// Create a like. Fails with `Conflict` on duplicates.
    async fn create(&self, like: &Like) -> Result<(), DomainError>;

    /// Delete a like, returns whether anything was removed
    async fn delete(&self, like: &Like) -> Result<bool, DomainError>;
}
