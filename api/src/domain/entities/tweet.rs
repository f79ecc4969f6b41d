//! Tweet domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::media::MediaId;
use super::user::{UserId, UserSummary};

/// Unique identifier for a tweet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TweetId(pub i32);

impl From<i32> for TweetId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TweetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A posted tweet
#[derive(Debug, Clone, Serialize)]
pub struct Tweet {
    pub id: TweetId,
    pub content: String,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl Tweet {
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.author_id == user_id
    }
}

/// Data needed to create a tweet
///
/// `media_ids` are attached in the same transaction the tweet is inserted in.
#[derive(Debug, Clone)]
pub struct NewTweet {
    pub author_id: UserId,
    pub content: String,
    pub media_ids: Vec<MediaId>,
}

/// A like as shown on the timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeSummary {
    pub user_id: UserId,
    pub name: String,
}

/// A tweet as rendered on the timeline
#[derive(Debug, Clone, Serialize)]
pub struct TweetView {
    pub id: TweetId,
    pub content: String,
    /// Download paths, one per attached media
    pub attachments: Vec<String>,
    pub author: UserSummary,
    pub likes: Vec<LikeSummary>,
}

/// Timeline pagination
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    /// `None` returns everything after `offset`
    pub limit: Option<u64>,
    pub offset: u64,
}

/// Order timeline entries: most liked first, newest first on ties.
/// Postgres sorts in SQL; this mirrors it for the in-memory store.
#[cfg(test)]
pub fn timeline_order(a: &TweetView, b: &TweetView) -> std::cmp::Ordering {
    b.likes
        .len()
        .cmp(&a.likes.len())
        .then_with(|| b.id.cmp(&a.id))
}

/// Trim and validate tweet text
pub fn validate_content(content: &str) -> Result<&str, String> {
    let content = content.trim();
    if content.is_empty() {
        return Err("Tweet content must not be empty".to_string());
    }
    Ok(content)
}
