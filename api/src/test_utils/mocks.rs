//! Mock implementations of port traits
//!
//! In-memory stand-ins for the Postgres repositories. Clones share state, so a
//! tweet repository built from a media repository sees the same uploads.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::domain::entities::{
    timeline_order, Follow, Like, LikeSummary, Media, MediaId, NewMedia, NewTweet, NewUser, Page,
    Tweet, TweetId, TweetView, User, UserId, UserSummary,
};
use crate::domain::ports::{
    FollowRepository, LikeRepository, MediaRepository, TweetRepository, UserRepository,
};
use crate::error::DomainError;

/// Next serial id after the highest one in use
fn next_id<K, V>(map: &HashMap<K, V>, key: impl Fn(&K) -> i32) -> i32 {
    map.keys().map(key).max().unwrap_or(0) + 1
}

// ============================================================================
// In-Memory User Repository
// ============================================================================

#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a user for testing
    pub fn with_user(self, user: User) -> Self {
        self.users.write().unwrap().insert(user.id, user);
        self
    }

    fn summary(&self, id: &UserId) -> UserSummary {
        let users = self.users.read().unwrap();
        UserSummary {
            id: *id,
            name: users.get(id).map(|u| u.name.clone()).unwrap_or_default(),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().unwrap().get(id).cloned())
    }

    async fn find_by_api_key_hash(&self, hash: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().unwrap();
        Ok(users.values().find(|u| u.api_key_hash == hash).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().unwrap();
        Ok(users.values().find(|u| u.name == name).cloned())
    }

    async fn create(&self, new_user: &NewUser) -> Result<User, DomainError> {
        let mut users = self.users.write().unwrap();

        if users
            .values()
            .any(|u| u.name == new_user.name || u.api_key_hash == new_user.api_key_hash)
        {
            return Err(DomainError::Conflict("User already exists".to_string()));
        }

        let user = User {
            id: UserId(next_id(&users, |id| id.0)),
            name: new_user.name.clone(),
            api_key_hash: new_user.api_key_hash.clone(),
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }
}

// ============================================================================
// In-Memory Follow Repository
// ============================================================================

#[derive(Clone)]
pub struct InMemoryFollowRepository {
    users: InMemoryUserRepository,
    edges: Arc<RwLock<Vec<Follow>>>,
}

impl InMemoryFollowRepository {
    /// Names in follower lists are resolved through `users`
    pub fn new(users: InMemoryUserRepository) -> Self {
        Self {
            users,
            edges: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn with_follow(self, follow: Follow) -> Self {
        self.edges.write().unwrap().push(follow);
        self
    }
}

#[async_trait]
impl FollowRepository for InMemoryFollowRepository {
    async fn exists(&self, follow: &Follow) -> Result<bool, DomainError> {
        Ok(self.edges.read().unwrap().contains(follow))
    }

    async fn create(&self, follow: &Follow) -> Result<(), DomainError> {
        let mut edges = self.edges.write().unwrap();
        if edges.contains(follow) {
            return Err(DomainError::Conflict("Already following this user".to_string()));
        }
        edges.push(*follow);
        Ok(())
    }

    async fn delete(&self, follow: &Follow) -> Result<bool, DomainError> {
        let mut edges = self.edges.write().unwrap();
        let before = edges.len();
        edges.retain(|e| e != follow);
        Ok(edges.len() < before)
    }

    async fn followers_of(&self, user_id: &UserId) -> Result<Vec<UserSummary>, DomainError> {
        let edges = self.edges.read().unwrap();
        let mut users: Vec<UserSummary> = edges
            .iter()
            .filter(|e| e.following_id == *user_id)
            .map(|e| self.users.summary(&e.follower_id))
            .collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    async fn following_of(&self, user_id: &UserId) -> Result<Vec<UserSummary>, DomainError> {
        let edges = self.edges.read().unwrap();
        let mut users: Vec<UserSummary> = edges
            .iter()
            .filter(|e| e.follower_id == *user_id)
            .map(|e| self.users.summary(&e.following_id))
            .collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }
}

// ============================================================================
// In-Memory Media Repository
// ============================================================================

#[derive(Clone, Default)]
pub struct InMemoryMediaRepository {
    medias: Arc<RwLock<HashMap<MediaId, Media>>>,
}

impl InMemoryMediaRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_media(self, media: Media) -> Self {
        self.medias.write().unwrap().insert(media.id, media);
        self
    }
}

#[async_trait]
impl MediaRepository for InMemoryMediaRepository {
    async fn create(&self, new_media: &NewMedia) -> Result<Media, DomainError> {
        let mut medias = self.medias.write().unwrap();
        let media = Media {
            id: MediaId(next_id(&medias, |id| id.0)),
            file_name: new_media.file_name.clone(),
            content_type: new_media.content_type.clone(),
            data: new_media.data.clone(),
            tweet_id: None,
            created_at: Utc::now(),
        };
        medias.insert(media.id, media.clone());
        Ok(media)
    }

    async fn find_by_id(&self, id: &MediaId) -> Result<Option<Media>, DomainError> {
        Ok(self.medias.read().unwrap().get(id).cloned())
    }

    async fn find_attachment_state(
        &self,
        ids: &[MediaId],
    ) -> Result<Vec<(MediaId, Option<TweetId>)>, DomainError> {
        let medias = self.medias.read().unwrap();
        let mut state: Vec<_> = ids
            .iter()
            .collect::<HashSet<_>>()
            .into_iter()
            .filter_map(|id| medias.get(id).map(|m| (m.id, m.tweet_id)))
            .collect();
        state.sort();
        Ok(state)
    }
}

// ============================================================================
// In-Memory Like Repository
// ============================================================================

#[derive(Clone, Default)]
pub struct InMemoryLikeRepository {
    likes: Arc<RwLock<Vec<Like>>>,
}

impl InMemoryLikeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LikeRepository for InMemoryLikeRepository {
    async fn exists(&self, like: &Like) -> Result<bool, DomainError> {
        Ok(self.likes.read().unwrap().contains(like))
    }

    async fn create(&self, like: &Like) -> Result<(), DomainError> {
        let mut likes = self.likes.write().unwrap();
        if likes.contains(like) {
            return Err(DomainError::Conflict("Tweet already liked".to_string()));
        }
        likes.push(*like);
        Ok(())
    }

    async fn delete(&self, like: &Like) -> Result<bool, DomainError> {
        let mut likes = self.likes.write().unwrap();
        let before = likes.len();
        likes.retain(|l| l != like);
        Ok(likes.len() < before)
    }
}

// ============================================================================
// In-Memory Tweet Repository
// ============================================================================

/// Tweets plus the stores they join against when building the timeline
#[derive(Clone)]
pub struct InMemoryTweetRepository {
    tweets: Arc<RwLock<HashMap<TweetId, Tweet>>>,
    users: InMemoryUserRepository,
    medias: InMemoryMediaRepository,
    likes: InMemoryLikeRepository,
}

impl InMemoryTweetRepository {
    pub fn new(
        users: InMemoryUserRepository,
        medias: InMemoryMediaRepository,
        likes: InMemoryLikeRepository,
    ) -> Self {
        Self {
            tweets: Arc::new(RwLock::new(HashMap::new())),
            users,
            medias,
            likes,
        }
    }

    pub fn with_tweet(self, tweet: Tweet) -> Self {
        self.tweets.write().unwrap().insert(tweet.id, tweet);
        self
    }

    fn view(&self, tweet: &Tweet) -> TweetView {
        let mut attachments: Vec<MediaId> = self
            .medias
            .medias
            .read()
            .unwrap()
            .values()
            .filter(|m| m.tweet_id == Some(tweet.id))
            .map(|m| m.id)
            .collect();
        attachments.sort();

        let likes = self
            .likes
            .likes
            .read()
            .unwrap()
            .iter()
            .filter(|l| l.tweet_id == tweet.id)
            .map(|l| LikeSummary {
                user_id: l.user_id,
                name: self.users.summary(&l.user_id).name,
            })
            .collect();

        TweetView {
            id: tweet.id,
            content: tweet.content.clone(),
            attachments: attachments.iter().map(MediaId::download_path).collect(),
            author: self.users.summary(&tweet.author_id),
            likes,
        }
    }
}

#[async_trait]
impl TweetRepository for InMemoryTweetRepository {
    async fn find_by_id(&self, id: &TweetId) -> Result<Option<Tweet>, DomainError> {
        Ok(self.tweets.read().unwrap().get(id).cloned())
    }

    async fn create(&self, new_tweet: &NewTweet) -> Result<Tweet, DomainError> {
        let mut tweets = self.tweets.write().unwrap();
        let mut medias = self.medias.medias.write().unwrap();

        let claimable = new_tweet
            .media_ids
            .iter()
            .all(|id| medias.get(id).is_some_and(|m| m.tweet_id.is_none()));
        if !claimable {
            return Err(DomainError::Conflict(
                "Media is already attached to another tweet".to_string(),
            ));
        }

        let tweet = Tweet {
            id: TweetId(next_id(&tweets, |id| id.0)),
            content: new_tweet.content.clone(),
            author_id: new_tweet.author_id,
            created_at: Utc::now(),
        };
        for id in &new_tweet.media_ids {
            if let Some(media) = medias.get_mut(id) {
                media.tweet_id = Some(tweet.id);
            }
        }
        tweets.insert(tweet.id, tweet.clone());
        Ok(tweet)
    }

    async fn delete(&self, id: &TweetId) -> Result<bool, DomainError> {
        if self.tweets.write().unwrap().remove(id).is_none() {
            return Ok(false);
        }

        // Same effect as ON DELETE CASCADE
        self.medias
            .medias
            .write()
            .unwrap()
            .retain(|_, m| m.tweet_id != Some(*id));
        self.likes
            .likes
            .write()
            .unwrap()
            .retain(|l| l.tweet_id != *id);
        Ok(true)
    }

    async fn timeline(&self, page: Page) -> Result<Vec<TweetView>, DomainError> {
        let mut views: Vec<TweetView> = self
            .tweets
            .read()
            .unwrap()
            .values()
            .map(|t| self.view(t))
            .collect();
        views.sort_by(timeline_order);

        let limit = page.limit.map_or(usize::MAX, |l| l as usize);
        Ok(views
            .into_iter()
            .skip(page.offset as usize)
            .take(limit)
            .collect())
    }
}
