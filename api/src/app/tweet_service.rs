//! Tweet service
//!
//! Posting, deleting, liking tweets and reading the timeline.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::entities::{
    validate_content, Like, MediaId, NewTweet, Page, Tweet, TweetId, TweetView, User,
};
use crate::domain::ports::{LikeRepository, MediaRepository, TweetRepository};
use crate::error::{AppError, DomainError};

/// Service for tweets and their likes
pub struct TweetService<TR, MR, LR>
where
    TR: TweetRepository,
    MR: MediaRepository,
    LR: LikeRepository,
{
    tweets: Arc<TR>,
    medias: Arc<MR>,
    likes: Arc<LR>,
}

impl<TR, MR, LR> TweetService<TR, MR, LR>
where
    TR: TweetRepository,
    MR: MediaRepository,
    LR: LikeRepository,
{
    pub fn new(tweets: Arc<TR>, medias: Arc<MR>, likes: Arc<LR>) -> Self {
        Self {
            tweets,
            medias,
            likes,
        }
    }

    /// Post a tweet, attaching previously uploaded media
    pub async fn create(
        &self,
        author: &User,
        content: &str,
        media_ids: &[MediaId],
    ) -> Result<TweetId, AppError> {
        let content = validate_content(content).map_err(DomainError::Validation)?;

        // Collapse duplicates, keep ascending id order
        let media_ids: Vec<MediaId> = media_ids
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let state = self.medias.find_attachment_state(&media_ids).await?;
        if state.len() != media_ids.len() {
            return Err(DomainError::NotFound("Media not found".to_string()).into());
        }
        if state.iter().any(|(_, tweet_id)| tweet_id.is_some()) {
            return Err(DomainError::Conflict(
                "Media is already attached to another tweet".to_string(),
            )
            .into());
        }

        let tweet = self
            .tweets
            .create(&NewTweet {
                author_id: author.id,
                content: content.to_string(),
                media_ids,
            })
            .await?;

        tracing::info!(tweet_id = %tweet.id, author = %author.id, "Tweet created");
        Ok(tweet.id)
    }

    /// Delete one of `user`'s own tweets
    pub async fn delete(&self, user: &User, tweet_id: &TweetId) -> Result<(), AppError> {
        let tweet = self.require_tweet(tweet_id).await?;

        if !tweet.is_owned_by(user.id) {
            return Err(DomainError::Forbidden(
                "You are not authorized to delete this tweet".to_string(),
            )
            .into());
        }

        if !self.tweets.delete(tweet_id).await? {
            return Err(DomainError::NotFound("Tweet not found".to_string()).into());
        }

        tracing::info!(tweet_id = %tweet_id, author = %user.id, "Tweet deleted");
        Ok(())
    }

    pub async fn like(&self, user: &User, tweet_id: &TweetId) -> Result<(), AppError> {
        self.require_tweet(tweet_id).await?;

        let like = Like {
            user_id: user.id,
            tweet_id: *tweet_id,
        };
        if self.likes.exists(&like).await? {
            return Err(DomainError::Conflict("Tweet already liked".to_string()).into());
        }

        self.likes.create(&like).await?;
        tracing::debug!(tweet_id = %tweet_id, user_id = %user.id, "Tweet liked");
        Ok(())
    }

    pub async fn unlike(&self, user: &User, tweet_id: &TweetId) -> Result<(), AppError> {
        let like = Like {
            user_id: user.id,
            tweet_id: *tweet_id,
        };

        if !self.likes.delete(&like).await? {
            return Err(DomainError::NotFound("Like not found".to_string()).into());
        }

        tracing::debug!(tweet_id = %tweet_id, user_id = %user.id, "Tweet unliked");
        Ok(())
    }

    /// All tweets, most liked first then newest first
    pub async fn timeline(&self, page: Page) -> Result<Vec<TweetView>, AppError> {
        Ok(self.tweets.timeline(page).await?)
    }

    async fn require_tweet(&self, id: &TweetId) -> Result<Tweet, AppError> {
        self.tweets
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Tweet not found".to_string()).into())
    }
}
