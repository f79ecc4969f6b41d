//! PostgreSQL adapter for TweetRepository

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::ExprTrait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

use super::db_err;
use crate::domain::entities::{
    LikeSummary, MediaId, NewTweet, Page, Tweet, TweetId, TweetView, UserId, UserSummary,
};
use crate::domain::ports::TweetRepository;
use crate::entity::{likes, medias, tweets, users};
use crate::error::DomainError;

/// PostgreSQL implementation of TweetRepository
pub struct PostgresTweetRepository {
    db: DatabaseConnection,
}

impl PostgresTweetRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Tweet ids in timeline order for the requested page
    async fn page_of_tweets(&self, page: Page) -> Result<Vec<tweets::Model>, DomainError> {
        let mut query = tweets::Entity::find()
            .left_join(likes::Entity)
            .group_by(tweets::Column::Id)
            .order_by_desc(Expr::col((likes::Entity, likes::Column::Id)).count())
            .order_by_desc(tweets::Column::Id)
            .offset(page.offset);

        if let Some(limit) = page.limit {
            query = query.limit(limit);
        }

        query.all(&self.db).await.map_err(db_err)
    }
}

#[async_trait]
impl TweetRepository for PostgresTweetRepository {
    async fn find_by_id(&self, id: &TweetId) -> Result<Option<Tweet>, DomainError> {
        let result = tweets::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.map(|m| m.into()))
    }

    async fn create(&self, tweet: &NewTweet) -> Result<Tweet, DomainError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let model = tweets::ActiveModel {
            content: Set(tweet.content.clone()),
            author_id: Set(tweet.author_id.0),
            created_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;

        if !tweet.media_ids.is_empty() {
            // Only claim uploads that are still unattached
            let result = medias::Entity::update_many()
                .col_expr(medias::Column::TweetId, Expr::value(model.id))
                .filter(medias::Column::Id.is_in(tweet.media_ids.iter().map(|id| id.0)))
                .filter(medias::Column::TweetId.is_null())
                .exec(&txn)
                .await
                .map_err(db_err)?;

            if result.rows_affected != tweet.media_ids.len() as u64 {
                txn.rollback().await.map_err(db_err)?;
                return Err(DomainError::Conflict(
                    "Media is already attached to another tweet".to_string(),
                ));
            }
        }

        txn.commit().await.map_err(db_err)?;

        Ok(model.into())
    }

    async fn delete(&self, id: &TweetId) -> Result<bool, DomainError> {
        // likes and medias go with it through ON DELETE CASCADE
        let result = tweets::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn timeline(&self, page: Page) -> Result<Vec<TweetView>, DomainError> {
        let tweet_models = self.page_of_tweets(page).await?;
        if tweet_models.is_empty() {
            return Ok(Vec::new());
        }

        let tweet_ids: Vec<i32> = tweet_models.iter().map(|t| t.id).collect();
        let author_ids: Vec<i32> = tweet_models.iter().map(|t| t.author_id).collect();

        let authors: HashMap<i32, String> = users::Entity::find()
            .filter(users::Column::Id.is_in(author_ids))
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(|u| (u.id, u.name))
            .collect();

        let mut likes_by_tweet: HashMap<i32, Vec<LikeSummary>> = HashMap::new();
        let like_rows = likes::Entity::find()
            .filter(likes::Column::TweetId.is_in(tweet_ids.clone()))
            .order_by_asc(likes::Column::Id)
            .find_also_related(users::Entity)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        for (like, user) in like_rows {
            let name = user.map(|u| u.name).unwrap_or_default();
            likes_by_tweet
                .entry(like.tweet_id)
                .or_default()
                .push(LikeSummary {
                    user_id: UserId(like.user_id),
                    name,
                });
        }

        // Skip the blob column, only ids are needed for download paths
        let mut attachments_by_tweet: HashMap<i32, Vec<String>> = HashMap::new();
        let media_rows: Vec<(i32, Option<i32>)> = medias::Entity::find()
            .select_only()
            .column(medias::Column::Id)
            .column(medias::Column::TweetId)
            .filter(medias::Column::TweetId.is_in(tweet_ids))
            .order_by_asc(medias::Column::Id)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_err)?;
        for (media_id, tweet_id) in media_rows {
            if let Some(tweet_id) = tweet_id {
                attachments_by_tweet
                    .entry(tweet_id)
                    .or_default()
                    .push(MediaId(media_id).download_path());
            }
        }

        Ok(tweet_models
            .into_iter()
            .map(|t| TweetView {
                id: TweetId(t.id),
                author: UserSummary {
                    id: UserId(t.author_id),
                    name: authors.get(&t.author_id).cloned().unwrap_or_default(),
                },
                attachments: attachments_by_tweet.remove(&t.id).unwrap_or_default(),
                likes: likes_by_tweet.remove(&t.id).unwrap_or_default(),
                content: t.content,
            })
            .collect())
    }
}

/// Convert SeaORM model to domain entity
impl From<tweets::Model> for Tweet {
    fn from(model: tweets::Model) -> Self {
        Tweet {
            id: TweetId(model.id),
            content: model.content,
            author_id: UserId(model.author_id),
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
