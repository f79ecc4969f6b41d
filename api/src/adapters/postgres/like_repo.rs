//! PostgreSQL adapter for LikeRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, Set,
};

use super::{db_err, map_db_err};
use crate::domain::entities::Like;
use crate::domain::ports::LikeRepository;
use crate::entity::likes;
use crate::error::DomainError;

/// PostgreSQL implementation of LikeRepository
pub struct PostgresLikeRepository {
    db: DatabaseConnection,
}

impl PostgresLikeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn like_filter(like: &Like) -> Condition {
    Condition::all()
        .add(likes::Column::UserId.eq(like.user_id.0))
        .add(likes::Column::TweetId.eq(like.tweet_id.0))
}

#[async_trait]
impl LikeRepository for PostgresLikeRepository {
    async fn exists(&self, like: &Like) -> Result<bool, DomainError> {
        let count = likes::Entity::find()
            .filter(like_filter(like))
            .count(&self.db)
            .await
            .map_err(db_err)?;

        Ok(count > 0)
    }

    async fn create(&self, like: &Like) -> Result<(), DomainError> {
        likes::ActiveModel {
            user_id: Set(like.user_id.0),
            tweet_id: Set(like.tweet_id.0),
            created_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| map_db_err(e, "Tweet already liked"))?;

        Ok(())
    }

    async fn delete(&self, like: &Like) -> Result<bool, DomainError> {
        let result = likes::Entity::delete_many()
            .filter(like_filter(like))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected > 0)
    }
}
