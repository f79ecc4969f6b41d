//! PostgreSQL adapter for FollowRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};

use super::{db_err, map_db_err};
use crate::domain::entities::{Follow, UserId, UserSummary};
use crate::domain::ports::FollowRepository;
use crate::entity::{followers, users};
use crate::error::DomainError;

/// PostgreSQL implementation of FollowRepository
pub struct PostgresFollowRepository {
    db: DatabaseConnection,
}

impl PostgresFollowRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn edge_filter(follow: &Follow) -> Condition {
        Condition::all()
            .add(followers::Column::FollowerId.eq(follow.follower_id.0))
            .add(followers::Column::FollowingId.eq(follow.following_id.0))
    }
}

#[async_trait]
impl FollowRepository for PostgresFollowRepository {
    async fn exists(&self, follow: &Follow) -> Result<bool, DomainError> {
        let count = followers::Entity::find()
            .filter(Self::edge_filter(follow))
            .count(&self.db)
            .await
            .map_err(db_err)?;

        Ok(count > 0)
    }

    async fn create(&self, follow: &Follow) -> Result<(), DomainError> {
        followers::ActiveModel {
            follower_id: Set(follow.follower_id.0),
            following_id: Set(follow.following_id.0),
            created_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| map_db_err(e, "Already following this user"))?;

        Ok(())
    }

    async fn delete(&self, follow: &Follow) -> Result<bool, DomainError> {
        let result = followers::Entity::delete_many()
            .filter(Self::edge_filter(follow))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn followers_of(&self, user_id: &UserId) -> Result<Vec<UserSummary>, DomainError> {
        // users.id = followers.follower_id
        let results = users::Entity::find()
            .join(JoinType::InnerJoin, followers::Relation::Follower.def().rev())
            .filter(followers::Column::FollowingId.eq(user_id.0))
            .order_by_asc(users::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn following_of(&self, user_id: &UserId) -> Result<Vec<UserSummary>, DomainError> {
        // users.id = followers.following_id
        let results = users::Entity::find()
            .join(JoinType::InnerJoin, followers::Relation::Following.def().rev())
            .filter(followers::Column::FollowerId.eq(user_id.0))
            .order_by_asc(users::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }
}
