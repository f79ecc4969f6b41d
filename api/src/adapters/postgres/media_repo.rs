//! PostgreSQL adapter for MediaRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use super::db_err;
use crate::domain::entities::{Media, MediaId, NewMedia, TweetId};
use crate::domain::ports::MediaRepository;
use crate::entity::medias;
use crate::error::DomainError;

/// PostgreSQL implementation of MediaRepository
pub struct PostgresMediaRepository {
    db: DatabaseConnection,
}

impl PostgresMediaRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MediaRepository for PostgresMediaRepository {
    async fn create(&self, media: &NewMedia) -> Result<Media, DomainError> {
        let model = medias::ActiveModel {
            file_name: Set(media.file_name.clone()),
            content_type: Set(media.content_type.clone()),
            data: Set(media.data.clone()),
            tweet_id: Set(None),
            created_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(db_err)?;

        Ok(result.into())
    }

    async fn find_by_id(&self, id: &MediaId) -> Result<Option<Media>, DomainError> {
        let result = medias::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_attachment_state(
        &self,
        ids: &[MediaId],
    ) -> Result<Vec<(MediaId, Option<TweetId>)>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<(i32, Option<i32>)> = medias::Entity::find()
            .select_only()
            .column(medias::Column::Id)
            .column(medias::Column::TweetId)
            .filter(medias::Column::Id.is_in(ids.iter().map(|id| id.0)))
            .order_by_asc(medias::Column::Id)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|(id, tweet_id)| (MediaId(id), tweet_id.map(TweetId)))
            .collect())
    }
}

/// Convert SeaORM model to domain entity
impl From<medias::Model> for Media {
    fn from(model: medias::Model) -> Self {
        Media {
            id: MediaId(model.id),
            file_name: model.file_name,
            content_type: model.content_type,
            data: model.data,
            tweet_id: model.tweet_id.map(TweetId),
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
