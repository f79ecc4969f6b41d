//! Schema bootstrap
//!
//! Creates every table (in foreign-key order) and the indexes the entities
//! cannot express, skipping anything that already exists.

use sea_orm::sea_query::{Index, IndexCreateStatement};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, DbErr, Schema, Statement};

use crate::entity::prelude::*;
use crate::entity::{followers, likes, medias};

/// Create tables and indexes if they are missing
pub async fn create_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let statements = schema_statements(db.get_database_backend());
    let count = statements.len();

    for statement in statements {
        db.execute_raw(statement).await?;
    }

    tracing::info!(statements = count, "Database schema ensured");
    Ok(())
}

/// DDL for the full schema, in execution order
pub fn schema_statements(backend: DbBackend) -> Vec<Statement> {
    let schema = Schema::new(backend);

    let mut tables = vec![
        schema.create_table_from_entity(Users),
        schema.create_table_from_entity(Tweets),
        schema.create_table_from_entity(Medias),
        schema.create_table_from_entity(Likes),
        schema.create_table_from_entity(Followers),
    ];

    let mut statements: Vec<Statement> = tables
        .iter_mut()
        .map(|table| {
            table.if_not_exists();
            backend.build(&*table)
        })
        .collect();

    statements.extend(indexes().iter().map(|index| backend.build(index)));
    statements
}

fn indexes() -> Vec<IndexCreateStatement> {
    vec![
        Index::create()
            .name("idx_likes_user_tweet")
            .table(Likes)
            .col(likes::Column::UserId)
            .col(likes::Column::TweetId)
            .unique()
            .if_not_exists()
            .to_owned(),
        Index::create()
            .name("idx_followers_pair")
            .table(Followers)
            .col(followers::Column::FollowerId)
            .col(followers::Column::FollowingId)
            .unique()
            .if_not_exists()
            .to_owned(),
        Index::create()
            .name("idx_medias_tweet_id")
            .table(Medias)
            .col(medias::Column::TweetId)
            .if_not_exists()
            .to_owned(),
    ]
}
