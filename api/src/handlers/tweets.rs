//! Tweet handlers

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{MediaId, Page, TweetId, TweetView, User};
use crate::error::AppError;
use crate::AppState;

use super::{JsonBody, PathParam, QueryParams, ResultResponse};

/// Request body for posting a tweet
#[derive(Debug, Deserialize)]
pub struct TweetCreate {
    pub tweet_data: String,
    /// Ids returned by POST /api/medias
    #[serde(default)]
    pub tweet_media_ids: Option<Vec<i32>>,
}

#[derive(Debug, Serialize)]
pub struct TweetCreatedResponse {
    pub result: bool,
    pub tweet_id: TweetId,
}

#[derive(Debug, Serialize)]
pub struct TimelineResponse {
    pub result: bool,
    pub tweets: Vec<TweetView>,
}

/// Query parameters for the timeline
#[derive(Debug, Default, Deserialize)]
pub struct TimelineQuery {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl From<TimelineQuery> for Page {
    fn from(query: TimelineQuery) -> Self {
        Page {
            limit: query.limit,
            offset: query.offset.unwrap_or(0),
        }
    }
}

/// POST /api/tweets
pub async fn create_tweet(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    JsonBody(request): JsonBody<TweetCreate>,
) -> Result<Json<TweetCreatedResponse>, AppError> {
    let media_ids: Vec<MediaId> = request
        .tweet_media_ids
        .unwrap_or_default()
        .into_iter()
        .map(MediaId)
        .collect();

    let tweet_id = state
        .tweet_service
        .create(&user, &request.tweet_data, &media_ids)
        .await?;

    Ok(Json(TweetCreatedResponse {
        result: true,
        tweet_id,
    }))
}

/// GET /api/tweets
pub async fn list_tweets(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<TimelineQuery>,
) -> Result<Json<TimelineResponse>, AppError> {
    let tweets = state.tweet_service.timeline(query.into()).await?;
    Ok(Json(TimelineResponse {
        result: true,
        tweets,
    }))
}

/// DELETE /api/tweets/:id
pub async fn delete_tweet(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    PathParam(id): PathParam<i32>,
) -> Result<Json<ResultResponse>, AppError> {
    state.tweet_service.delete(&user, &TweetId(id)).await?;
    Ok(Json(ResultResponse::ok()))
}

/// POST /api/tweets/:id/likes
pub async fn like_tweet(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    PathParam(id): PathParam<i32>,
) -> Result<Json<ResultResponse>, AppError> {
    state.tweet_service.like(&user, &TweetId(id)).await?;
    Ok(Json(ResultResponse::ok()))
}

/// DELETE /api/tweets/:id/likes
pub async fn unlike_tweet(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    PathParam(id): PathParam<i32>,
) -> Result<Json<ResultResponse>, AppError> {
    state.tweet_service.unlike(&user, &TweetId(id)).await?;
    Ok(Json(ResultResponse::ok()))
}
