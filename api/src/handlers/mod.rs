//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

use serde::Serialize;

mod extract;
pub mod medias;
pub mod tweets;
pub mod users;

pub use extract::{JsonBody, PathParam, QueryParams};
pub use medias::{download_media, upload_media};
pub use tweets::{create_tweet, delete_tweet, like_tweet, list_tweets, unlike_tweet};
pub use users::{follow, get_me, get_user, register, unfollow};

/// Body for endpoints that only report success
#[derive(Debug, Serialize)]
pub struct ResultResponse {
    pub result: bool,
}

impl ResultResponse {
    pub fn ok() -> Self {
        Self { result: true }
    }
}
