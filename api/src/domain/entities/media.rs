//! Media domain entity
//!
//! Uploaded images. A media row exists on its own until a tweet claims it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::tweet::TweetId;

/// Unique identifier for an uploaded media
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaId(pub i32);

impl From<i32> for MediaId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for MediaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl MediaId {
    /// Path the media is downloaded from
    pub fn download_path(&self) -> String {
        format!("/api/media/{}", self.0)
    }
}

/// Accepted upload content types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Jpeg,
    Png,
}

impl MediaKind {
    pub fn mime(&self) -> &'static str {
        match self {
            MediaKind::Jpeg => "image/jpeg",
            MediaKind::Png => "image/png",
        }
    }
}

impl std::str::FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Ignore parameters such as "; charset=binary"
        let mime = s.split(';').next().unwrap_or(s).trim().to_lowercase();
        match mime.as_str() {
            "image/jpeg" | "image/jpg" => Ok(MediaKind::Jpeg),
            "image/png" => Ok(MediaKind::Png),
            _ => Err("Invalid file type. Only JPEG and PNG are allowed.".to_string()),
        }
    }
}

/// A stored media blob
#[derive(Debug, Clone)]
pub struct Media {
    pub id: MediaId,
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
    pub tweet_id: Option<TweetId>,
    pub created_at: DateTime<Utc>,
}

/// Data needed to store an upload
#[derive(Debug, Clone)]
pub struct NewMedia {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Build the stored file name: a fresh UUID keeping the original extension
pub fn stored_file_name(original: Option<&str>) -> String {
    let extension = original
        .and_then(|name| std::path::Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default();

    format!("{}{}", uuid::Uuid::new_v4(), extension)
}
