//! Media service
//!
//! Accepts image uploads and serves them back.

use std::sync::Arc;

use crate::domain::entities::{stored_file_name, Media, MediaId, MediaKind, NewMedia};
use crate::domain::ports::MediaRepository;
use crate::error::{AppError, DomainError};

pub struct MediaService<MR>
where
    MR: MediaRepository,
{
    medias: Arc<MR>,
}

impl<MR> MediaService<MR>
where
    MR: MediaRepository,
{
    pub fn new(medias: Arc<MR>) -> Self {
        Self { medias }
    }

    /// Store an uploaded image and return its id
    ///
    /// Only JPEG and PNG are accepted. The stored name is a fresh UUID with
    /// the original extension.
    pub async fn upload(
        &self,
        original_file_name: Option<&str>,
        content_type: Option<&str>,
        data: Vec<u8>,
    ) -> Result<MediaId, AppError> {
        let kind: MediaKind = content_type
            .unwrap_or_default()
            .parse()
            .map_err(DomainError::Validation)?;

        if data.is_empty() {
            return Err(DomainError::Validation("Uploaded file is empty".to_string()).into());
        }

        let media = self
            .medias
            .create(&NewMedia {
                file_name: stored_file_name(original_file_name),
                content_type: kind.mime().to_string(),
                data,
            })
            .await?;

        tracing::info!(
            media_id = %media.id,
            file_name = %media.file_name,
            bytes = media.data.len(),
            "Media uploaded"
        );
        Ok(media.id)
    }

    pub async fn get(&self, id: &MediaId) -> Result<Media, AppError> {
        self.medias
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Media not found".to_string()).into())
    }
}
