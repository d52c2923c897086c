//! Client for the image-mapping service.

use thiserror::Error;

use aozora_core::models::mapping::MappingResponse;

use crate::fetch::{FetchClient, FetchError};

#[derive(Debug, Error)]
pub enum ArtworkError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("mapping response parse failed: {0}")]
    Parse(String),
}

pub struct ArtworkClient {
    fetch: FetchClient,
    base: String,
}

impl ArtworkClient {
    pub fn new(fetch: FetchClient, base_url: impl Into<String>) -> Self {
        Self {
            fetch,
            base: base_url.into(),
        }
    }

    /// Image mappings for a media id. Callers treat failures as
    /// "no artwork available".
    pub async fn mappings(&self, anilist_id: i64) -> Result<MappingResponse, ArtworkError> {
        let url = format!("{}/mappings?anilist_id={anilist_id}", self.base);
        let resp = self.fetch.execute(self.fetch.http().get(&url)).await?;
        resp.json()
            .await
            .map_err(|e| ArtworkError::Parse(e.to_string()))
    }
}
