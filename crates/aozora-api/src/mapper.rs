//! Client for the mapper service, the standard episode-list upstream.

use serde::Deserialize;
use thiserror::Error;

use aozora_core::episodes::Episode;

use crate::fetch::{FetchClient, FetchError};

#[derive(Debug, Error)]
pub enum MapperError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("mapper response parse failed: {0}")]
    Parse(String),
}

#[derive(Debug, Deserialize)]
struct InfoBody {
    #[serde(default)]
    data: Option<InfoData>,
}

#[derive(Debug, Deserialize)]
struct InfoData {
    #[serde(rename = "episodesList", default)]
    episodes_list: Vec<Episode>,
}

pub struct MapperClient {
    fetch: FetchClient,
    base: String,
}

impl MapperClient {
    pub fn new(fetch: FetchClient, base_url: impl Into<String>) -> Self {
        Self {
            fetch,
            base: base_url.into(),
        }
    }

    /// Episode list for a canonical anime id, from `anime/info/{id}`.
    pub async fn episodes(&self, anime_id: &str) -> Result<Vec<Episode>, MapperError> {
        let url = format!("{}/anime/info/{anime_id}", self.base);
        tracing::debug!(url, "standard episode list fetch");
        let resp = self.fetch.execute(self.fetch.http().get(&url)).await?;
        let body: InfoBody = resp
            .json()
            .await
            .map_err(|e| MapperError::Parse(e.to_string()))?;
        Ok(body.data.map(|d| d.episodes_list).unwrap_or_default())
    }
}
