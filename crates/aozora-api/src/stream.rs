//! Client for the stream service: remapped episode lists, server listings,
//! and embed-link construction.

use serde::Deserialize;
use thiserror::Error;

use aozora_core::episodes::Episode;

use crate::fetch::{FetchClient, FetchError};

#[derive(Debug, Error)]
pub enum StreamError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("stream response parse failed: {0}")]
    Parse(String),
}

#[derive(Debug, Deserialize)]
struct EpisodeListBody {
    #[serde(default)]
    data: Vec<Episode>,
}

#[derive(Debug, Clone)]
pub struct StreamClient {
    fetch: FetchClient,
    base: String,
}

impl StreamClient {
    pub fn new(fetch: FetchClient, base_url: impl Into<String>) -> Self {
        Self {
            fetch,
            base: base_url.into(),
        }
    }

    /// Episode list for a remapped slug; episodes are the raw `data` array.
    pub async fn episodes(&self, slug: &str) -> Result<Vec<Episode>, StreamError> {
        let url = format!("{}/episodes/{slug}", self.base);
        tracing::debug!(url, "remapped episode list fetch");
        let resp = self.fetch.execute(self.fetch.http().get(&url)).await?;
        let body: EpisodeListBody = resp
            .json()
            .await
            .map_err(|e| StreamError::Parse(e.to_string()))?;
        Ok(body.data)
    }

    /// Available playback servers for an episode, passed through verbatim.
    pub async fn servers(&self, episode_id: &str) -> Result<serde_json::Value, StreamError> {
        let url = format!("{}/servers?id={episode_id}", self.base);
        let resp = self.fetch.execute(self.fetch.http().get(&url)).await?;
        resp.json()
            .await
            .map_err(|e| StreamError::Parse(e.to_string()))
    }

    /// Compose the playback embed URL. Pure string composition; malformed
    /// inputs produce a malformed URL rather than an error.
    pub fn embed_url(&self, episode_id: &str, server_id: &str, audio_type: &str) -> String {
        format!("{}/embed/{server_id}/{episode_id}/{audio_type}", self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embed_url_composes_deterministically() {
        let client = StreamClient::new(FetchClient::new(), "https://stream.example");
        assert_eq!(
            client.embed_url("one-piece-100::ep=2142", "hd-1", "sub"),
            "https://stream.example/embed/hd-1/one-piece-100::ep=2142/sub"
        );
    }
}
