//! Episode-list and stream-resolution endpoints.
//!
//! Stream resolution fetches the episode list exactly once and derives
//! everything else (episode id, embed link, server listing) from it.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use aozora_core::episodes::{find_episode_id, Episode};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

fn default_ep() -> String {
    "1".to_string()
}

fn default_server() -> String {
    "hd-1".to_string()
}

fn default_audio() -> String {
    "sub".to_string()
}

#[derive(Debug, Deserialize)]
pub struct StreamParams {
    #[serde(default = "default_ep")]
    pub ep: String,
    #[serde(default = "default_server")]
    pub server: String,
    #[serde(rename = "type", default = "default_audio")]
    pub audio: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamResponse {
    pub success: bool,
    pub episodes_list: Vec<Episode>,
    pub stream_link: String,
    pub stream_servers: Value,
}

pub async fn stream(
    State(state): State<AppState>,
    Path(anime_id): Path<String>,
    Query(params): Query<StreamParams>,
) -> AppResult<Json<StreamResponse>> {
    let episodes_list = state.resolver.resolve(&anime_id).await;

    let Some(episode_id) = find_episode_id(&episodes_list, &params.ep) else {
        return Err(AppError::NotFound("Stream link not found".to_string()));
    };

    let stream_servers = match state.stream.servers(&episode_id).await {
        Ok(servers) => servers,
        Err(e) => {
            tracing::warn!(anime_id, episode_id, error = %e, "stream servers fetch failed");
            Value::Null
        }
    };
    let stream_link = state.stream.embed_url(&episode_id, &params.server, &params.audio);

    Ok(Json(StreamResponse {
        success: true,
        episodes_list,
        stream_link,
        stream_servers,
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodesResponse {
    pub success: bool,
    pub episodes_list: Vec<Episode>,
}

pub async fn episodes(
    State(state): State<AppState>,
    Path(anime_id): Path<String>,
) -> Json<EpisodesResponse> {
    let episodes_list = state.resolver.resolve(&anime_id).await;
    Json(EpisodesResponse {
        success: true,
        episodes_list,
    })
}
