//! Anime detail: three-way fan-out (metadata, episode list, artwork) with
//! a merge that only treats the metadata leg as essential.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use aozora_api::MetadataError;
use aozora_core::models::view::{
    attach_thumbnails, project_recommendations, AnimeDetail, EpisodeView, RecommendationEntry,
};
use aozora_core::normalize::extract_artwork;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DetailResponse {
    pub success: bool,
    pub data: AnimeDetail,
    pub episodes: Vec<EpisodeView>,
    pub recommendations: Vec<RecommendationEntry>,
}

pub async fn anime_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DetailResponse>> {
    let numeric_id: i64 = id.parse().unwrap_or_default();

    let (media, episodes, mapping) = tokio::join!(
        state.metadata.media_detail(numeric_id),
        state.resolver.resolve(&id),
        state.artwork.mappings(numeric_id),
    );

    let media = match media {
        Ok(Some(media)) => media,
        Ok(None) => return Err(AppError::NotFound("Anime not found".to_string())),
        Err(MetadataError::Upstream(_)) => {
            // The provider rejects bad ids with an error list; to clients
            // that is the same as the anime not existing.
            tracing::warn!(id, "metadata provider rejected detail query");
            return Err(AppError::NotFound("Anime not found".to_string()));
        }
        Err(e) => {
            tracing::error!(id, error = %e, "detail metadata fetch failed");
            return Err(AppError::Internal("Failed to fetch anime data".to_string()));
        }
    };

    let mapping = match mapping {
        Ok(mapping) => Some(mapping),
        Err(e) => {
            tracing::warn!(id, error = %e, "artwork mapping fetch failed");
            None
        }
    };

    let artwork = extract_artwork(mapping.as_ref(), None);
    let data = AnimeDetail::from_media(&media, &artwork);
    let recommendations = project_recommendations(&media);
    let episodes = attach_thumbnails(episodes, &media.streaming_episodes);

    Ok(Json(DetailResponse {
        success: true,
        data,
        episodes,
        recommendations,
    }))
}
