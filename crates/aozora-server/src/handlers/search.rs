use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use aozora_api::MetadataError;
use aozora_core::models::media::PageInfo;
use aozora_core::models::view::{empty_page_info, SearchEntry};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

fn default_page() -> i64 {
    1
}

fn default_per_page() -> i64 {
    20
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_per_page")]
    pub per_page: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub success: bool,
    pub page_info: PageInfo,
    pub results: Vec<SearchEntry>,
}

pub async fn search(
    State(state): State<AppState>,
    Path(query): Path<String>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<SearchResponse>> {
    let page = state
        .metadata
        .search(&query, params.page, params.per_page)
        .await
        .map_err(|e| match e {
            // The provider's structured error list goes back to the client
            // verbatim as a 400.
            MetadataError::Upstream(errors) => AppError::Upstream(errors),
            e => {
                tracing::error!(query, error = %e, "search fetch failed");
                AppError::Internal("Failed to search anime".to_string())
            }
        })?;

    let results = page.media.iter().map(SearchEntry::from_media).collect();
    Ok(Json(SearchResponse {
        success: true,
        page_info: page.page_info.unwrap_or_else(empty_page_info),
        results,
    }))
}
