use serde::Deserialize;

use aozora_core::models::media::{Media, Page};

use super::error::MetadataError;
use crate::fetch::FetchClient;

const SPOTLIGHT_QUERY: &str = r#"
query ($id: Int) {
    Media(id: $id, type: ANIME) {
        id
        title { english romaji }
        bannerImage
        coverImage { extraLarge }
        description
        season
        seasonYear
        episodes
        status
        format
        nextAiringEpisode { timeUntilAiring episode }
    }
}
"#;

const DETAIL_QUERY: &str = r#"
query ($id: Int) {
    Media(id: $id, type: ANIME) {
        id
        title { romaji english native }
        coverImage { extraLarge large color }
        bannerImage
        description
        season
        seasonYear
        episodes
        duration
        nextAiringEpisode { timeUntilAiring episode }
        status
        format
        genres
        averageScore
        meanScore
        popularity
        favourites
        source
        countryOfOrigin
        startDate { year month day }
        endDate { year month day }
        studios { nodes { name isAnimationStudio } }
        streamingEpisodes { title thumbnail url site }
        trailer { id site }
        synonyms
        tags { name rank }
        relations {
            edges {
                relationType
                node {
                    id
                    title { romaji english }
                    coverImage { extraLarge }
                    format
                    status
                    episodes
                    type
                }
            }
        }
        characters(sort: [ROLE, RELEVANCE, ID], perPage: 25) {
            edges {
                role
                node {
                    id
                    name { userPreferred }
                    image { large }
                }
                voiceActors(language: JAPANESE, sort: [RELEVANCE, ID]) {
                    id
                    name { userPreferred }
                    image { large }
                }
            }
        }
        recommendations(sort: RATING_DESC, perPage: 12) {
            nodes {
                mediaRecommendation {
                    id
                    title { romaji english }
                    coverImage { extraLarge }
                    bannerImage
                    format
                    status
                    episodes
                    averageScore
                    season
                    seasonYear
                }
            }
        }
    }
}
"#;

const SEARCH_QUERY: &str = r#"
query ($search: String, $page: Int, $perPage: Int) {
    Page(page: $page, perPage: $perPage) {
        pageInfo { total currentPage lastPage hasNextPage perPage }
        media(search: $search, type: ANIME, sort: [POPULARITY_DESC, SCORE_DESC]) {
            id
            title { romaji english native }
            coverImage { extraLarge color }
            format
            status
            episodes
            averageScore
            season
            seasonYear
        }
    }
}
"#;

#[derive(Debug, Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct MediaData {
    #[serde(rename = "Media")]
    media: Option<Media>,
}

#[derive(Debug, Deserialize)]
struct PageData {
    #[serde(rename = "Page")]
    page: Page,
}

/// GraphQL media-metadata client.
pub struct MetadataClient {
    fetch: FetchClient,
    endpoint: String,
}

impl MetadataClient {
    pub fn new(fetch: FetchClient, endpoint: impl Into<String>) -> Self {
        Self {
            fetch,
            endpoint: endpoint.into(),
        }
    }

    async fn graphql<T: serde::de::DeserializeOwned>(
        &self,
        operation: &str,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, MetadataError> {
        tracing::debug!(operation, "metadata GraphQL request");

        let request = self
            .fetch
            .http()
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .json(&serde_json::json!({
                "query": query,
                "variables": variables,
            }));

        // The provider returns GraphQL error lists with non-2xx statuses,
        // so the body is parsed regardless of status.
        let resp = self.fetch.execute(request).await?;
        let envelope: GraphQLResponse<T> = resp
            .json()
            .await
            .map_err(|e| MetadataError::Parse(e.to_string()))?;

        if let Some(errors) = envelope.errors {
            if !errors.is_null() {
                tracing::warn!(operation, "metadata provider reported errors");
                return Err(MetadataError::Upstream(errors));
            }
        }
        envelope
            .data
            .ok_or_else(|| MetadataError::Parse("response has no data".to_string()))
    }

    /// Compact media record for the home/spotlight feed. `None` when the
    /// provider has no media for this id.
    pub async fn spotlight_media(&self, id: i64) -> Result<Option<Media>, MetadataError> {
        let data: MediaData = self
            .graphql("Spotlight", SPOTLIGHT_QUERY, serde_json::json!({ "id": id }))
            .await?;
        Ok(data.media)
    }

    /// Full media record for the detail endpoint.
    pub async fn media_detail(&self, id: i64) -> Result<Option<Media>, MetadataError> {
        let data: MediaData = self
            .graphql("Detail", DETAIL_QUERY, serde_json::json!({ "id": id }))
            .await?;
        Ok(data.media)
    }

    /// One page of search results.
    pub async fn search(
        &self,
        query: &str,
        page: i64,
        per_page: i64,
    ) -> Result<Page, MetadataError> {
        let data: PageData = self
            .graphql(
                "Search",
                SEARCH_QUERY,
                serde_json::json!({
                    "search": query,
                    "page": page,
                    "perPage": per_page,
                }),
            )
            .await?;
        Ok(data.page)
    }
}
