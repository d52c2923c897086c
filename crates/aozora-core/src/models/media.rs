//! Wire shapes for the GraphQL media-metadata provider.
//!
//! A single `Media` struct covers every query depth: the spotlight query
//! only populates a handful of fields, the detail query fills most of them,
//! and relation/recommendation nodes reuse the same shape with almost
//! everything absent. Every field beyond `id` is therefore optional.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: i64,
    #[serde(default)]
    pub title: MediaTitle,
    #[serde(default)]
    pub cover_image: Option<CoverImage>,
    #[serde(default)]
    pub banner_image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub season_year: Option<i64>,
    #[serde(default)]
    pub episodes: Option<i64>,
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub next_airing_episode: Option<NextAiringEpisode>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub average_score: Option<i64>,
    #[serde(default)]
    pub mean_score: Option<i64>,
    #[serde(default)]
    pub popularity: Option<i64>,
    #[serde(default)]
    pub favourites: Option<i64>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub country_of_origin: Option<String>,
    #[serde(default)]
    pub start_date: Option<FuzzyDate>,
    #[serde(default)]
    pub end_date: Option<FuzzyDate>,
    #[serde(default)]
    pub studios: Option<StudioConnection>,
    #[serde(default)]
    pub streaming_episodes: Vec<StreamingEpisode>,
    #[serde(default)]
    pub trailer: Option<Trailer>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub tags: Vec<MediaTag>,
    #[serde(default)]
    pub relations: Option<RelationConnection>,
    #[serde(default)]
    pub characters: Option<CharacterConnection>,
    #[serde(default)]
    pub recommendations: Option<RecommendationConnection>,
    /// Only populated on relation nodes (`ANIME` / `MANGA`).
    #[serde(rename = "type", default)]
    pub media_type: Option<String>,
}

impl Media {
    /// Preferred display title: english, then romaji, then empty.
    pub fn display_title(&self) -> String {
        self.title
            .english
            .clone()
            .or_else(|| self.title.romaji.clone())
            .unwrap_or_default()
    }

    /// Extra-large cover image URL, or empty when absent.
    pub fn poster(&self) -> String {
        self.cover_image
            .as_ref()
            .and_then(|c| c.extra_large.clone())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaTitle {
    #[serde(default)]
    pub romaji: Option<String>,
    #[serde(default)]
    pub english: Option<String>,
    #[serde(default)]
    pub native: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverImage {
    #[serde(default)]
    pub extra_large: Option<String>,
    #[serde(default)]
    pub large: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextAiringEpisode {
    pub time_until_airing: i64,
    #[serde(default)]
    pub episode: Option<i64>,
}

/// Partial calendar date as the provider reports it; passed through as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuzzyDate {
    #[serde(default)]
    pub year: Option<i64>,
    #[serde(default)]
    pub month: Option<i64>,
    #[serde(default)]
    pub day: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StudioConnection {
    #[serde(default)]
    pub nodes: Vec<Studio>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Studio {
    pub name: String,
    #[serde(default)]
    pub is_animation_studio: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamingEpisode {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub site: Option<String>,
}

/// Trailer reference; the id is a string for most sites but not guaranteed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trailer {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub site: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaTag {
    pub name: String,
    #[serde(default)]
    pub rank: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelationConnection {
    #[serde(default)]
    pub edges: Vec<RelationEdge>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationEdge {
    #[serde(default)]
    pub relation_type: Option<String>,
    pub node: Media,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CharacterConnection {
    #[serde(default)]
    pub edges: Vec<CharacterEdge>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterEdge {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub node: Option<CharacterNode>,
    #[serde(default)]
    pub voice_actors: Vec<CharacterNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CharacterNode {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<CharacterName>,
    #[serde(default)]
    pub image: Option<CharacterImage>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterName {
    #[serde(default)]
    pub user_preferred: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CharacterImage {
    #[serde(default)]
    pub large: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationConnection {
    #[serde(default)]
    pub nodes: Vec<RecommendationNode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationNode {
    #[serde(default)]
    pub media_recommendation: Option<Media>,
}

/// One page of search results.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default)]
    pub page_info: Option<PageInfo>,
    #[serde(default)]
    pub media: Vec<Media>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub total: Option<i64>,
    #[serde(default)]
    pub current_page: Option<i64>,
    #[serde(default)]
    pub last_page: Option<i64>,
    #[serde(default)]
    pub has_next_page: Option<bool>,
    #[serde(default)]
    pub per_page: Option<i64>,
}
