//! Response projections: the stable shapes served to API consumers,
//! assembled from normalized upstream metadata.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::episodes::Episode;
use crate::models::media::{
    FuzzyDate, Media, MediaTag, PageInfo, RelationEdge, StreamingEpisode, Studio, Trailer,
};
use crate::normalize::{airing_display, format_season, format_status, strip_html, Artwork};

static EPISODE_TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:Episode|Ep)\s*(\d+(?:\.\d+)?)").expect("valid regex"));

const MAX_TAGS: usize = 10;

/// One curated home-feed entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotlightEntry {
    pub id: i64,
    pub title: String,
    pub logo: String,
    pub banner: String,
    pub description: String,
    pub season: String,
    pub episode: String,
    pub time_left: String,
    pub status: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl SpotlightEntry {
    pub fn from_media(media: &Media, artwork: &Artwork) -> Self {
        let airing = airing_display(media);
        let poster = media.poster();
        let logo = if artwork.logo.is_empty() {
            poster.clone()
        } else {
            artwork.logo.clone()
        };
        let banner = if !artwork.banner.is_empty() {
            artwork.banner.clone()
        } else if let Some(b) = media.banner_image.clone() {
            b
        } else {
            poster
        };
        Self {
            id: media.id,
            title: media.display_title(),
            logo,
            banner,
            description: media
                .description
                .as_deref()
                .map(strip_html)
                .unwrap_or_default(),
            season: format_season(media.season.as_deref(), media.season_year),
            episode: airing.episode_count,
            time_left: airing.time_left,
            status: format_status(media.status.as_deref()),
            kind: media.format.clone().unwrap_or_else(|| "TV".to_string()),
        }
    }
}

/// One hand-curated "recently added" entry.
#[derive(Debug, Clone, Serialize)]
pub struct RecentEntry {
    pub id: i64,
    pub title: String,
    pub poster: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub episodes: i64,
    pub status: String,
}

/// One projected search result.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEntry {
    pub id: i64,
    pub title: String,
    pub poster: String,
    pub format: String,
    pub status: String,
    pub episodes: Option<i64>,
    pub average_score: Option<i64>,
    pub season: Option<String>,
    pub season_year: Option<i64>,
    pub color: String,
}

impl SearchEntry {
    pub fn from_media(media: &Media) -> Self {
        Self {
            id: media.id,
            title: media.display_title(),
            poster: media.poster(),
            format: media.format.clone().unwrap_or_else(|| "TV".to_string()),
            status: format_status(media.status.as_deref()),
            episodes: media.episodes,
            average_score: media.average_score,
            season: media.season.clone(),
            season_year: media.season_year,
            color: media
                .cover_image
                .as_ref()
                .and_then(|c| c.color.clone())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationEntry {
    pub id: i64,
    pub title: String,
    pub poster: String,
    pub format: String,
    pub status: String,
    pub episodes: Option<i64>,
    pub average_score: Option<i64>,
    pub season: Option<String>,
    pub season_year: Option<i64>,
}

impl RecommendationEntry {
    pub fn from_media(media: &Media) -> Self {
        Self {
            id: media.id,
            title: media.display_title(),
            poster: media.poster(),
            format: media.format.clone().unwrap_or_else(|| "TV".to_string()),
            status: format_status(media.status.as_deref()),
            episodes: media.episodes,
            average_score: media.average_score,
            season: media.season.clone(),
            season_year: media.season_year,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationEntry {
    pub relation_type: Option<String>,
    pub id: i64,
    pub title: String,
    pub poster: String,
    pub format: Option<String>,
    pub status: String,
    pub episodes: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl RelationEntry {
    pub fn from_edge(edge: &RelationEdge) -> Self {
        Self {
            relation_type: edge.relation_type.clone(),
            id: edge.node.id,
            title: edge.node.display_title(),
            poster: edge.node.poster(),
            format: edge.node.format.clone(),
            status: format_status(edge.node.status.as_deref()),
            episodes: edge.node.episodes,
            kind: edge.node.media_type.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceActorEntry {
    pub id: Option<i64>,
    pub name: String,
    pub image: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterEntry {
    pub role: Option<String>,
    pub id: Option<i64>,
    pub name: String,
    pub image: String,
    pub voice_actors: Vec<VoiceActorEntry>,
}

/// Full detail payload for one media record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeDetail {
    pub id: i64,
    pub title: String,
    pub title_romaji: String,
    pub title_native: String,
    pub poster: String,
    pub logo: String,
    pub color: String,
    pub banner: String,
    pub description: String,
    pub season: String,
    pub episode: String,
    pub total_episodes: Option<i64>,
    pub duration: Option<i64>,
    pub time_left: String,
    pub status: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub genres: Vec<String>,
    pub average_score: Option<i64>,
    pub mean_score: Option<i64>,
    pub popularity: Option<i64>,
    pub favourites: Option<i64>,
    pub source: Option<String>,
    pub country_of_origin: Option<String>,
    pub start_date: Option<FuzzyDate>,
    pub end_date: Option<FuzzyDate>,
    pub studios: Vec<Studio>,
    pub streaming_episodes: Vec<StreamingEpisode>,
    pub trailer: Option<Trailer>,
    pub synonyms: Vec<String>,
    pub tags: Vec<MediaTag>,
    pub relations: Vec<RelationEntry>,
    pub characters: Vec<CharacterEntry>,
}

impl AnimeDetail {
    pub fn from_media(media: &Media, artwork: &Artwork) -> Self {
        let airing = airing_display(media);

        let relations = media
            .relations
            .as_ref()
            .map(|r| r.edges.iter().map(RelationEntry::from_edge).collect())
            .unwrap_or_default();

        let characters = media
            .characters
            .as_ref()
            .map(|c| {
                c.edges
                    .iter()
                    .map(|edge| CharacterEntry {
                        role: edge.role.clone(),
                        id: edge.node.as_ref().and_then(|n| n.id),
                        name: edge
                            .node
                            .as_ref()
                            .and_then(|n| n.name.as_ref())
                            .and_then(|n| n.user_preferred.clone())
                            .unwrap_or_default(),
                        image: edge
                            .node
                            .as_ref()
                            .and_then(|n| n.image.as_ref())
                            .and_then(|i| i.large.clone())
                            .unwrap_or_default(),
                        voice_actors: edge
                            .voice_actors
                            .iter()
                            .map(|va| VoiceActorEntry {
                                id: va.id,
                                name: va
                                    .name
                                    .as_ref()
                                    .and_then(|n| n.user_preferred.clone())
                                    .unwrap_or_default(),
                                image: va
                                    .image
                                    .as_ref()
                                    .and_then(|i| i.large.clone())
                                    .unwrap_or_default(),
                            })
                            .collect(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let poster = media.poster();
        let banner = if !artwork.banner.is_empty() {
            artwork.banner.clone()
        } else if let Some(b) = media.banner_image.clone() {
            b
        } else {
            poster.clone()
        };

        Self {
            id: media.id,
            title: media.display_title(),
            title_romaji: media.title.romaji.clone().unwrap_or_default(),
            title_native: media.title.native.clone().unwrap_or_default(),
            poster,
            logo: artwork.logo.clone(),
            color: media
                .cover_image
                .as_ref()
                .and_then(|c| c.color.clone())
                .unwrap_or_default(),
            banner,
            description: media
                .description
                .as_deref()
                .map(strip_html)
                .unwrap_or_default(),
            season: format_season(media.season.as_deref(), media.season_year),
            episode: airing.episode_count,
            total_episodes: media.episodes,
            duration: media.duration,
            time_left: airing.time_left,
            status: format_status(media.status.as_deref()),
            kind: media.format.clone().unwrap_or_else(|| "TV".to_string()),
            genres: media.genres.clone(),
            average_score: media.average_score,
            mean_score: media.mean_score,
            popularity: media.popularity,
            favourites: media.favourites,
            source: media.source.clone(),
            country_of_origin: media.country_of_origin.clone(),
            start_date: media.start_date.clone(),
            end_date: media.end_date.clone(),
            studios: media
                .studios
                .as_ref()
                .map(|s| s.nodes.clone())
                .unwrap_or_default(),
            streaming_episodes: media.streaming_episodes.clone(),
            trailer: media.trailer.clone(),
            synonyms: media.synonyms.clone(),
            tags: media.tags.iter().take(MAX_TAGS).cloned().collect(),
            relations,
            characters,
        }
    }
}

/// Recommendations projected out of the detail response, skipping nodes
/// whose referenced media is gone.
pub fn project_recommendations(media: &Media) -> Vec<RecommendationEntry> {
    media
        .recommendations
        .as_ref()
        .map(|r| {
            r.nodes
                .iter()
                .filter_map(|n| n.media_recommendation.as_ref())
                .map(RecommendationEntry::from_media)
                .collect()
        })
        .unwrap_or_default()
}

/// An episode list entry enriched with a thumbnail when the provider's
/// per-episode streaming entries carry a matching `Episode N` title.
#[derive(Debug, Clone, Serialize)]
pub struct EpisodeView {
    #[serde(flatten)]
    pub episode: Episode,
    pub thumbnail: String,
}

/// Cross-reference resolved episode numbers against streaming-entry titles.
pub fn attach_thumbnails(
    episodes: Vec<Episode>,
    streaming: &[StreamingEpisode],
) -> Vec<EpisodeView> {
    episodes
        .into_iter()
        .map(|episode| {
            let thumbnail = episode
                .number_value()
                .and_then(|num| thumbnail_for(streaming, num))
                .unwrap_or_default();
            EpisodeView { episode, thumbnail }
        })
        .collect()
}

fn thumbnail_for(streaming: &[StreamingEpisode], number: f64) -> Option<String> {
    for entry in streaming {
        let Some(title) = entry.title.as_deref() else {
            continue;
        };
        let parsed = EPISODE_TITLE_RE
            .captures(title)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok());
        if parsed == Some(number) {
            return entry.thumbnail.clone();
        }
    }
    None
}

/// Search page info is passed through unchanged.
pub type SearchPageInfo = PageInfo;

/// `pageInfo` defaults used when the provider omits the block entirely.
pub fn empty_page_info() -> PageInfo {
    PageInfo {
        total: None,
        current_page: None,
        last_page: None,
        has_next_page: None,
        per_page: None,
    }
}
