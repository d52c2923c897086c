//! Normalization of heterogeneous upstream metadata fields into the stable
//! display values used across all response shapes.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::mapping::MappingResponse;
use crate::models::media::Media;

static HTML_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>?").expect("valid regex"));

const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_HOUR: i64 = 3_600;

/// Countdown and episode-count display for a media record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiringDisplay {
    /// `"{days}d {hours}h"` until the next episode, or empty when nothing
    /// is scheduled.
    pub time_left: String,
    /// The upcoming episode number while airing, otherwise the total
    /// episode count (or `"NA"` when unknown).
    pub episode_count: String,
}

/// Decompose the airing countdown into whole days and remaining whole hours.
pub fn airing_display(media: &Media) -> AiringDisplay {
    if let Some(next) = &media.next_airing_episode {
        let seconds = next.time_until_airing;
        let days = seconds / SECONDS_PER_DAY;
        let hours = (seconds % SECONDS_PER_DAY) / SECONDS_PER_HOUR;
        return AiringDisplay {
            time_left: format!("{days}d {hours}h"),
            episode_count: next
                .episode
                .map(|e| e.to_string())
                .unwrap_or_default(),
        };
    }
    AiringDisplay {
        time_left: String::new(),
        episode_count: media
            .episodes
            .map(|e| e.to_string())
            .unwrap_or_else(|| "NA".to_string()),
    }
}

/// Map the provider's uppercase snake-case status enum to display form.
///
/// `FINISHED` maps to the literal `Completed`; anything else keeps its first
/// letter and lowercases the rest, with underscores becoming spaces.
pub fn format_status(status: Option<&str>) -> String {
    match status {
        Some("FINISHED") => "Completed".to_string(),
        None | Some("") => "Unknown".to_string(),
        Some(s) => {
            let mut chars = s.chars();
            match chars.next() {
                Some(first) => {
                    format!("{first}{}", chars.as_str().to_lowercase().replace('_', " "))
                }
                None => "Unknown".to_string(),
            }
        }
    }
}

/// `"Spring 2024"` style season label, `Unknown` when either part is absent.
pub fn format_season(season: Option<&str>, year: Option<i64>) -> String {
    match (season, year) {
        (Some(season), Some(year)) if !season.is_empty() => {
            let mut chars = season.chars();
            match chars.next() {
                Some(first) => format!("{first}{} {year}", chars.as_str().to_lowercase()),
                None => "Unknown".to_string(),
            }
        }
        _ => "Unknown".to_string(),
    }
}

/// Strip HTML tags out of a free-text description.
pub fn strip_html(text: &str) -> String {
    HTML_TAG_RE.replace_all(text, "").into_owned()
}

/// Banner and logo resolved from the image-mapping service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Artwork {
    pub banner: String,
    pub logo: String,
}

/// Manual per-id artwork override, preferred over anything the mapping
/// service reports.
#[derive(Debug, Clone)]
pub struct ArtOverride {
    pub banner: String,
    pub logo: String,
}

/// Immutable per-id artwork overrides, built at startup.
#[derive(Debug, Clone)]
pub struct ArtOverrideTable {
    entries: HashMap<i64, ArtOverride>,
}

impl ArtOverrideTable {
    pub fn new(entries: HashMap<i64, ArtOverride>) -> Self {
        Self { entries }
    }

    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, id: i64) -> Option<&ArtOverride> {
        self.entries.get(&id)
    }
}

impl Default for ArtOverrideTable {
    fn default() -> Self {
        let entries = HashMap::from([(
            99750,
            ArtOverride {
                logo: "https://image.tmdb.org/t/p/original/iOGhQzUidBzOj6pxKp7pBZkw2ta.png"
                    .to_string(),
                banner:
                    "https://artworks.thetvdb.com/banners/movies/16877/backgrounds/16877.jpg"
                        .to_string(),
            },
        )]);
        Self { entries }
    }
}

/// Pick a banner (first `Fanart` image) and a logo (first `Clearlogo`) out
/// of a mapping response, stopping once both are found. An explicit override
/// wins outright.
pub fn extract_artwork(
    mapping: Option<&MappingResponse>,
    override_entry: Option<&ArtOverride>,
) -> Artwork {
    if let Some(ov) = override_entry {
        return Artwork {
            banner: ov.banner.clone(),
            logo: ov.logo.clone(),
        };
    }

    let mut artwork = Artwork::default();
    let images = mapping.map(|m| m.images.as_slice()).unwrap_or_default();
    for img in images {
        let (Some(cover_type), Some(url)) = (img.cover_type.as_deref(), img.url.as_deref()) else {
            continue;
        };
        if cover_type == "Fanart" && artwork.banner.is_empty() {
            artwork.banner = url.to_string();
        }
        if cover_type == "Clearlogo" && artwork.logo.is_empty() {
            artwork.logo = url.to_string();
        }
        if !artwork.banner.is_empty() && !artwork.logo.is_empty() {
            break;
        }
    }
    artwork
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::mapping::MappingImage;
    use crate::models::media::NextAiringEpisode;

    fn media_with_airing(seconds: i64, episode: Option<i64>) -> Media {
        let mut media: Media = serde_json::from_value(serde_json::json!({ "id": 1 })).unwrap();
        media.next_airing_episode = Some(NextAiringEpisode {
            time_until_airing: seconds,
            episode,
        });
        media
    }

    #[test]
    fn airing_countdown_decomposes_days_and_hours() {
        let media = media_with_airing(97_200, Some(12));
        let display = airing_display(&media);
        assert_eq!(display.time_left, "1d 3h");
        assert_eq!(display.episode_count, "12");
    }

    #[test]
    fn airing_falls_back_to_total_episodes() {
        let mut media: Media = serde_json::from_value(serde_json::json!({ "id": 1 })).unwrap();
        media.episodes = Some(24);
        let display = airing_display(&media);
        assert_eq!(display.time_left, "");
        assert_eq!(display.episode_count, "24");

        media.episodes = None;
        assert_eq!(airing_display(&media).episode_count, "NA");
    }

    #[test]
    fn status_formatting_table() {
        assert_eq!(format_status(Some("FINISHED")), "Completed");
        assert_eq!(format_status(Some("NOT_YET_RELEASED")), "Not yet released");
        assert_eq!(format_status(Some("RELEASING")), "Releasing");
        assert_eq!(format_status(None), "Unknown");
    }

    #[test]
    fn season_formatting() {
        assert_eq!(format_season(Some("SPRING"), Some(2024)), "Spring 2024");
        assert_eq!(format_season(Some("SPRING"), None), "Unknown");
        assert_eq!(format_season(None, Some(2024)), "Unknown");
    }

    #[test]
    fn html_is_stripped_from_descriptions() {
        assert_eq!(
            strip_html("An <b>epic</b> tale.<br><i>Part two.</i>"),
            "An epic tale.Part two."
        );
        assert_eq!(strip_html("plain text"), "plain text");
    }

    #[test]
    fn artwork_takes_first_of_each_tag() {
        let mapping = MappingResponse {
            images: vec![
                MappingImage::new("Poster", "https://img/poster.png"),
                MappingImage::new("Fanart", "https://img/fanart-1.png"),
                MappingImage::new("Fanart", "https://img/fanart-2.png"),
                MappingImage::new("Clearlogo", "https://img/logo.png"),
            ],
        };
        let artwork = extract_artwork(Some(&mapping), None);
        assert_eq!(artwork.banner, "https://img/fanart-1.png");
        assert_eq!(artwork.logo, "https://img/logo.png");
    }

    #[test]
    fn artwork_override_wins() {
        let mapping = MappingResponse {
            images: vec![MappingImage::new("Fanart", "https://img/fanart.png")],
        };
        let ov = ArtOverride {
            banner: "https://override/banner.jpg".to_string(),
            logo: "https://override/logo.png".to_string(),
        };
        let artwork = extract_artwork(Some(&mapping), Some(&ov));
        assert_eq!(artwork.banner, "https://override/banner.jpg");
        assert_eq!(artwork.logo, "https://override/logo.png");
    }

    #[test]
    fn artwork_empty_without_mapping() {
        assert_eq!(extract_artwork(None, None), Artwork::default());
    }
}
