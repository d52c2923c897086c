//! Episode list shapes and the rules for locating a playable episode.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::remap::RemapTable;

/// One entry of an upstream episode list.
///
/// The two upstream shapes disagree on the number field (`episodeNumber`
/// vs `number`) and on whether it is a string or a number, so both are kept
/// loosely typed. Unknown fields are preserved so episode lists pass through
/// to API consumers unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Episode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(
        rename = "episodeNumber",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub episode_number: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Episode {
    /// Whether this episode matches the requested episode number under the
    /// loose comparison described in [`loose_number_eq`].
    pub fn matches_number(&self, requested: &str) -> bool {
        self.episode_number
            .as_ref()
            .is_some_and(|v| loose_number_eq(v, requested))
            || self
                .number
                .as_ref()
                .is_some_and(|v| loose_number_eq(v, requested))
    }

    /// The episode number as a float, preferring `number` over
    /// `episodeNumber`. Used for thumbnail cross-referencing.
    pub fn number_value(&self) -> Option<f64> {
        self.number
            .as_ref()
            .or(self.episode_number.as_ref())
            .and_then(value_as_f64)
    }
}

/// Which upstream serves the episode list for a given anime, and in which
/// shape. Making the two supported shapes an explicit variant keeps them
/// exhaustively handled instead of probed field-by-field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EpisodeSource {
    /// Stream service `episodes/{slug}`; episodes are the raw `data` array.
    Remapped { slug: String },
    /// Mapper service `anime/info/{id}`; episodes live at `data.episodesList`.
    Mapper { anime_id: String },
}

impl EpisodeSource {
    pub fn select(remap: &RemapTable, anime_id: &str) -> Self {
        match remap.lookup(anime_id) {
            Some(slug) => Self::Remapped {
                slug: slug.to_string(),
            },
            None => Self::Mapper {
                anime_id: anime_id.to_string(),
            },
        }
    }
}

/// Normalize an episode identifier to the `::` delimiter convention.
///
/// Identifiers already containing `::` are returned unchanged; otherwise the
/// first `?` is replaced.
pub fn canonical_episode_id(id: &str) -> String {
    if id.contains("::") {
        id.to_string()
    } else {
        id.replacen('?', "::", 1)
    }
}

/// Find the playback identifier for the requested episode number.
///
/// Returns `None` when no episode matches; callers must treat that as
/// "episode not found", not as an error.
pub fn find_episode_id(episodes: &[Episode], ep_num: &str) -> Option<String> {
    let episode = episodes.iter().find(|ep| ep.matches_number(ep_num));
    match episode.and_then(|ep| ep.id.as_deref()) {
        Some(id) => {
            tracing::debug!(episode = ep_num, id, "episode located");
            Some(canonical_episode_id(id))
        }
        None => {
            tracing::warn!(episode = ep_num, "episode not found in list");
            None
        }
    }
}

/// Loose string/numeric equality between an upstream number field and a
/// requested episode number. Both sides are normalized to `f64` when they
/// parse as one (so `"1"`, `1` and `"1.0"` all match); otherwise trimmed
/// string equality applies.
pub fn loose_number_eq(value: &Value, requested: &str) -> bool {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return false,
    };
    match (text.trim().parse::<f64>(), requested.trim().parse::<f64>()) {
        (Ok(a), Ok(b)) => a == b,
        _ => text.trim() == requested.trim(),
    }
}

fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
