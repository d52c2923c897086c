//! Home feed: curated spotlight fan-out plus the hand-maintained
//! "recently added" shelf.

use axum::extract::State;
use axum::Json;
use futures::future::join_all;
use serde_json::{json, Value};

use aozora_core::models::view::{RecentEntry, SpotlightEntry};
use aozora_core::normalize::extract_artwork;

use crate::state::AppState;

pub async fn home(State(state): State<AppState>) -> Json<Value> {
    let spotlight = fetch_spotlight(&state).await;
    Json(json!({
        "spotlight": spotlight,
        "recently added": recently_added(),
    }))
}

/// Fetch all spotlight entries concurrently with settle-all semantics:
/// a failing or absent id is dropped without affecting its siblings, and
/// output order follows the configured id list.
pub async fn fetch_spotlight(state: &AppState) -> Vec<SpotlightEntry> {
    let tasks = state
        .config
        .spotlight_ids
        .iter()
        .map(|&id| spotlight_entry(state, id));
    join_all(tasks).await.into_iter().flatten().collect()
}

async fn spotlight_entry(state: &AppState, id: i64) -> Option<SpotlightEntry> {
    let (media, mapping) = tokio::join!(
        state.metadata.spotlight_media(id),
        state.artwork.mappings(id),
    );

    let media = match media {
        Ok(Some(media)) => media,
        Ok(None) => {
            tracing::warn!(id, "spotlight media absent upstream");
            return None;
        }
        Err(e) => {
            tracing::warn!(id, error = %e, "spotlight metadata fetch failed");
            return None;
        }
    };

    // Artwork is decorative; a failed mapping fetch falls back to the
    // provider's own images.
    let mapping = match mapping {
        Ok(mapping) => Some(mapping),
        Err(e) => {
            tracing::warn!(id, error = %e, "artwork mapping fetch failed");
            None
        }
    };

    let artwork = extract_artwork(mapping.as_ref(), state.overrides.get(id));
    Some(SpotlightEntry::from_media(&media, &artwork))
}

fn recent(id: i64, title: &str, poster: &str, kind: &str, episodes: i64) -> RecentEntry {
    RecentEntry {
        id,
        title: title.to_string(),
        poster: poster.to_string(),
        kind: kind.to_string(),
        episodes,
        status: "Releasing".to_string(),
    }
}

/// Hand-curated shelf, updated by hand each season.
fn recently_added() -> Vec<RecentEntry> {
    vec![
        recent(
            183984,
            "The Case Book of Arne",
            "https://serveproxy.com/?url=https://s4.anilist.co/file/anilistcdn/media/anime/cover/large/bx183984-uq5scAXrhEdx.jpg",
            "TV",
            12,
        ),
        recent(
            183661,
            "Isekai Office Worker",
            "https://serveproxy.com/?url=https://s4.anilist.co/file/anilistcdn/media/anime/cover/large/bx183661-3muPFi4LtHmK.jpg",
            "TV",
            12,
        ),
        recent(
            177679,
            "The Darwin Incident",
            "https://serveproxy.com/?url=https://s4.anilist.co/file/anilistcdn/media/anime/cover/large/bx177679-BgsgE0fQk3qN.jpg",
            "TV",
            13,
        ),
        recent(
            187942,
            "Tune In to the Midnight Heart",
            "https://serveproxy.com/?url=https://s4.anilist.co/file/anilistcdn/media/anime/cover/large/bx187942-c2cZvunJGfiE.jpg",
            "TV",
            12,
        ),
        recent(
            194318,
            "Yoroi-Shinden Samurai Johnny",
            "https://serveproxy.com/?url=https://s4.anilist.co/file/anilistcdn/media/anime/cover/large/bx194318-V3STmm4wutVQ.jpg",
            "TV",
            12,
        ),
        recent(
            176370,
            "'Tis Time for \"Torture,\" Princess Season 2",
            "https://serveproxy.com/?url=https://s4.anilist.co/file/anilistcdn/media/anime/cover/large/bx176370-hz2H4TUeyGgt.png",
            "TV",
            12,
        ),
        recent(
            185646,
            "Koupen-chan",
            "https://serveproxy.com/?url=https://s4.anilist.co/file/anilistcdn/media/anime/cover/large/bx185646-2eGmsnaSHiLC.jpg",
            "TV Short",
            47,
        ),
        recent(
            189565,
            "You Can't Be in a Real Harem",
            "https://serveproxy.com/?url=https://s4.anilist.co/file/anilistcdn/media/anime/cover/large/bx189565-OHhadYSsd0Bg.jpg",
            "TV",
            12,
        ),
        recent(
            195515,
            "There Was a Cute Girl in the Hero's Party",
            "https://serveproxy.com/?url=https://s4.anilist.co/file/anilistcdn/media/anime/cover/large/bx195515-p1nD71Hmr4ly.jpg",
            "TV",
            12,
        ),
    ]
}
