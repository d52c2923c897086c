//! Static overrides for episode resolution.
//!
//! A handful of canonical ids resolve their episode lists against the
//! stream service directly (under an alternate slug) instead of the mapper
//! service. Presence in the table changes both the URL that is fetched and
//! the shape of the response consumed, see [`crate::episodes::EpisodeSource`].

use std::collections::HashMap;

/// Immutable canonical-id -> stream-service-slug mapping, built at startup.
#[derive(Debug, Clone)]
pub struct RemapTable {
    entries: HashMap<String, String>,
}

impl RemapTable {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// The alternate slug for `anime_id`, if one is registered.
    pub fn lookup(&self, anime_id: &str) -> Option<&str> {
        self.entries.get(anime_id).map(String::as_str)
    }

    pub fn contains(&self, anime_id: &str) -> bool {
        self.entries.contains_key(anime_id)
    }
}

impl Default for RemapTable {
    fn default() -> Self {
        let entries = [
            (
                "172463",
                "jujutsu-kaisen-the-culling-game-part-1-20401",
            ),
            ("131573", "jujutsu-kaisen-0-movie-17763"),
        ]
        .into_iter()
        .map(|(id, slug)| (id.to_string(), slug.to_string()))
        .collect();
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_carries_known_overrides() {
        let table = RemapTable::default();
        assert_eq!(
            table.lookup("172463"),
            Some("jujutsu-kaisen-the-culling-game-part-1-20401")
        );
        assert!(table.contains("131573"));
        assert_eq!(table.lookup("21"), None);
    }
}
