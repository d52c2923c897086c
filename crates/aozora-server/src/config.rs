//! Environment-driven server configuration.
//!
//! Read once at startup and injected into [`crate::state::AppState`] as an
//! immutable value; nothing here is mutated after boot.

use std::env;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_METADATA_URL: &str = "https://graphql.anilist.co";
const DEFAULT_ARTWORK_URL: &str = "https://api.ani.zip";

/// Curated ids rendered on the home feed, in display order.
const DEFAULT_SPOTLIGHT_IDS: &[i64] = &[195322, 166613, 182255, 21, 195515, 172463, 99750];

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub metadata_url: String,
    pub artwork_url: String,
    pub mapper_url: String,
    pub stream_url: String,
    pub spotlight_ids: Vec<i64>,
    /// Whether 500 responses may carry an internal message.
    pub development: bool,
}

impl ServerConfig {
    /// Build the config from the process environment, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let metadata_url = env::var("METADATA_URL")
            .map(|u| clean_base_url(&u))
            .unwrap_or_else(|_| DEFAULT_METADATA_URL.to_string());
        let artwork_url = env::var("ARTWORK_URL")
            .map(|u| clean_base_url(&u))
            .unwrap_or_else(|_| DEFAULT_ARTWORK_URL.to_string());
        let mapper_url = env::var("MAPPER_URL")
            .map(|u| clean_base_url(&u))
            .unwrap_or_default();
        let stream_url = env::var("STREAM_URL")
            .map(|u| clean_base_url(&u))
            .unwrap_or_default();

        if mapper_url.is_empty() {
            tracing::warn!("MAPPER_URL is not set, episode resolution will fail");
        }
        if stream_url.is_empty() {
            tracing::warn!("STREAM_URL is not set, stream resolution will fail");
        }

        Self {
            port,
            metadata_url,
            artwork_url,
            mapper_url,
            stream_url,
            spotlight_ids: DEFAULT_SPOTLIGHT_IDS.to_vec(),
            development: env::var("APP_ENV").map(|v| v == "development").unwrap_or(false),
        }
    }
}

/// Trim whitespace and trailing slashes off a configured base URL.
pub fn clean_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
