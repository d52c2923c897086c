//! Shared application state: the config value and one client per upstream.

use std::sync::Arc;

use aozora_api::{
    ArtworkClient, EpisodeResolver, FetchClient, MapperClient, MetadataClient, StreamClient,
};
use aozora_core::normalize::ArtOverrideTable;
use aozora_core::remap::RemapTable;

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub metadata: Arc<MetadataClient>,
    pub artwork: Arc<ArtworkClient>,
    pub resolver: Arc<EpisodeResolver>,
    pub stream: Arc<StreamClient>,
    pub overrides: Arc<ArtOverrideTable>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self::with_tables(config, RemapTable::default(), ArtOverrideTable::default())
    }

    /// State with explicit remap/override tables; used by tests.
    pub fn with_tables(
        config: ServerConfig,
        remap: RemapTable,
        overrides: ArtOverrideTable,
    ) -> Self {
        let fetch = FetchClient::new();
        let metadata = MetadataClient::new(fetch.clone(), config.metadata_url.clone());
        let artwork = ArtworkClient::new(fetch.clone(), config.artwork_url.clone());
        let mapper = MapperClient::new(fetch.clone(), config.mapper_url.clone());
        let stream = StreamClient::new(fetch, config.stream_url.clone());
        let resolver = EpisodeResolver::new(remap, mapper, stream.clone());

        Self {
            config: Arc::new(config),
            metadata: Arc::new(metadata),
            artwork: Arc::new(artwork),
            resolver: Arc::new(resolver),
            stream: Arc::new(stream),
            overrides: Arc::new(overrides),
        }
    }
}
