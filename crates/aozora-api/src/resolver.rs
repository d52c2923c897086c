//! Episode-list resolution across the two supported upstream shapes.

use aozora_core::episodes::{Episode, EpisodeSource};
use aozora_core::remap::RemapTable;

use crate::mapper::MapperClient;
use crate::stream::StreamClient;

/// Resolves the episode list for a canonical anime id, consulting the
/// remap table to decide which upstream (and response shape) to use.
pub struct EpisodeResolver {
    remap: RemapTable,
    mapper: MapperClient,
    stream: StreamClient,
}

impl EpisodeResolver {
    pub fn new(remap: RemapTable, mapper: MapperClient, stream: StreamClient) -> Self {
        Self {
            remap,
            mapper,
            stream,
        }
    }

    /// Fetch the episode list. Never errors: any upstream failure is logged
    /// and yields an empty list.
    pub async fn resolve(&self, anime_id: &str) -> Vec<Episode> {
        match EpisodeSource::select(&self.remap, anime_id) {
            EpisodeSource::Remapped { slug } => match self.stream.episodes(&slug).await {
                Ok(list) => {
                    tracing::debug!(anime_id, slug, count = list.len(), "episodes via remap");
                    list
                }
                Err(e) => {
                    tracing::warn!(anime_id, slug, error = %e, "remapped episode fetch failed");
                    Vec::new()
                }
            },
            EpisodeSource::Mapper { anime_id: id } => match self.mapper.episodes(&id).await {
                Ok(list) => {
                    tracing::debug!(anime_id, count = list.len(), "episodes via mapper");
                    list
                }
                Err(e) => {
                    tracing::warn!(anime_id, error = %e, "episode list fetch failed");
                    Vec::new()
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    use crate::fetch::FetchClient;

    use super::*;

    async fn spawn_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// Mock upstreams serving both shapes: the mapper nests episodes under
    /// `data.episodesList`, the stream service keeps them under `data`.
    async fn spawn_upstreams() -> String {
        let router = Router::new()
            .route(
                "/anime/info/{id}",
                get(|| async {
                    Json(json!({
                        "data": { "episodesList": [
                            { "id": "mapped?ep=1", "number": 1 },
                            { "id": "mapped?ep=2", "number": 2 }
                        ]}
                    }))
                }),
            )
            .route(
                "/episodes/{slug}",
                get(|| async {
                    Json(json!({
                        "data": [ { "id": "remapped?ep=1", "episodeNumber": "1" } ]
                    }))
                }),
            );
        spawn_server(router).await
    }

    fn resolver(base: &str, remap: RemapTable) -> EpisodeResolver {
        let fetch = FetchClient::new();
        EpisodeResolver::new(
            remap,
            MapperClient::new(fetch.clone(), base),
            StreamClient::new(fetch, base),
        )
    }

    #[tokio::test]
    async fn unmapped_id_uses_mapper_shape() {
        let base = spawn_upstreams().await;
        let resolver = resolver(&base, RemapTable::empty());

        let episodes = resolver.resolve("21").await;
        assert_eq!(episodes.len(), 2);
        assert_eq!(episodes[0].id.as_deref(), Some("mapped?ep=1"));
    }

    #[tokio::test]
    async fn remapped_id_uses_stream_shape() {
        let base = spawn_upstreams().await;
        let remap = RemapTable::new(HashMap::from([(
            "172463".to_string(),
            "some-remapped-slug".to_string(),
        )]));
        let resolver = resolver(&base, remap);

        let episodes = resolver.resolve("172463").await;
        assert_eq!(episodes.len(), 1);
        assert_eq!(episodes[0].id.as_deref(), Some("remapped?ep=1"));
    }

    #[tokio::test]
    async fn upstream_failure_yields_empty_list() {
        let resolver = resolver("http://127.0.0.1:1", RemapTable::empty());
        assert!(resolver.resolve("21").await.is_empty());
    }
}
