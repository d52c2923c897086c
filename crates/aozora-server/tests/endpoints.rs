//! End-to-end endpoint tests against mock upstream services.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use aozora_core::normalize::ArtOverrideTable;
use aozora_core::remap::RemapTable;
use aozora_server::handlers::home::fetch_spotlight;
use aozora_server::handlers::search::SearchParams;
use aozora_server::handlers::stream::StreamParams;
use aozora_server::{create_router, handlers, AppError, AppState, ServerConfig};

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// GraphQL stub. Media id 2 always errors, id 404 resolves to no media,
/// the search term "err" returns a provider error list.
async fn graphql(Json(body): Json<Value>) -> Json<Value> {
    let query = body["query"].as_str().unwrap_or_default();
    if query.contains("Page(") {
        let search = body["variables"]["search"].as_str().unwrap_or_default();
        if search == "err" {
            return Json(json!({ "errors": [ { "message": "invalid search" } ] }));
        }
        return Json(json!({
            "data": { "Page": {
                "pageInfo": {
                    "total": 1, "currentPage": 1, "lastPage": 1,
                    "hasNextPage": false, "perPage": 20
                },
                "media": [ {
                    "id": 30,
                    "title": { "english": "Found Show" },
                    "status": "FINISHED"
                } ]
            }}
        }));
    }

    match body["variables"]["id"].as_i64().unwrap_or_default() {
        2 => Json(json!({ "errors": [ { "message": "boom" } ] })),
        404 => Json(json!({ "data": { "Media": null } })),
        id => Json(json!({
            "data": { "Media": {
                "id": id,
                "title": { "english": format!("Show {id}") },
                "coverImage": { "extraLarge": "https://img/cover.png" },
                "status": "RELEASING",
                "streamingEpisodes": [
                    { "title": "Episode 2 - Turning Point", "thumbnail": "https://img/ep2.jpg" }
                ]
            }}
        })),
    }
}

/// One router standing in for all four upstream services.
async fn spawn_upstreams() -> String {
    let router = Router::new()
        .route("/", post(graphql))
        .route(
            "/mappings",
            get(|| async {
                Json(json!({ "images": [
                    { "coverType": "Fanart", "url": "https://art/fanart.jpg" },
                    { "coverType": "Clearlogo", "url": "https://art/logo.png" }
                ]}))
            }),
        )
        .route(
            "/anime/info/{id}",
            get(|| async {
                Json(json!({ "data": { "episodesList": [
                    { "id": "tv?ep=1", "number": 1, "title": "First" },
                    { "id": "tv?ep=2", "number": 2, "title": "Second" }
                ]}}))
            }),
        )
        .route(
            "/episodes/{slug}",
            get(|| async {
                Json(json!({ "data": [
                    { "id": "remapped?ep=1", "episodeNumber": "1" }
                ]}))
            }),
        )
        .route(
            "/servers",
            get(|| async { Json(json!({ "sub": [ { "serverId": "hd-1" } ] })) }),
        );
    spawn(router).await
}

fn state_for(base: &str) -> AppState {
    let config = ServerConfig {
        port: 0,
        metadata_url: base.to_string(),
        artwork_url: base.to_string(),
        mapper_url: base.to_string(),
        stream_url: base.to_string(),
        spotlight_ids: vec![1, 2, 3],
        development: false,
    };
    AppState::with_tables(config, RemapTable::empty(), ArtOverrideTable::empty())
}

#[tokio::test]
async fn spotlight_drops_failed_ids_and_keeps_order() {
    let base = spawn_upstreams().await;
    let state = state_for(&base);

    let entries = fetch_spotlight(&state).await;
    let ids: Vec<i64> = entries.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![1, 3]);

    // Mapped artwork wins over the provider's own images.
    assert_eq!(entries[0].banner, "https://art/fanart.jpg");
    assert_eq!(entries[0].logo, "https://art/logo.png");
}

#[tokio::test]
async fn detail_reports_missing_anime_as_not_found() {
    let base = spawn_upstreams().await;
    let state = state_for(&base);

    let err = handlers::anime_detail(State(state.clone()), Path("404".to_string()))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    // Provider-side errors on the detail query read the same as absence.
    let err = handlers::anime_detail(State(state), Path("2".to_string()))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(err.into_response().status(), 404);
}

#[tokio::test]
async fn detail_merges_episodes_and_artwork() {
    let base = spawn_upstreams().await;
    let state = state_for(&base);

    let Json(resp) = handlers::anime_detail(State(state), Path("21".to_string()))
        .await
        .unwrap();
    assert!(resp.success);
    assert_eq!(resp.data.id, 21);
    assert_eq!(resp.data.banner, "https://art/fanart.jpg");
    assert_eq!(resp.episodes.len(), 2);
    assert_eq!(resp.episodes[0].thumbnail, "");
    assert_eq!(resp.episodes[1].thumbnail, "https://img/ep2.jpg");
}

#[tokio::test]
async fn search_passes_provider_errors_through_as_400() {
    let base = spawn_upstreams().await;
    let state = state_for(&base);

    let err = handlers::search(
        State(state),
        Path("err".to_string()),
        Query(SearchParams {
            page: 1,
            per_page: 20,
        }),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Upstream(_)));
    assert_eq!(err.into_response().status(), 400);
}

#[tokio::test]
async fn search_projects_results() {
    let base = spawn_upstreams().await;
    let state = state_for(&base);

    let Json(resp) = handlers::search(
        State(state),
        Path("found".to_string()),
        Query(SearchParams {
            page: 1,
            per_page: 20,
        }),
    )
    .await
    .unwrap();
    assert!(resp.success);
    assert_eq!(resp.results.len(), 1);
    assert_eq!(resp.results[0].title, "Found Show");
    assert_eq!(resp.results[0].status, "Completed");
    assert_eq!(resp.page_info.total, Some(1));
}

#[tokio::test]
async fn stream_resolves_episode_and_composes_link() {
    let base = spawn_upstreams().await;
    let state = state_for(&base);

    let Json(resp) = handlers::stream(
        State(state),
        Path("21".to_string()),
        Query(StreamParams {
            ep: "2".to_string(),
            server: "hd-1".to_string(),
            audio: "sub".to_string(),
        }),
    )
    .await
    .unwrap();
    assert!(resp.success);
    assert_eq!(resp.episodes_list.len(), 2);
    assert_eq!(resp.stream_link, format!("{base}/embed/hd-1/tv::ep=2/sub"));
    assert!(resp.stream_servers.is_object());
}

#[tokio::test]
async fn stream_unknown_episode_is_not_found() {
    let base = spawn_upstreams().await;
    let state = state_for(&base);

    let err = handlers::stream(
        State(state),
        Path("21".to_string()),
        Query(StreamParams {
            ep: "99".to_string(),
            server: "hd-1".to_string(),
            audio: "sub".to_string(),
        }),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn remapped_id_takes_the_stream_episode_shape() {
    let base = spawn_upstreams().await;
    let config = ServerConfig {
        port: 0,
        metadata_url: base.clone(),
        artwork_url: base.clone(),
        mapper_url: base.clone(),
        stream_url: base.clone(),
        spotlight_ids: vec![],
        development: false,
    };
    let remap = RemapTable::new(HashMap::from([(
        "172463".to_string(),
        "culling-game".to_string(),
    )]));
    let state = AppState::with_tables(config, remap, ArtOverrideTable::empty());

    let Json(resp) = handlers::episodes(State(state), Path("172463".to_string())).await;
    assert!(resp.success);
    assert_eq!(resp.episodes_list.len(), 1);
    assert_eq!(resp.episodes_list[0].id.as_deref(), Some("remapped?ep=1"));
}

#[tokio::test]
async fn router_serves_welcome_home_and_fallback() {
    let base = spawn_upstreams().await;
    let app = spawn(create_router(state_for(&base))).await;
    let http = reqwest::Client::new();

    let welcome: Value = http
        .get(&app)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(welcome["message"], "Welcome to the aozora API");

    let home: Value = http
        .get(format!("{app}/home"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(home["spotlight"].as_array().unwrap().len(), 2);
    assert_eq!(home["recently added"].as_array().unwrap().len(), 9);

    let missing = http.get(format!("{app}/nope")).send().await.unwrap();
    assert_eq!(missing.status(), 404);
    let body: Value = missing.json().await.unwrap();
    assert_eq!(body["error"], "Not Found");
}

#[tokio::test]
async fn router_serves_detail_and_search_over_http() {
    let base = spawn_upstreams().await;
    let app = spawn(create_router(state_for(&base))).await;
    let http = reqwest::Client::new();

    let detail = http.get(format!("{app}/anime/21")).send().await.unwrap();
    assert_eq!(detail.status(), 200);
    let body: Value = detail.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["id"], 21);

    let search = http.get(format!("{app}/search/err")).send().await.unwrap();
    assert_eq!(search.status(), 400);
    let body: Value = search.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(body["errors"].is_array());
}
