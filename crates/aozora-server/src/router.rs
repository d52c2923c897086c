use std::any::Any;
use std::time::Instant;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::{from_fn, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;

use crate::handlers;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let development = state.config.development;

    Router::new()
        .route("/", get(handlers::welcome))
        .route("/home", get(handlers::home))
        .route("/anime/{id}", get(handlers::anime_detail))
        .route("/search/{query}", get(handlers::search))
        .route("/api/stream/{anime_id}", get(handlers::stream))
        .route("/api/episodes/{anime_id}", get(handlers::episodes))
        .fallback(handlers::not_found)
        .layer(from_fn(request_logging))
        .layer(CatchPanicLayer::custom(
            move |err: Box<dyn Any + Send + 'static>| internal_error_response(development, err),
        ))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Last-resort 500 body; the internal message leaks only in development.
fn internal_error_response(development: bool, err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| err.downcast_ref::<&str>().map(|s| s.to_string()));
    tracing::error!(detail = detail.as_deref().unwrap_or("unknown"), "handler panicked");

    let mut body = json!({ "error": "Internal Server Error" });
    if development {
        if let Some(detail) = detail {
            body["message"] = json!(detail);
        }
    }
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

async fn request_logging(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();

    let start = Instant::now();
    let response = next.run(req).await;
    tracing::info!(
        method = %method,
        uri = %uri,
        status = response.status().as_u16(),
        latency_ms = start.elapsed().as_millis() as u64,
        "request"
    );
    response
}
