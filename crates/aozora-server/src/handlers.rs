pub mod anime;
pub mod home;
pub mod search;
pub mod stream;

pub use anime::anime_detail;
pub use home::home;
pub use search::search;
pub use stream::{episodes, stream};

use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

pub async fn welcome() -> Json<Value> {
    Json(json!({ "message": "Welcome to the aozora API" }))
}

pub async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not Found" })))
}
