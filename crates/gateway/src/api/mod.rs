pub mod health;
pub mod itinerary;
pub mod suggestions;
pub mod travel;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the full API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(health::index))
        .route("/health", get(health::health))
        // Itinerary
        .route("/api/itinerary/generate", post(itinerary::generate))
        .route("/api/itinerary/update", post(itinerary::update))
        .route("/api/itinerary/latest", get(itinerary::latest))
        // Search agents
        .route("/api/flights/generate", post(travel::flights))
        .route("/api/hotels/generate", post(travel::hotels))
        .route("/api/suggestions", post(suggestions::suggest))
}

/// `{"status": "success", "data": ...}`
pub(crate) fn success(data: impl serde::Serialize) -> Response {
    Json(serde_json::json!({
        "status": "success",
        "data": data,
    }))
    .into_response()
}

/// `{"status": "error", "error": ...}` with the given status code.
pub(crate) fn error(status: StatusCode, message: impl std::fmt::Display) -> Response {
    (
        status,
        Json(serde_json::json!({
            "status": "error",
            "error": message.to_string(),
        })),
    )
        .into_response()
}
