use axum::extract::State;
use axum::response::{IntoResponse, Json};

use crate::state::AppState;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// GET /health
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "providers": state.llm.list_providers(),
        "personas": state.personas.catalog().len(),
        "images": state.images.is_enabled(),
    }))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// GET /  (endpoint index)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let models: serde_json::Map<String, serde_json::Value> = state
        .llm
        .list_roles()
        .into_iter()
        .map(|(role, spec)| (role, serde_json::Value::String(spec)))
        .collect();

    Json(serde_json::json!({
        "message": "TripWeave API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "generate_itinerary": "POST /api/itinerary/generate",
            "update_itinerary": "POST /api/itinerary/update",
            "latest_itinerary": "GET /api/itinerary/latest",
            "generate_flights": "POST /api/flights/generate",
            "generate_hotels": "POST /api/hotels/generate",
            "suggestions": "POST /api/suggestions",
            "health": "GET /health",
        },
        "models": models,
    }))
}
