use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;

use super::success;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SuggestionsBody {
    pub city: String,
}

/// `POST /api/suggestions`: activity ideas for a city. Never fails; a
/// failed lookup is an empty list.
pub async fn suggest(
    State(state): State<AppState>,
    Json(body): Json<SuggestionsBody>,
) -> Response {
    success(state.suggestions.suggest(&body.city).await)
}
