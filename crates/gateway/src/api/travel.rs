//! Flight and hotel search. Both always answer with a record; when the
//! search fails the agents substitute a placeholder.

use axum::extract::State;
use axum::response::Response;
use axum::Json;

use tw_domain::travel::TripForm;

use super::success;
use crate::state::AppState;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// POST /api/flights/generate
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub async fn flights(State(state): State<AppState>, Json(form): Json<TripForm>) -> Response {
    success(state.flights.search(&form).await)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// POST /api/hotels/generate
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub async fn hotels(State(state): State<AppState>, Json(form): Json<TripForm>) -> Response {
    success(state.hotels.search(&form).await)
}
