//! Itinerary generation, edits, and the latest-itinerary slot.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use tw_domain::travel::TripForm;
use tw_planner::{Extraction, ItineraryRequest, PipelineError};
use tw_store::{LatestRecord, SaveSource};

use super::{error, success};
use crate::state::AppState;

fn pipeline_error(e: PipelineError) -> Response {
    match e {
        PipelineError::InvalidRequest(msg) => error(StatusCode::BAD_REQUEST, msg),
        other => error(StatusCode::INTERNAL_SERVER_ERROR, other),
    }
}

fn save_latest(state: &AppState, record: LatestRecord) {
    if let Err(e) = state.latest.save(record) {
        tracing::warn!(error = %e, "failed to save latest itinerary");
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// POST /api/itinerary/generate
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Run the pipeline, add images when the result parsed, and remember it
/// as the latest itinerary.
pub async fn generate(State(state): State<AppState>, Json(form): Json<TripForm>) -> Response {
    let req = ItineraryRequest::from(&form);

    let out = match state.pipeline.run(&req).await {
        Ok(out) => out,
        Err(e) => return pipeline_error(e),
    };

    let data = match out.itinerary {
        Extraction {
            value: Some(value), ..
        } => state.images.enrich_value(value, &form.destination).await,
        Extraction { text, value: None } => Value::String(text),
    };

    save_latest(
        &state,
        LatestRecord::new(data.clone(), SaveSource::Generate)
            .with_request(form)
            .with_persona(out.persona.persona.key()),
    );

    success(data)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// POST /api/itinerary/update
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Deserialize)]
pub struct UpdateBody {
    /// Itinerary to edit, as JSON or as text. Defaults to the latest.
    #[serde(default)]
    pub itinerary: Option<Value>,
    pub query: String,
}

pub async fn update(State(state): State<AppState>, Json(body): Json<UpdateBody>) -> Response {
    let previous = state.latest.get();

    let itinerary_text = match (&body.itinerary, &previous) {
        (Some(Value::String(s)), _) => s.clone(),
        (Some(v), _) if !v.is_null() => v.to_string(),
        (_, Some(record)) => record.itinerary_text(),
        _ => {
            return error(
                StatusCode::NOT_FOUND,
                "no itinerary supplied and none generated yet",
            )
        }
    };

    let out = match state.patcher.patch(&itinerary_text, &body.query).await {
        Ok(out) => out,
        Err(e) => return pipeline_error(e),
    };

    let data = out.itinerary.into_value();

    let mut record = LatestRecord::new(data.clone(), SaveSource::Update);
    if let Some(prev) = previous {
        record.request = prev.request;
        record.persona = prev.persona;
    }
    save_latest(&state, record);

    success(data)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// GET /api/itinerary/latest
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub async fn latest(State(state): State<AppState>) -> Response {
    match state.latest.get() {
        Some(record) => success(record),
        None => error(StatusCode::NOT_FOUND, "no itinerary generated yet"),
    }
}
