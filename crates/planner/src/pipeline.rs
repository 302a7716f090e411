//! Itinerary generation.
//!
//! PersonaSelect, Discover, Draft and Optimize run strictly in sequence on
//! one transcript. Persona selection cannot fail; any model-call failure
//! ends the run with a [`PipelineError`]. A final answer that is not JSON
//! is returned as text.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use serde_json::Value;

use tw_domain::config::ModelRole;
use tw_domain::conversation::Conversation;
use tw_domain::trace::TraceEvent;
use tw_domain::travel::TripForm;
use tw_personas::{PersonaMatch, PersonaStore};

use crate::extract::{extract_and_parse, extract_json, Extraction};
use crate::gateway::ModelGateway;
use crate::prompts;
use crate::validate::{activity_names, check_itinerary};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Types
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Discover,
    Draft,
    Optimize,
    Patch,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Discover => "discover",
            Stage::Draft => "draft",
            Stage::Optimize => "optimize",
            Stage::Patch => "patch",
        }
    }

    pub fn role(&self) -> ModelRole {
        match self {
            Stage::Discover => ModelRole::Discover,
            Stage::Draft => ModelRole::Draft,
            Stage::Optimize => ModelRole::Optimize,
            Stage::Patch => ModelRole::Patch,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("{stage} stage failed: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: tw_domain::Error,
    },
}

/// What the pipeline needs from a trip request.
#[derive(Debug, Clone)]
pub struct ItineraryRequest {
    pub destination: String,
    pub days: u32,
    pub preferences: String,
}

impl From<&TripForm> for ItineraryRequest {
    fn from(form: &TripForm) -> Self {
        Self {
            destination: form.destination.clone(),
            days: form.days,
            preferences: form.preference_text(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StageTiming {
    pub stage: Stage,
    pub model: String,
    pub duration_ms: u64,
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub persona: PersonaMatch,
    pub itinerary: Extraction,
    pub timings: Vec<StageTiming>,
    pub total: Duration,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Pipeline
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub struct ItineraryPipeline {
    personas: Arc<PersonaStore>,
    gateway: ModelGateway,
}

impl ItineraryPipeline {
    pub fn new(personas: Arc<PersonaStore>, gateway: ModelGateway) -> Self {
        Self { personas, gateway }
    }

    pub async fn run(&self, req: &ItineraryRequest) -> Result<PipelineOutput, PipelineError> {
        if req.destination.trim().is_empty() {
            return Err(PipelineError::InvalidRequest("destination is empty".into()));
        }
        if req.days == 0 {
            return Err(PipelineError::InvalidRequest("days must be at least 1".into()));
        }

        let started = Instant::now();
        let mut timings = Vec::with_capacity(3);

        tracing::info!(
            destination = %req.destination,
            days = req.days,
            preferences = %req.preferences,
            "itinerary generation started"
        );

        let persona = self.personas.match_persona(&req.preferences).await;
        tracing::info!(
            persona = %persona.persona,
            score = ?persona.score,
            fallback = persona.fallback,
            "persona selected"
        );

        let conversation = Conversation::from_user(prompts::discover(&req.destination));
        let (attractions, conversation) = self
            .stage(Stage::Discover, &conversation, true, &mut timings)
            .await?;
        tracing::debug!(chars = attractions.len(), "attractions received");

        let conversation = conversation
            .append_user(persona.persona.style_prompt(req.days, &req.preferences));
        let (draft, conversation) = self
            .stage(Stage::Draft, &conversation, false, &mut timings)
            .await?;

        let conversation = conversation.append_user(prompts::OPTIMIZE);
        let (optimized, _) = self
            .stage(Stage::Optimize, &conversation, false, &mut timings)
            .await?;

        let itinerary = extract_and_parse(&optimized, "optimize");
        if let Some(ref value) = itinerary.value {
            for finding in check_itinerary(value, Some(req.days)) {
                tracing::warn!(%finding, "generated itinerary failed a structural check");
            }
            warn_on_changed_activities(&draft, value);
        }

        let total = started.elapsed();
        log_timing_summary(&timings, total);

        TraceEvent::PipelineCompleted {
            destination: req.destination.clone(),
            persona: persona.persona.key().to_string(),
            total_ms: total.as_millis() as u64,
            api_ms: timings.iter().map(|t| t.duration_ms).sum(),
            parsed: itinerary.is_parsed(),
        }
        .emit();

        Ok(PipelineOutput {
            persona,
            itinerary,
            timings,
            total,
        })
    }

    async fn stage(
        &self,
        stage: Stage,
        conversation: &Conversation,
        grounding: bool,
        timings: &mut Vec<StageTiming>,
    ) -> Result<(String, Conversation), PipelineError> {
        let model = self.gateway.model_for(stage.role());
        let started = Instant::now();
        let result = self
            .gateway
            .generate(stage.role(), conversation, grounding, None)
            .await;
        let duration_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok((text, next)) => {
                tracing::info!(
                    stage = %stage,
                    duration_ms,
                    chars = text.len(),
                    "pipeline stage completed"
                );
                TraceEvent::PipelineStage {
                    stage: stage.to_string(),
                    model: model.clone(),
                    duration_ms,
                }
                .emit();
                timings.push(StageTiming {
                    stage,
                    model,
                    duration_ms,
                });
                Ok((text, next))
            }
            Err(source) => {
                tracing::error!(stage = %stage, duration_ms, error = %source, "pipeline stage failed");
                timings.push(StageTiming {
                    stage,
                    model,
                    duration_ms,
                });
                log_timing_summary(timings, Duration::ZERO);
                Err(PipelineError::Stage { stage, source })
            }
        }
    }
}

/// The optimize stage may only reorder and edit; warn when the set of
/// activity names differs from the draft.
fn warn_on_changed_activities(draft: &str, optimized: &Value) {
    let Ok(draft_value) = serde_json::from_str::<Value>(extract_json(draft)) else {
        return;
    };
    if let (Some(before), Some(after)) = (activity_names(&draft_value), activity_names(optimized)) {
        if before != after {
            tracing::warn!(
                draft_activities = before.len(),
                optimized_activities = after.len(),
                "optimize stage changed the activity set"
            );
        }
    }
}

fn log_timing_summary(timings: &[StageTiming], total: Duration) {
    let api_ms: u64 = timings.iter().map(|t| t.duration_ms).sum();
    for t in timings {
        let pct = if api_ms > 0 {
            t.duration_ms as f64 / api_ms as f64 * 100.0
        } else {
            0.0
        };
        tracing::info!(
            stage = %t.stage,
            model = %t.model,
            duration_ms = t.duration_ms,
            share_pct = %format!("{pct:.1}"),
            "stage timing"
        );
    }
    if !total.is_zero() {
        tracing::info!(api_ms, total_ms = total.as_millis() as u64, "itinerary timing");
    }
}
