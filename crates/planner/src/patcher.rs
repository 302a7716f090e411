//! Single-turn edits of an existing itinerary.
//!
//! The model is asked to change only what the instruction touches. That is
//! not enforced; when both versions parse, the day and activity counts are
//! compared and any difference is logged as drift.

use std::time::Instant;

use serde::Serialize;
use serde_json::Value;

use tw_domain::itinerary::{ItineraryDocument, ItineraryShape};
use tw_domain::trace::TraceEvent;

use crate::extract::{extract_and_parse, Extraction};
use crate::gateway::ModelGateway;
use crate::pipeline::{PipelineError, Stage};
use crate::prompts;

/// Day and activity counts before and after a patch, when they differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShapeDrift {
    pub days_before: usize,
    pub days_after: usize,
    pub activities_before: usize,
    pub activities_after: usize,
}

#[derive(Debug, Clone)]
pub struct PatchOutput {
    pub itinerary: Extraction,
    pub drift: Option<ShapeDrift>,
}

pub struct ItineraryPatcher {
    gateway: ModelGateway,
}

impl ItineraryPatcher {
    pub fn new(gateway: ModelGateway) -> Self {
        Self { gateway }
    }

    pub async fn patch(
        &self,
        itinerary_json: &str,
        instruction: &str,
    ) -> Result<PatchOutput, PipelineError> {
        if instruction.trim().is_empty() {
            return Err(PipelineError::InvalidRequest("instruction is empty".into()));
        }

        let started = Instant::now();
        tracing::info!(instruction = %instruction, "itinerary patch started");

        let text = self
            .gateway
            .ask(
                Stage::Patch.role(),
                prompts::patch(itinerary_json, instruction),
                false,
                None,
            )
            .await
            .map_err(|source| {
                tracing::error!(error = %source, "itinerary patch failed");
                PipelineError::Stage {
                    stage: Stage::Patch,
                    source,
                }
            })?;

        let itinerary = extract_and_parse(&text, "patch");
        let drift = itinerary
            .value
            .as_ref()
            .and_then(|after| shape_drift(itinerary_json, after));

        if let Some(ref d) = drift {
            tracing::warn!(
                days_before = d.days_before,
                days_after = d.days_after,
                activities_before = d.activities_before,
                activities_after = d.activities_after,
                "patch changed the itinerary shape"
            );
            TraceEvent::PatchDrift {
                days_before: d.days_before,
                days_after: d.days_after,
                activities_before: d.activities_before,
                activities_after: d.activities_after,
            }
            .emit();
        }

        tracing::info!(
            duration_ms = started.elapsed().as_millis() as u64,
            parsed = itinerary.is_parsed(),
            "itinerary patch completed"
        );

        Ok(PatchOutput { itinerary, drift })
    }
}

fn shape_of(value: &Value) -> Option<ItineraryShape> {
    ItineraryDocument::from_value(value).ok().map(|d| d.shape())
}

fn shape_drift(before_json: &str, after: &Value) -> Option<ShapeDrift> {
    let before: Value = serde_json::from_str(before_json).ok()?;
    let before = shape_of(&before)?;
    let after = shape_of(after)?;
    if before == after {
        return None;
    }
    Some(ShapeDrift {
        days_before: before.days,
        days_after: after.days,
        activities_before: before.total_activities(),
        activities_after: after.total_activities(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn same_shape_is_not_drift() {
        let before = json!({"days": [{"day": 1, "activities": [{"name": "A"}]}]});
        let after = json!({"days": [{"day": 1, "activities": [{"name": "B"}]}]});
        assert_eq!(shape_drift(&before.to_string(), &after), None);
    }

    #[test]
    fn dropped_activity_is_drift() {
        let before = json!({"days": [{"day": 1, "activities": [{"name": "A"}, {"name": "B"}]}]});
        let after = json!({"days": [{"day": 1, "activities": [{"name": "A"}]}]});
        let d = shape_drift(&before.to_string(), &after).unwrap();
        assert_eq!((d.activities_before, d.activities_after), (2, 1));
    }

    #[test]
    fn unparseable_input_skips_check() {
        let after = json!({"days": []});
        assert_eq!(shape_drift("not json", &after), None);
    }
}
