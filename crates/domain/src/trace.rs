use serde::Serialize;

/// Structured trace events emitted across all TripWeave crates.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event")]
pub enum TraceEvent {
    LlmRequest {
        provider: String,
        model: String,
        grounding: bool,
        thinking_budget: Option<i32>,
        turns: usize,
        duration_ms: u64,
        prompt_tokens: Option<u32>,
        completion_tokens: Option<u32>,
    },
    PersonaMatched {
        persona: String,
        score: Option<f32>,
        fallback: bool,
    },
    PipelineStage {
        stage: String,
        model: String,
        duration_ms: u64,
    },
    PipelineCompleted {
        destination: String,
        persona: String,
        total_ms: u64,
        api_ms: u64,
        parsed: bool,
    },
    ExtractionFailed {
        context: String,
        reason: String,
        text_chars: usize,
    },
    PatchDrift {
        days_before: usize,
        days_after: usize,
        activities_before: usize,
        activities_after: usize,
    },
    AgentFallback {
        agent: String,
        attempts: u32,
        last_error: String,
    },
    ImagesEnriched {
        total: usize,
        searched: usize,
        fallback: usize,
        skipped: usize,
        duration_ms: u64,
    },
    LatestSaved {
        destination: String,
        source: String,
    },
}

impl TraceEvent {
    pub fn emit(&self) {
        let json = serde_json::to_string(self).unwrap_or_default();
        tracing::info!(trace_event = %json, "tw_event");
    }
}
