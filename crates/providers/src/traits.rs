use tw_domain::conversation::Conversation;
use tw_domain::error::Result;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Request / Response types
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A provider-agnostic generation request over a multi-turn transcript.
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    /// Every turn so far, oldest first.
    pub conversation: Conversation,
    /// Model identifier override. When `None`, the provider uses its default.
    pub model: Option<String>,
    /// Ask the backend to ground its answer in live search results.
    pub grounding: bool,
    /// Effort hint: `None` = backend default, `0` = minimal,
    /// negative = backend decides, positive = explicit token budget.
    pub thinking_budget: Option<i32>,
    /// Sampling temperature. `None` lets the provider choose.
    pub temperature: Option<f32>,
}

/// Token accounting reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Clone)]
pub struct GenerateResponse {
    /// Concatenated text parts of the first candidate. Never empty.
    pub text: String,
    pub usage: Option<Usage>,
    /// The model that actually produced the response.
    pub model: String,
    pub finish_reason: Option<String>,
}

/// A request for text embeddings.
#[derive(Debug, Clone, Default)]
pub struct EmbeddingsRequest {
    pub input: Vec<String>,
    /// When `None`, the provider uses its default embedding model.
    pub model: Option<String>,
    /// Backend-specific task hint (e.g. `SEMANTIC_SIMILARITY`).
    pub task_type: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EmbeddingsResponse {
    /// One embedding vector per input text, in input order.
    pub embeddings: Vec<Vec<f32>>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Core provider trait
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Trait that every model backend must implement.
///
/// Implementations translate between the transcript types and a
/// backend's wire format. Tests substitute in-memory implementations.
#[async_trait::async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a reply to the transcript and wait for the full response.
    ///
    /// Fails with [`tw_domain::Error::Generation`] when the backend
    /// answers without any text.
    async fn generate(&self, req: GenerateRequest) -> Result<GenerateResponse>;

    /// Generate text embeddings.
    async fn embeddings(&self, req: EmbeddingsRequest) -> Result<EmbeddingsResponse>;

    /// A unique identifier for this provider instance.
    fn provider_id(&self) -> &str;
}
