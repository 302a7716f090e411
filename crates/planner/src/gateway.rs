use std::sync::Arc;

use tw_domain::config::ModelRole;
use tw_domain::conversation::Conversation;
use tw_domain::error::Result;
use tw_providers::{GenerateRequest, ProviderRegistry};

/// Generation calls over a threaded transcript.
///
/// Each call sends the whole transcript and returns the reply together
/// with a new transcript that has the reply appended. The input transcript
/// is never modified.
#[derive(Clone)]
pub struct ModelGateway {
    registry: Arc<ProviderRegistry>,
}

impl ModelGateway {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<ProviderRegistry> {
        &self.registry
    }

    /// The model name a role currently resolves to, for logging.
    pub fn model_for(&self, role: ModelRole) -> String {
        self.registry
            .for_role(role)
            .map(|h| h.model)
            .unwrap_or_else(|_| role.default_spec())
    }

    pub async fn generate(
        &self,
        role: ModelRole,
        conversation: &Conversation,
        grounding: bool,
        thinking_budget: Option<i32>,
    ) -> Result<(String, Conversation)> {
        let handle = self.registry.for_role(role)?;

        tracing::debug!(
            role = %role,
            model = %handle.model,
            turns = conversation.len(),
            chars = conversation.char_count(),
            grounding,
            "generate"
        );

        let resp = handle
            .provider
            .generate(GenerateRequest {
                conversation: conversation.clone(),
                model: Some(handle.model.clone()),
                grounding,
                thinking_budget,
                temperature: None,
            })
            .await?;

        let next = conversation.append_model(resp.text.as_str());
        Ok((resp.text, next))
    }

    /// One-shot call: a fresh transcript holding a single user turn.
    pub async fn ask(
        &self,
        role: ModelRole,
        prompt: impl Into<String>,
        grounding: bool,
        thinking_budget: Option<i32>,
    ) -> Result<String> {
        let conversation = Conversation::from_user(prompt);
        let (text, _) = self
            .generate(role, &conversation, grounding, thinking_budget)
            .await?;
        Ok(text)
    }
}
