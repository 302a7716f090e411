use tw_domain::config::ModelRole;

use crate::gateway::ModelGateway;
use crate::prompts;

/// Short activity ideas for a city, for the trip form.
pub struct SuggestionAgent {
    gateway: ModelGateway,
}

impl SuggestionAgent {
    pub fn new(gateway: ModelGateway) -> Self {
        Self { gateway }
    }

    /// Grounded list of 6-7 suggestions. Empty on any failure.
    pub async fn suggest(&self, city: &str) -> Vec<String> {
        if city.trim().is_empty() {
            return Vec::new();
        }
        match self
            .gateway
            .ask(ModelRole::Suggestions, prompts::suggestions(city), true, None)
            .await
        {
            Ok(text) => {
                let out = split_suggestions(&text);
                tracing::debug!(city, count = out.len(), "suggestions generated");
                out
            }
            Err(e) => {
                tracing::warn!(city, error = %e, "suggestion request failed");
                Vec::new()
            }
        }
    }
}

/// Split `a;b;c;` into trimmed, non-empty items.
pub fn split_suggestions(text: &str) -> Vec<String> {
    text.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
