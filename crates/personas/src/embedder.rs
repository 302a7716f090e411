use std::sync::Arc;

use tw_domain::config::ModelRole;
use tw_domain::error::{Error, Result};
use tw_providers::{EmbeddingsRequest, ProviderRegistry};

/// Turns text into a fixed-length vector.
#[async_trait::async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Embeds through whichever provider the `embedder` role points at.
pub struct ProviderEmbedder {
    registry: Arc<ProviderRegistry>,
    task_type: String,
}

impl ProviderEmbedder {
    pub fn new(registry: Arc<ProviderRegistry>, task_type: impl Into<String>) -> Self {
        Self {
            registry,
            task_type: task_type.into(),
        }
    }
}

#[async_trait::async_trait]
impl Embedder for ProviderEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let handle = self.registry.for_role(ModelRole::Embedder)?;
        let resp = handle
            .provider
            .embeddings(EmbeddingsRequest {
                input: vec![text.to_string()],
                model: Some(handle.model.clone()),
                task_type: Some(self.task_type.clone()),
            })
            .await?;
        resp.embeddings
            .into_iter()
            .next()
            .ok_or_else(|| Error::Provider {
                provider: handle.provider.provider_id().to_string(),
                message: "no embedding returned".into(),
            })
    }
}
