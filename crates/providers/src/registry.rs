//! Provider registry.
//!
//! Constructs and holds all configured LLM provider instances. At startup the
//! registry reads the [`LlmConfig`], resolves authentication (env vars, direct
//! keys), and instantiates the adapter for each configured provider. Call
//! sites ask for a [`ModelRole`] and get back the provider plus the model
//! name that role is pinned to.

use crate::google::GoogleProvider;
use crate::traits::LlmProvider;
use std::collections::HashMap;
use std::sync::Arc;
use tw_domain::config::{LlmConfig, ModelRole, ProviderKind};
use tw_domain::error::{Error, Result};

/// A provider together with the model a role should use on it.
#[derive(Clone)]
pub struct ModelHandle {
    pub provider: Arc<dyn LlmProvider>,
    pub model: String,
}

impl std::fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelHandle")
            .field("provider", &self.provider.provider_id())
            .field("model", &self.model)
            .finish()
    }
}

/// Split a "provider_id/model_name" spec. Model names may contain '/'.
pub fn split_model_spec(spec: &str) -> Option<(&str, &str)> {
    let (provider, model) = spec.split_once('/')?;
    if provider.is_empty() || model.is_empty() {
        return None;
    }
    Some((provider, model))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ProviderRegistry
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Holds all instantiated LLM providers and role assignments.
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn LlmProvider>>,
    roles: HashMap<ModelRole, String>,
}

impl ProviderRegistry {
    /// Build the registry from the application's [`LlmConfig`].
    ///
    /// Providers that fail to initialize are logged and skipped rather than
    /// aborting the entire startup; requests routed to them fail later
    /// with [`Error::Config`].
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        let mut providers: HashMap<String, Arc<dyn LlmProvider>> = HashMap::new();

        for pc in &config.providers {
            let result: Result<Arc<dyn LlmProvider>> = match pc.kind {
                ProviderKind::Google => GoogleProvider::from_config(pc, config.default_timeout_ms)
                    .map(|p| Arc::new(p) as Arc<dyn LlmProvider>),
            };

            match result {
                Ok(provider) => {
                    tracing::info!(
                        provider_id = %pc.id,
                        kind = ?pc.kind,
                        "registered LLM provider"
                    );
                    providers.insert(pc.id.clone(), provider);
                }
                Err(e) => {
                    tracing::warn!(
                        provider_id = %pc.id,
                        kind = ?pc.kind,
                        error = %e,
                        "failed to initialize LLM provider, skipping"
                    );
                }
            }
        }

        if providers.is_empty() {
            tracing::warn!(
                "no LLM providers initialized; generation endpoints will fail \
                 until auth is configured"
            );
        }

        let roles = ModelRole::ALL
            .iter()
            .map(|role| (*role, config.role_spec(*role)))
            .collect();

        Ok(Self { providers, roles })
    }

    /// Build a registry around a single provider that serves every role.
    /// Each role keeps its built-in model name.
    pub fn with_provider(provider: Arc<dyn LlmProvider>) -> Self {
        let id = provider.provider_id().to_string();
        let roles = ModelRole::ALL
            .iter()
            .map(|role| {
                let spec = role.default_spec();
                let model = split_model_spec(&spec)
                    .map(|(_, m)| m.to_string())
                    .unwrap_or_default();
                (*role, format!("{id}/{model}"))
            })
            .collect();
        let mut providers = HashMap::new();
        providers.insert(id, provider);
        Self { providers, roles }
    }

    /// Look up a provider by its config id.
    pub fn get(&self, provider_id: &str) -> Option<Arc<dyn LlmProvider>> {
        self.providers.get(provider_id).cloned()
    }

    /// Resolve the provider and model for a role.
    pub fn for_role(&self, role: ModelRole) -> Result<ModelHandle> {
        let spec = self
            .roles
            .get(&role)
            .cloned()
            .unwrap_or_else(|| role.default_spec());
        let (provider_id, model) = split_model_spec(&spec).ok_or_else(|| {
            Error::Config(format!("role '{role}' has malformed model spec '{spec}'"))
        })?;
        let provider = self.get(provider_id).ok_or_else(|| {
            Error::Config(format!(
                "role '{role}' points at provider '{provider_id}', which is not registered"
            ))
        })?;
        Ok(ModelHandle {
            provider,
            model: model.to_string(),
        })
    }

    /// Number of registered providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// List all registered provider IDs (sorted).
    pub fn list_providers(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.providers.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Role name and model spec pairs, in [`ModelRole::ALL`] order.
    pub fn list_roles(&self) -> Vec<(String, String)> {
        ModelRole::ALL
            .iter()
            .filter_map(|r| self.roles.get(r).map(|s| (r.to_string(), s.clone())))
            .collect()
    }
}
