use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// LLM provider system
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Provider id that the built-in role defaults point at.
pub const DEFAULT_PROVIDER_ID: &str = "gemini";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "d_120000u")]
    pub default_timeout_ms: u64,
    /// Model roles (key = role name, value = "provider_id/model_name").
    /// Roles missing here fall back to [`ModelRole::default_spec`].
    #[serde(default)]
    pub roles: HashMap<String, String>,
    /// Registered LLM providers (data-driven: adding a provider = adding config).
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            default_timeout_ms: 120_000,
            roles: HashMap::new(),
            providers: Vec::new(),
        }
    }
}

impl LlmConfig {
    /// The "provider/model" spec for a role, configured or built-in.
    pub fn role_spec(&self, role: ModelRole) -> String {
        self.roles
            .get(role.as_str())
            .cloned()
            .unwrap_or_else(|| role.default_spec())
    }
}

/// Which model a call site uses. Each pipeline stage and agent is a role
/// so deployments can move one stage to a cheaper or stronger model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelRole {
    Discover,
    Draft,
    Optimize,
    Patch,
    Agents,
    Suggestions,
    Embedder,
}

impl ModelRole {
    pub const ALL: [ModelRole; 7] = [
        ModelRole::Discover,
        ModelRole::Draft,
        ModelRole::Optimize,
        ModelRole::Patch,
        ModelRole::Agents,
        ModelRole::Suggestions,
        ModelRole::Embedder,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelRole::Discover => "discover",
            ModelRole::Draft => "draft",
            ModelRole::Optimize => "optimize",
            ModelRole::Patch => "patch",
            ModelRole::Agents => "agents",
            ModelRole::Suggestions => "suggestions",
            ModelRole::Embedder => "embedder",
        }
    }

    fn default_model(&self) -> &'static str {
        match self {
            ModelRole::Discover | ModelRole::Draft | ModelRole::Optimize => "gemini-2.0-flash",
            ModelRole::Patch | ModelRole::Agents => "gemini-2.5-pro",
            ModelRole::Suggestions => "gemini-2.5-flash",
            ModelRole::Embedder => "gemini-embedding-exp-03-07",
        }
    }

    pub fn default_spec(&self) -> String {
        format!("{DEFAULT_PROVIDER_ID}/{}", self.default_model())
    }
}

impl fmt::Display for ModelRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub id: String,
    pub kind: ProviderKind,
    #[serde(default = "d_google_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub default_model: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Google,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    /// Env var containing the key.
    #[serde(default)]
    pub env: Option<String>,
    /// Direct key (for config-only setups; prefer env).
    #[serde(default)]
    pub key: Option<String>,
    /// Multiple env var names for round-robin key rotation.
    /// When non-empty, takes precedence over `env`/`key`.
    #[serde(default)]
    pub keys: Vec<String>,
}

// ── serde default helpers ───────────────────────────────────────────

fn d_120000u() -> u64 {
    120_000
}
fn d_google_base_url() -> String {
    "https://generativelanguage.googleapis.com".into()
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_spec_falls_back_to_builtin() {
        let cfg = LlmConfig::default();
        assert_eq!(cfg.role_spec(ModelRole::Draft), "gemini/gemini-2.0-flash");
        assert_eq!(cfg.role_spec(ModelRole::Patch), "gemini/gemini-2.5-pro");
        assert_eq!(
            cfg.role_spec(ModelRole::Embedder),
            "gemini/gemini-embedding-exp-03-07"
        );
    }

    #[test]
    fn role_spec_prefers_configured() {
        let mut cfg = LlmConfig::default();
        cfg.roles
            .insert("optimize".into(), "backup/gemini-2.5-flash".into());
        assert_eq!(cfg.role_spec(ModelRole::Optimize), "backup/gemini-2.5-flash");
    }

    #[test]
    fn provider_parses_with_default_base_url() {
        let toml_str = r#"
            id = "gemini"
            kind = "google"
            auth = { env = "GEMINI_API_KEY" }
        "#;
        let pc: ProviderConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(pc.kind, ProviderKind::Google);
        assert_eq!(pc.base_url, "https://generativelanguage.googleapis.com");
        assert_eq!(pc.auth.env.as_deref(), Some("GEMINI_API_KEY"));
    }
}
