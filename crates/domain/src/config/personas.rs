use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Persona catalog
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonasConfig {
    /// JSON file holding the precomputed persona embeddings.
    #[serde(default = "d_catalog_path")]
    pub catalog_path: PathBuf,
    /// Persona key returned whenever matching cannot produce an answer.
    #[serde(default = "d_default_persona")]
    pub default_persona: String,
    /// Embedding task hint forwarded to the embedding endpoint.
    #[serde(default = "d_task_type")]
    pub task_type: String,
}

impl Default for PersonasConfig {
    fn default() -> Self {
        Self {
            catalog_path: d_catalog_path(),
            default_persona: d_default_persona(),
            task_type: d_task_type(),
        }
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_catalog_path() -> PathBuf {
    PathBuf::from("./data/personas.json")
}
fn d_default_persona() -> String {
    "cultural".into()
}
fn d_task_type() -> String {
    "SEMANTIC_SIMILARITY".into()
}
