use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Image enrichment
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagesConfig {
    #[serde(default = "d_true")]
    pub enabled: bool,
    /// Env var holding the Custom Search API key. If unset, enrichment
    /// is skipped and itineraries are returned without images.
    #[serde(default = "d_api_key_env")]
    pub api_key_env: String,
    /// Env var holding the Custom Search engine id (`cx`).
    #[serde(default = "d_engine_id_env")]
    pub engine_id_env: String,
    #[serde(default = "d_search_base_url")]
    pub search_base_url: String,
    /// Activities looked up in parallel.
    #[serde(default = "d_5")]
    pub max_concurrency: usize,
    /// Per-URL timeout for the reachability check.
    #[serde(default = "d_8")]
    pub verify_timeout_secs: u64,
    /// Candidate URLs requested per search.
    #[serde(default = "d_5")]
    pub candidates_per_query: usize,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key_env: d_api_key_env(),
            engine_id_env: d_engine_id_env(),
            search_base_url: d_search_base_url(),
            max_concurrency: 5,
            verify_timeout_secs: 8,
            candidates_per_query: 5,
        }
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_true() -> bool {
    true
}
fn d_api_key_env() -> String {
    "GOOGLE_CSE_API_KEY".into()
}
fn d_engine_id_env() -> String {
    "GOOGLE_CSE_ENGINE_ID".into()
}
fn d_search_base_url() -> String {
    "https://www.googleapis.com/customsearch/v1".into()
}
fn d_5() -> usize {
    5
}
fn d_8() -> u64 {
    8
}
