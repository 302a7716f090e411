//! AppState construction and background-task spawning.
//!
//! `serve` and the `personas` CLI commands share the provider and persona
//! wiring here so both boot the same way.

use std::sync::Arc;

use anyhow::Context;

use tw_domain::config::{Config, ConfigSeverity};
use tw_images::{GoogleImageSearch, ImageEnricher, ImageSearch};
use tw_personas::{builtin_catalog, Embedder, PersonaStore, ProviderEmbedder};
use tw_planner::{
    FlightAgent, HotelAgent, ItineraryPatcher, ItineraryPipeline, ModelGateway, SuggestionAgent,
};
use tw_providers::ProviderRegistry;
use tw_store::LatestItineraryStore;

use crate::state::AppState;

/// Build the provider registry from config.
pub fn build_registry(config: &Config) -> anyhow::Result<Arc<ProviderRegistry>> {
    let llm = Arc::new(
        ProviderRegistry::from_config(&config.llm).context("initializing LLM providers")?,
    );
    if llm.is_empty() {
        tracing::info!("no LLM providers initialized, configure API keys to enable generation");
    } else {
        tracing::info!(providers = llm.len(), "LLM provider registry ready");
    }
    Ok(llm)
}

/// Load the persona catalog with an embedder backed by `llm`.
pub fn build_persona_store(
    config: &Config,
    llm: Arc<ProviderRegistry>,
) -> anyhow::Result<Arc<PersonaStore>> {
    let embedder: Arc<dyn Embedder> =
        Arc::new(ProviderEmbedder::new(llm, config.personas.task_type.clone()));
    let store = PersonaStore::new(&config.personas, embedder).with_context(|| {
        format!(
            "loading persona catalog from {}",
            config.personas.catalog_path.display()
        )
    })?;
    tracing::info!(
        personas = store.catalog().len(),
        default = %store.default_persona(),
        "persona store ready"
    );
    Ok(Arc::new(store))
}

/// Validate config, initialize every subsystem and return a fully-wired
/// [`AppState`].
pub async fn build_app_state(config: Arc<Config>) -> anyhow::Result<AppState> {
    // ── Config validation ────────────────────────────────────────────
    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            ConfigSeverity::Warning => tracing::warn!("config: {issue}"),
            ConfigSeverity::Error => tracing::error!("config: {issue}"),
        }
    }
    if issues.iter().any(|i| i.severity == ConfigSeverity::Error) {
        anyhow::bail!(
            "config validation failed with {} error(s)",
            issues
                .iter()
                .filter(|i| i.severity == ConfigSeverity::Error)
                .count()
        );
    }

    // ── LLM providers + personas ─────────────────────────────────────
    let llm = build_registry(&config)?;
    let personas = build_persona_store(&config, llm.clone())?;

    // ── Image search (optional) ──────────────────────────────────────
    let image_search = GoogleImageSearch::from_config(&config.images)
        .context("initializing image search client")?
        .map(|s| Arc::new(s) as Arc<dyn ImageSearch>);

    // ── Latest itinerary store ───────────────────────────────────────
    let latest = Arc::new(
        LatestItineraryStore::new(&config.storage.state_path)
            .context("initializing latest itinerary store")?,
    );

    Ok(assemble(config, llm, personas, image_search, latest))
}

/// Wire the planning services around already-built components.
pub fn assemble(
    config: Arc<Config>,
    llm: Arc<ProviderRegistry>,
    personas: Arc<PersonaStore>,
    image_search: Option<Arc<dyn ImageSearch>>,
    latest: Arc<LatestItineraryStore>,
) -> AppState {
    let gateway = ModelGateway::new(llm.clone());

    let images = Arc::new(ImageEnricher::new(image_search, &config.images));
    tracing::info!(
        enabled = images.is_enabled(),
        max_concurrency = config.images.max_concurrency,
        "image enricher ready"
    );

    AppState {
        pipeline: Arc::new(ItineraryPipeline::new(personas.clone(), gateway.clone())),
        patcher: Arc::new(ItineraryPatcher::new(gateway.clone())),
        flights: Arc::new(FlightAgent::new(gateway.clone(), config.planner.clone())),
        hotels: Arc::new(HotelAgent::new(gateway.clone(), config.planner.clone())),
        suggestions: Arc::new(SuggestionAgent::new(gateway)),
        images,
        latest,
        personas,
        llm,
        config,
    }
}

/// Spawn background work that should not block startup.
///
/// An empty persona catalog is filled in the background; until that
/// finishes, matching answers with the default persona.
pub fn spawn_background_tasks(state: &AppState) {
    if state.personas.catalog().is_empty() && !state.llm.is_empty() {
        let personas = state.personas.clone();
        tokio::spawn(async move {
            tracing::info!("persona catalog empty, building embeddings");
            match personas.build_and_store(builtin_catalog()).await {
                Ok(report) => tracing::info!(
                    added = report.added,
                    failed = report.failed,
                    "persona catalog warm-up finished"
                ),
                Err(e) => tracing::warn!(error = %e, "persona catalog warm-up failed"),
            }
        });
    }
}
