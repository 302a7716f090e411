use std::sync::Arc;

use tw_domain::config::Config;
use tw_images::ImageEnricher;
use tw_personas::PersonaStore;
use tw_planner::{FlightAgent, HotelAgent, ItineraryPatcher, ItineraryPipeline, SuggestionAgent};
use tw_providers::ProviderRegistry;
use tw_store::LatestItineraryStore;

/// Shared application state passed to all API handlers.
///
/// Fields are grouped by concern:
/// - **Core services**: config, LLM providers, personas
/// - **Planning**: itinerary pipeline, patcher, search agents
/// - **Enrichment & storage**: images, latest itinerary
#[derive(Clone)]
pub struct AppState {
    // ── Core services ─────────────────────────────────────────────────
    pub config: Arc<Config>,
    pub llm: Arc<ProviderRegistry>,
    pub personas: Arc<PersonaStore>,

    // ── Planning ──────────────────────────────────────────────────────
    pub pipeline: Arc<ItineraryPipeline>,
    pub patcher: Arc<ItineraryPatcher>,
    pub flights: Arc<FlightAgent>,
    pub hotels: Arc<HotelAgent>,
    pub suggestions: Arc<SuggestionAgent>,

    // ── Enrichment & storage ──────────────────────────────────────────
    pub images: Arc<ImageEnricher>,
    pub latest: Arc<LatestItineraryStore>,
}
