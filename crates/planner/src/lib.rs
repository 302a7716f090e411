//! Itinerary planning over a generation model: the multi-stage pipeline,
//! single-turn patches, flight and hotel search agents, and suggestions.

pub mod agents;
pub mod extract;
pub mod gateway;
pub mod patcher;
pub mod pipeline;
pub mod prompts;
pub mod suggestions;
pub mod validate;

pub use agents::{FlightAgent, HotelAgent};
pub use extract::{extract_and_parse, extract_json, extract_jsonl, Extraction};
pub use gateway::ModelGateway;
pub use patcher::{ItineraryPatcher, PatchOutput, ShapeDrift};
pub use pipeline::{ItineraryPipeline, ItineraryRequest, PipelineError, PipelineOutput, Stage};
pub use suggestions::SuggestionAgent;
