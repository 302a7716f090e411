//! Shared types for TripWeave: errors, configuration, conversation
//! transcripts, itinerary and travel records, and structured trace events.

pub mod config;
pub mod conversation;
pub mod error;
pub mod itinerary;
pub mod trace;
pub mod travel;

pub use error::{Error, Result};
