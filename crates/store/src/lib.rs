pub mod latest;

pub use latest::{LatestItineraryStore, LatestRecord, SaveSource};
