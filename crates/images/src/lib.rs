//! Best-effort images for itinerary activities.

pub mod enricher;
pub mod error;
pub mod search;
pub mod taxonomy;

pub use enricher::{EnrichReport, ImageEnricher};
pub use error::ImageError;
pub use search::{GoogleImageSearch, ImageSearch};
