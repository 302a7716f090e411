//! Travel personas and embedding-based persona selection.

pub mod catalog;
pub mod embedder;
pub mod error;
pub mod persona;
pub mod similarity;
pub mod store;

pub use catalog::{PersonaCatalog, PersonaRecord};
pub use embedder::{Embedder, ProviderEmbedder};
pub use error::MatchError;
pub use persona::{builtin_catalog, Persona};
pub use store::{BuildReport, PersonaMatch, PersonaStore};
