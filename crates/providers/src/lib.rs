pub mod auth;
pub mod google;
pub mod registry;
pub mod traits;
pub(crate) mod util;

// Re-exports for convenience.
pub use registry::{ModelHandle, ProviderRegistry};
pub use traits::{
    EmbeddingsRequest, EmbeddingsResponse, GenerateRequest, GenerateResponse, LlmProvider, Usage,
};
