/// Why a persona match could not produce an answer.
///
/// These never leave [`crate::PersonaStore::match_persona`]; they are
/// logged and replaced by the default persona.
#[derive(thiserror::Error, Debug)]
pub enum MatchError {
    #[error("persona catalog is empty")]
    EmptyCatalog,

    #[error("query text is empty")]
    EmptyQuery,

    #[error("embedding failed: {0}")]
    Embedding(#[from] tw_domain::Error),

    #[error("embedding service returned an empty vector")]
    EmptyEmbedding,

    #[error("dimension mismatch for '{key}': query has {query}, persona has {persona}")]
    DimensionMismatch {
        key: String,
        query: usize,
        persona: usize,
    },
}
