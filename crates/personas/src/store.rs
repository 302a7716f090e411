//! Persona selection by embedding similarity.
//!
//! [`PersonaStore::match_persona`] is the only entry point callers use on
//! the request path and it cannot fail: every [`MatchError`] is logged and
//! turned into the configured default persona here, at one seam.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use tw_domain::config::PersonasConfig;
use tw_domain::error::Result;
use tw_domain::trace::TraceEvent;

use crate::catalog::{PersonaCatalog, PersonaRecord};
use crate::embedder::Embedder;
use crate::error::MatchError;
use crate::persona::Persona;
use crate::similarity::best_match;

/// Outcome of a persona lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PersonaMatch {
    pub persona: Persona,
    /// Similarity of the winner. `None` when the default was substituted.
    pub score: Option<f32>,
    pub fallback: bool,
}

/// Counts from one catalog warm-up run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub added: usize,
    pub skipped: usize,
    pub failed: usize,
}

pub struct PersonaStore {
    catalog: PersonaCatalog,
    embedder: Arc<dyn Embedder>,
    default: Persona,
}

impl PersonaStore {
    /// Load the catalog named in `config` and wire in the embedder.
    pub fn new(config: &PersonasConfig, embedder: Arc<dyn Embedder>) -> Result<Self> {
        let default = Persona::from_key(&config.default_persona).unwrap_or_else(|| {
            tracing::warn!(
                configured = %config.default_persona,
                "unknown default persona, using cultural"
            );
            Persona::Cultural
        });
        let catalog = PersonaCatalog::load(&config.catalog_path)?;
        Ok(Self::with_catalog(catalog, embedder, default))
    }

    pub fn with_catalog(
        catalog: PersonaCatalog,
        embedder: Arc<dyn Embedder>,
        default: Persona,
    ) -> Self {
        Self {
            catalog,
            embedder,
            default,
        }
    }

    pub fn default_persona(&self) -> Persona {
        self.default
    }

    pub fn catalog(&self) -> &PersonaCatalog {
        &self.catalog
    }

    /// Pick the persona closest to `query`. Never fails.
    pub async fn match_persona(&self, query: &str) -> PersonaMatch {
        let result = match self.try_match(query).await {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    default = %self.default,
                    "persona match failed, using default"
                );
                PersonaMatch {
                    persona: self.default,
                    score: None,
                    fallback: true,
                }
            }
        };

        TraceEvent::PersonaMatched {
            persona: result.persona.key().to_string(),
            score: result.score,
            fallback: result.fallback,
        }
        .emit();

        result
    }

    /// The typed form of [`match_persona`](Self::match_persona).
    pub async fn try_match(&self, query: &str) -> std::result::Result<PersonaMatch, MatchError> {
        if self.catalog.is_empty() {
            return Err(MatchError::EmptyCatalog);
        }
        if query.trim().is_empty() {
            return Err(MatchError::EmptyQuery);
        }

        let embedding = self.embedder.embed(query).await?;

        self.catalog.with_records(|records| {
            let (idx, score) = best_match(
                &embedding,
                records
                    .iter()
                    .map(|r| (r.key.key(), r.embedding.as_slice())),
            )?;
            Ok(PersonaMatch {
                persona: records[idx].key,
                score: Some(score),
                fallback: false,
            })
        })
    }

    /// Embed and persist every listed persona not already in the catalog.
    ///
    /// A persona whose embedding fails is logged and left out; the run
    /// carries on with the rest. The catalog is flushed once at the end.
    pub async fn build_and_store<I>(&self, entries: I) -> Result<BuildReport>
    where
        I: IntoIterator<Item = (Persona, String)>,
    {
        let mut report = BuildReport::default();

        for (persona, description) in entries {
            if self.catalog.contains(persona) {
                tracing::debug!(persona = %persona, "persona already embedded, skipping");
                report.skipped += 1;
                continue;
            }

            let embedding = match self.embedder.embed(&description).await {
                Ok(v) => v,
                Err(e) => {
                    tracing::error!(persona = %persona, error = %e, "persona embedding failed");
                    report.failed += 1;
                    continue;
                }
            };

            let record = PersonaRecord {
                key: persona,
                display_name: persona.display_name().to_string(),
                description,
                embedding,
                created_at: Utc::now(),
            };
            match self.catalog.insert(record) {
                Ok(true) => {
                    tracing::info!(persona = %persona, "persona embedded");
                    report.added += 1;
                }
                Ok(false) => report.skipped += 1,
                Err(e) => {
                    tracing::error!(persona = %persona, error = %e, "persona rejected");
                    report.failed += 1;
                }
            }
        }

        if report.added > 0 {
            self.catalog.flush()?;
        }

        tracing::info!(
            added = report.added,
            skipped = report.skipped,
            failed = report.failed,
            total = self.catalog.len(),
            "persona catalog built"
        );

        Ok(report)
    }
}
