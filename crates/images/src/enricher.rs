//! Per-activity image enrichment.
//!
//! Lookups run with bounded parallelism. Each one owns a single activity
//! slot and can only fail into a fallback image, so one bad lookup never
//! affects the others.

use std::sync::Arc;
use std::time::Instant;

use futures_util::stream::{self, StreamExt};
use serde::Serialize;
use serde_json::Value;

use tw_domain::config::ImagesConfig;
use tw_domain::itinerary::ItineraryDocument;
use tw_domain::trace::TraceEvent;

use crate::search::ImageSearch;
use crate::taxonomy;

/// Where an activity's image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Search,
    Fallback,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnrichReport {
    pub total: usize,
    /// Images found by search and verified.
    pub searched: usize,
    /// Taxonomy or placeholder images.
    pub fallback: usize,
    /// Activities that already had an image.
    pub skipped: usize,
}

struct Job {
    pos: (usize, usize),
    name: String,
    category: String,
}

pub struct ImageEnricher {
    search: Option<Arc<dyn ImageSearch>>,
    max_concurrency: usize,
    candidates: usize,
}

impl ImageEnricher {
    /// `search = None` means no credentials: enrichment is a no-op.
    pub fn new(search: Option<Arc<dyn ImageSearch>>, config: &ImagesConfig) -> Self {
        Self {
            search: if config.enabled { search } else { None },
            max_concurrency: config.max_concurrency.max(1),
            candidates: config.candidates_per_query.max(1),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.search.is_some()
    }

    /// Enrich a JSON itinerary. Anything that does not read as an
    /// itinerary is returned unchanged.
    pub async fn enrich_value(&self, value: Value, destination: &str) -> Value {
        if !self.is_enabled() {
            return value;
        }
        let mut doc = match ItineraryDocument::from_value(&value) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(error = %e, "itinerary shape not recognised, skipping images");
                return value;
            }
        };
        self.enrich(&mut doc, destination).await;
        match doc.to_value() {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize enriched itinerary");
                value
            }
        }
    }

    /// Fill in `image` on every activity that lacks one.
    pub async fn enrich(&self, doc: &mut ItineraryDocument, destination: &str) -> EnrichReport {
        let Some(search) = self.search.clone() else {
            return EnrichReport::default();
        };
        let started = Instant::now();

        let mut report = EnrichReport::default();
        let mut jobs = Vec::new();
        for (pos, activity) in doc.activities_mut() {
            report.total += 1;
            if activity.image.as_deref().is_some_and(|u| !u.trim().is_empty()) {
                report.skipped += 1;
                continue;
            }
            jobs.push(Job {
                pos,
                name: activity.name.clone(),
                category: activity.category.clone(),
            });
        }

        if jobs.is_empty() {
            tracing::debug!(total = report.total, "all activities already have images");
            return report;
        }

        let destination = destination.trim().to_string();
        let candidates = self.candidates;
        let mut results = stream::iter(jobs)
            .map(|job| {
                let search = Arc::clone(&search);
                let destination = destination.clone();
                async move {
                    let (url, source) =
                        lookup(search.as_ref(), &job.name, &job.category, &destination, candidates)
                            .await;
                    (job.pos, url, source)
                }
            })
            .buffer_unordered(self.max_concurrency);

        while let Some((pos, url, source)) = results.next().await {
            if let Some(activity) = doc.activity_at_mut(pos) {
                activity.image = Some(url);
            }
            match source {
                Source::Search => report.searched += 1,
                Source::Fallback => report.fallback += 1,
            }
        }

        let duration_ms = started.elapsed().as_millis() as u64;
        tracing::info!(
            total = report.total,
            searched = report.searched,
            fallback = report.fallback,
            skipped = report.skipped,
            duration_ms,
            "itinerary images enriched"
        );
        TraceEvent::ImagesEnriched {
            total: report.total,
            searched: report.searched,
            fallback: report.fallback,
            skipped: report.skipped,
            duration_ms,
        }
        .emit();

        report
    }
}

/// Search with the destination, then without it. The first candidate
/// that verifies wins. A search error stops searching for this activity.
async fn lookup(
    search: &dyn ImageSearch,
    name: &str,
    category: &str,
    destination: &str,
    limit: usize,
) -> (String, Source) {
    let mut queries = Vec::with_capacity(2);
    if !destination.is_empty() {
        queries.push(format!("{name} {destination}"));
    }
    queries.push(name.to_string());

    for query in queries {
        match search.search(&query, limit).await {
            Ok(urls) => {
                for url in urls {
                    if search.verify(&url).await {
                        return (url, Source::Search);
                    }
                }
                tracing::debug!(query = %query, "no usable image");
            }
            Err(e) => {
                tracing::warn!(activity = %name, error = %e, "image search failed");
                break;
            }
        }
    }

    (taxonomy::fallback_image(name, category).to_string(), Source::Fallback)
}
