//! Single-slot store for the most recent itinerary.
//!
//! Persists one record in `latest.json` under the configured state path.
//! Every save replaces the previous record; concurrent saves resolve as
//! last-writer-wins.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use tw_domain::error::{Error, Result};
use tw_domain::trace::TraceEvent;
use tw_domain::travel::TripForm;

/// Which operation produced the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveSource {
    Generate,
    Update,
}

impl SaveSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaveSource::Generate => "generate",
            SaveSource::Update => "update",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestRecord {
    /// The itinerary as returned to the client: parsed JSON, or the raw
    /// model text as a string when it did not parse.
    pub itinerary: Value,
    /// The trip form that produced it, when known.
    #[serde(default)]
    pub request: Option<TripForm>,
    #[serde(default)]
    pub persona: Option<String>,
    pub source: SaveSource,
    pub saved_at: DateTime<Utc>,
}

impl LatestRecord {
    pub fn new(itinerary: Value, source: SaveSource) -> Self {
        Self {
            itinerary,
            request: None,
            persona: None,
            source,
            saved_at: Utc::now(),
        }
    }

    pub fn with_request(mut self, request: TripForm) -> Self {
        self.request = Some(request);
        self
    }

    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = Some(persona.into());
        self
    }

    /// The itinerary as JSON text, for feeding back into a patch.
    pub fn itinerary_text(&self) -> String {
        match &self.itinerary {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

pub struct LatestItineraryStore {
    path: PathBuf,
    slot: RwLock<Option<LatestRecord>>,
}

impl LatestItineraryStore {
    /// Load or create the store at `state_path/latest.json`. An unreadable
    /// record is discarded with a warning.
    pub fn new(state_path: &Path) -> Result<Self> {
        std::fs::create_dir_all(state_path).map_err(Error::Io)?;
        let path = state_path.join("latest.json");

        let slot = if path.exists() {
            let raw = std::fs::read_to_string(&path).map_err(Error::Io)?;
            match serde_json::from_str::<LatestRecord>(&raw) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "discarding unreadable latest itinerary");
                    None
                }
            }
        } else {
            None
        };

        tracing::info!(
            present = slot.is_some(),
            path = %path.display(),
            "latest itinerary store loaded"
        );

        Ok(Self {
            path,
            slot: RwLock::new(slot),
        })
    }

    pub fn get(&self) -> Option<LatestRecord> {
        self.slot.read().clone()
    }

    /// Replace the stored record and persist it.
    pub fn save(&self, record: LatestRecord) -> Result<()> {
        let destination = record
            .request
            .as_ref()
            .map(|r| r.destination.clone())
            .unwrap_or_default();
        let source = record.source;

        // The slot only changes once the record is on disk.
        let mut slot = self.slot.write();
        self.write_file(Some(&record))?;
        *slot = Some(record);
        drop(slot);

        TraceEvent::LatestSaved {
            destination,
            source: source.as_str().to_string(),
        }
        .emit();
        Ok(())
    }

    /// Persist the current record to disk.
    pub fn flush(&self) -> Result<()> {
        let slot = self.slot.read();
        self.write_file(slot.as_ref())
    }

    fn write_file(&self, record: Option<&LatestRecord>) -> Result<()> {
        let Some(record) = record else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(record)
            .map_err(|e| Error::Other(format!("serializing latest itinerary: {e}")))?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(Error::Io)?;
        std::fs::rename(&tmp, &self.path).map_err(Error::Io)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form(destination: &str) -> TripForm {
        TripForm {
            destination: destination.into(),
            days: 2,
            ..TripForm::default()
        }
    }

    #[test]
    fn empty_until_saved() {
        let dir = tempfile::tempdir().unwrap();
        let store = LatestItineraryStore::new(dir.path()).unwrap();
        assert!(store.get().is_none());
        store.flush().unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn save_replaces_and_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let store = LatestItineraryStore::new(dir.path()).unwrap();

        store
            .save(LatestRecord::new(json!({"days": []}), SaveSource::Generate).with_request(form("Goa")))
            .unwrap();
        store
            .save(
                LatestRecord::new(json!({"days": [{"day": 1}]}), SaveSource::Update)
                    .with_request(form("Kyoto"))
                    .with_persona("cultural"),
            )
            .unwrap();

        let reloaded = LatestItineraryStore::new(dir.path()).unwrap();
        let record = reloaded.get().unwrap();
        assert_eq!(record.source, SaveSource::Update);
        assert_eq!(record.request.unwrap().destination, "Kyoto");
        assert_eq!(record.persona.as_deref(), Some("cultural"));
        assert_eq!(record.itinerary["days"][0]["day"], 1);
    }

    #[test]
    fn failed_write_keeps_previous_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = LatestItineraryStore::new(dir.path()).unwrap();
        store
            .save(LatestRecord::new(json!({"days": []}), SaveSource::Generate).with_request(form("Goa")))
            .unwrap();

        // A directory in the way of the temp file makes the write fail.
        std::fs::create_dir(dir.path().join("latest.json.tmp")).unwrap();
        let err = store.save(
            LatestRecord::new(json!({"days": [{"day": 1}]}), SaveSource::Update)
                .with_request(form("Kyoto")),
        );

        assert!(err.is_err());
        let current = store.get().unwrap();
        assert_eq!(current.source, SaveSource::Generate);
        assert_eq!(current.request.unwrap().destination, "Goa");
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("latest.json"), "{not json").unwrap();
        let store = LatestItineraryStore::new(dir.path()).unwrap();
        assert!(store.get().is_none());
    }

    #[test]
    fn unparsed_itinerary_text_round_trips_as_raw_text() {
        let record = LatestRecord::new(Value::String("Day 1: rest".into()), SaveSource::Generate);
        assert_eq!(record.itinerary_text(), "Day 1: rest");
        let parsed = LatestRecord::new(json!({"days": []}), SaveSource::Generate);
        assert_eq!(parsed.itinerary_text(), r#"{"days":[]}"#);
    }
}
