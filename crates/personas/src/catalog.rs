//! Persisted persona embeddings.
//!
//! Stored as `catalog_path` (a single JSON file). Entries keep the order in
//! which they were first added; matching relies on that order for ties.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use tw_domain::error::{Error, Result};

use crate::error::MatchError;
use crate::persona::Persona;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Record
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One persona with its precomputed embedding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaRecord {
    pub key: Persona,
    pub display_name: String,
    pub description: String,
    pub embedding: Vec<f32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    personas: Vec<PersonaRecord>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Catalog
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub struct PersonaCatalog {
    path: PathBuf,
    records: RwLock<Vec<PersonaRecord>>,
}

impl PersonaCatalog {
    /// Load the catalog at `path`, or start empty if the file is absent.
    pub fn load(path: &Path) -> Result<Self> {
        let records = if path.exists() {
            let raw = std::fs::read_to_string(path)?;
            match serde_json::from_str::<CatalogFile>(&raw) {
                Ok(file) => file.personas,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "persona catalog unreadable, starting empty"
                    );
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        tracing::info!(
            personas = records.len(),
            path = %path.display(),
            "persona catalog loaded"
        );

        Ok(Self {
            path: path.to_path_buf(),
            records: RwLock::new(records),
        })
    }

    pub fn contains(&self, persona: Persona) -> bool {
        self.records.read().iter().any(|r| r.key == persona)
    }

    /// Append a record. Returns `Ok(false)` when the key is already present.
    pub fn insert(&self, record: PersonaRecord) -> std::result::Result<bool, MatchError> {
        if record.embedding.is_empty() {
            return Err(MatchError::EmptyEmbedding);
        }
        let mut records = self.records.write();
        if records.iter().any(|r| r.key == record.key) {
            return Ok(false);
        }
        if let Some(first) = records.first() {
            if first.embedding.len() != record.embedding.len() {
                return Err(MatchError::DimensionMismatch {
                    key: record.key.to_string(),
                    query: first.embedding.len(),
                    persona: record.embedding.len(),
                });
            }
        }
        records.push(record);
        Ok(true)
    }

    /// Snapshot of all records in catalog order.
    pub fn records(&self) -> Vec<PersonaRecord> {
        self.records.read().clone()
    }

    /// Run `f` against the records without cloning them.
    pub fn with_records<T>(&self, f: impl FnOnce(&[PersonaRecord]) -> T) -> T {
        f(&self.records.read())
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the catalog to disk.
    pub fn flush(&self) -> Result<()> {
        let file = CatalogFile {
            personas: self.records(),
        };
        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| Error::Other(format!("serializing persona catalog: {e}")))?;
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(key: Persona, embedding: Vec<f32>) -> PersonaRecord {
        PersonaRecord {
            key,
            display_name: key.display_name().into(),
            description: key.description().into(),
            embedding,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let cat = PersonaCatalog::load(&dir.path().join("personas.json")).unwrap();
        assert!(cat.is_empty());
    }

    #[test]
    fn insert_skips_existing_key() {
        let dir = tempfile::tempdir().unwrap();
        let cat = PersonaCatalog::load(&dir.path().join("p.json")).unwrap();
        assert!(cat.insert(record(Persona::Foodie, vec![1.0, 0.0])).unwrap());
        assert!(!cat.insert(record(Persona::Foodie, vec![0.0, 1.0])).unwrap());
        assert_eq!(cat.records()[0].embedding, vec![1.0, 0.0]);
    }

    #[test]
    fn insert_rejects_other_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let cat = PersonaCatalog::load(&dir.path().join("p.json")).unwrap();
        cat.insert(record(Persona::Foodie, vec![1.0, 0.0])).unwrap();
        let err = cat.insert(record(Persona::Luxury, vec![1.0])).unwrap_err();
        assert!(matches!(err, MatchError::DimensionMismatch { .. }));
        assert_eq!(cat.len(), 1);
    }

    #[test]
    fn flush_then_reload_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("personas.json");
        let cat = PersonaCatalog::load(&path).unwrap();
        cat.insert(record(Persona::Wellness, vec![0.0, 1.0])).unwrap();
        cat.insert(record(Persona::Business, vec![1.0, 0.0])).unwrap();
        cat.flush().unwrap();

        let again = PersonaCatalog::load(&path).unwrap();
        let keys: Vec<Persona> = again.records().iter().map(|r| r.key).collect();
        assert_eq!(keys, vec![Persona::Wellness, Persona::Business]);
    }

    #[test]
    fn failed_flush_leaves_previous_file_intact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("personas.json");
        let cat = PersonaCatalog::load(&path).unwrap();
        cat.insert(record(Persona::Foodie, vec![1.0, 0.0])).unwrap();
        cat.flush().unwrap();
        assert!(!dir.path().join("personas.json.tmp").exists());

        cat.insert(record(Persona::Luxury, vec![0.0, 1.0])).unwrap();
        std::fs::create_dir(dir.path().join("personas.json.tmp")).unwrap();
        assert!(cat.flush().is_err());

        let on_disk = PersonaCatalog::load(&path).unwrap();
        let keys: Vec<Persona> = on_disk.records().iter().map(|r| r.key).collect();
        assert_eq!(keys, vec![Persona::Foodie]);
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("personas.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(PersonaCatalog::load(&path).unwrap().is_empty());
    }
}
