//! Persona warm-up and matching against an in-memory embedder.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tw_domain::config::PersonasConfig;
use tw_domain::error::{Error, Result};
use tw_personas::{builtin_catalog, Embedder, Persona, PersonaStore};

/// Maps each persona description to a one-hot vector; other texts are
/// looked up in `queries`.
struct TableEmbedder {
    table: HashMap<String, Vec<f32>>,
    calls: AtomicUsize,
    fail_on: Option<String>,
}

impl TableEmbedder {
    fn new() -> Self {
        let dim = Persona::ALL.len();
        let table = Persona::ALL
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let mut v = vec![0.0; dim];
                v[i] = 1.0;
                (p.description().to_string(), v)
            })
            .collect();
        Self {
            table,
            calls: AtomicUsize::new(0),
            fail_on: None,
        }
    }

    fn with_query(mut self, text: &str, like: Persona) -> Self {
        let v = self.table[like.description()].clone();
        self.table.insert(text.to_string(), v);
        self
    }

    fn failing_on(mut self, text: &str) -> Self {
        self.fail_on = Some(text.to_string());
        self
    }
}

#[async_trait::async_trait]
impl Embedder for TableEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_on.as_deref() == Some(text) {
            return Err(Error::Http("connection reset".into()));
        }
        self.table
            .get(text)
            .cloned()
            .ok_or_else(|| Error::Provider {
                provider: "table".into(),
                message: format!("no vector for '{text}'"),
            })
    }
}

fn config_in(dir: &tempfile::TempDir) -> PersonasConfig {
    PersonasConfig {
        catalog_path: dir.path().join("personas.json"),
        ..PersonasConfig::default()
    }
}

#[tokio::test]
async fn exact_embedding_selects_that_persona_with_self_similarity() {
    let dir = tempfile::tempdir().unwrap();
    let embedder = Arc::new(TableEmbedder::new().with_query("rafting and climbing", Persona::Adventure));
    let store = PersonaStore::new(&config_in(&dir), embedder).unwrap();
    store.build_and_store(builtin_catalog()).await.unwrap();

    let m = store.match_persona("rafting and climbing").await;
    assert_eq!(m.persona, Persona::Adventure);
    assert!(!m.fallback);

    let self_sim = store.catalog().with_records(|records| {
        let adv = records.iter().find(|r| r.key == Persona::Adventure).unwrap();
        tw_personas::similarity::dot(&adv.embedding, &adv.embedding)
    });
    assert_eq!(m.score, Some(self_sim));
}

#[tokio::test]
async fn empty_catalog_returns_default() {
    let dir = tempfile::tempdir().unwrap();
    let embedder = Arc::new(TableEmbedder::new());
    let store = PersonaStore::new(&config_in(&dir), embedder.clone()).unwrap();

    let m = store.match_persona("anything at all").await;
    assert_eq!(m.persona, Persona::Cultural);
    assert!(m.fallback);
    assert_eq!(m.score, None);
    assert_eq!(embedder.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn embedding_failure_returns_configured_default() {
    let dir = tempfile::tempdir().unwrap();
    let config = PersonasConfig {
        default_persona: "foodie".into(),
        ..config_in(&dir)
    };
    let embedder = Arc::new(TableEmbedder::new().failing_on("late night ramen"));
    let store = PersonaStore::new(&config, embedder).unwrap();
    store.build_and_store(builtin_catalog()).await.unwrap();

    let m = store.match_persona("late night ramen").await;
    assert_eq!(m.persona, Persona::Foodie);
    assert!(m.fallback);
}

#[tokio::test]
async fn unknown_default_falls_back_to_cultural() {
    let dir = tempfile::tempdir().unwrap();
    let config = PersonasConfig {
        default_persona: "pirate".into(),
        ..config_in(&dir)
    };
    let store = PersonaStore::new(&config, Arc::new(TableEmbedder::new())).unwrap();
    assert_eq!(store.default_persona(), Persona::Cultural);
}

#[tokio::test]
async fn any_query_lands_in_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let embedder = Arc::new(
        TableEmbedder::new()
            .with_query("spa", Persona::Wellness)
            .with_query("clubs", Persona::Nightlife),
    );
    let store = PersonaStore::new(&config_in(&dir), embedder).unwrap();
    store.build_and_store(builtin_catalog()).await.unwrap();

    for q in ["spa", "clubs", "unmapped text", ""] {
        let m = store.match_persona(q).await;
        assert!(Persona::ALL.contains(&m.persona));
    }
    assert_eq!(store.match_persona("spa").await.persona, Persona::Wellness);
}

#[tokio::test]
async fn warm_up_is_idempotent_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let embedder = Arc::new(TableEmbedder::new());
    let store = PersonaStore::new(&config, embedder.clone()).unwrap();

    let first = store.build_and_store(builtin_catalog()).await.unwrap();
    assert_eq!(first.added, Persona::ALL.len());
    let calls_after_first = embedder.calls.load(Ordering::SeqCst);

    let second = store.build_and_store(builtin_catalog()).await.unwrap();
    assert_eq!(second.added, 0);
    assert_eq!(second.skipped, Persona::ALL.len());
    assert_eq!(embedder.calls.load(Ordering::SeqCst), calls_after_first);

    let reloaded = PersonaStore::new(&config, Arc::new(TableEmbedder::new())).unwrap();
    assert_eq!(reloaded.catalog().len(), Persona::ALL.len());
}

#[tokio::test]
async fn one_failed_persona_does_not_stop_warm_up() {
    let dir = tempfile::tempdir().unwrap();
    let embedder = Arc::new(TableEmbedder::new().failing_on(Persona::Luxury.description()));
    let store = PersonaStore::new(&config_in(&dir), embedder).unwrap();

    let report = store.build_and_store(builtin_catalog()).await.unwrap();
    assert_eq!(report.failed, 1);
    assert_eq!(report.added, Persona::ALL.len() - 1);
    assert!(!store.catalog().contains(Persona::Luxury));
}
