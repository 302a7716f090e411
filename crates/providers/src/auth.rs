//! API key rotation with round-robin selection and failure cooldown.
//!
//! Gemini quotas are per key, so a deployment may list several keys.
//! [`KeyRing`] hands them out in round-robin order; a key that hits a
//! quota or server error is parked with [`KeyRing::mark_failed`] and
//! skipped until its cooldown lapses. When every key is parked, the one
//! parked longest ago is used anyway.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tw_domain::config::AuthConfig;
use tw_domain::error::{Error, Result};

/// Default cooldown period after a key failure (seconds).
const DEFAULT_COOLDOWN_SECS: u64 = 60;

struct KeySlot {
    key: String,
    /// When the key last failed. `None` means it is healthy.
    failed_at: Option<Instant>,
}

/// Thread-safe round-robin key ring with failure cooldown.
pub struct KeyRing {
    slots: Mutex<Vec<KeySlot>>,
    index: AtomicUsize,
    cooldown: Duration,
}

/// A key handed out by [`KeyRing::next_key`]. Keep the `index` to report
/// a failure back with [`KeyRing::mark_failed`].
#[derive(Debug, Clone)]
pub struct KeyEntry {
    pub index: usize,
    pub key: String,
}

impl KeyRing {
    fn new(keys: Vec<String>, cooldown: Duration) -> Result<Self> {
        if keys.is_empty() {
            return Err(Error::Auth("key ring requires at least one resolved API key".into()));
        }
        let slots = keys
            .into_iter()
            .map(|key| KeySlot { key, failed_at: None })
            .collect();
        Ok(Self {
            slots: Mutex::new(slots),
            index: AtomicUsize::new(0),
            cooldown,
        })
    }

    /// Build a ring from an [`AuthConfig`].
    ///
    /// If `auth.keys` is non-empty each entry names an env var that is
    /// resolved eagerly; otherwise the single `key`/`env` field is used.
    pub fn from_auth_config(auth: &AuthConfig) -> Result<Self> {
        let resolved = if !auth.keys.is_empty() {
            let mut resolved_keys = Vec::with_capacity(auth.keys.len());
            for env_name in &auth.keys {
                match std::env::var(env_name) {
                    Ok(val) if !val.is_empty() => resolved_keys.push(val),
                    _ => {
                        return Err(Error::Auth(format!(
                            "environment variable '{}' not set or empty (from auth.keys list)",
                            env_name
                        )));
                    }
                }
            }
            resolved_keys
        } else {
            vec![crate::util::resolve_api_key(auth)?]
        };

        Self::new(resolved, Duration::from_secs(DEFAULT_COOLDOWN_SECS))
    }

    /// Return the next healthy key using round-robin.
    pub fn next_key(&self) -> KeyEntry {
        let slots = self.slots.lock();
        let len = slots.len();
        let now = Instant::now();

        if len == 1 {
            return KeyEntry { index: 0, key: slots[0].key.clone() };
        }

        let start = self.index.fetch_add(1, Ordering::Relaxed) % len;

        for offset in 0..len {
            let idx = (start + offset) % len;
            let slot = &slots[idx];
            let cooling = slot
                .failed_at
                .is_some_and(|at| now.duration_since(at) < self.cooldown);
            if !cooling {
                return KeyEntry { index: idx, key: slot.key.clone() };
            }
        }

        // Everything is cooling down: the earliest failure recovers first.
        let mut best = 0;
        for (i, slot) in slots.iter().enumerate() {
            if slot.failed_at.unwrap_or(now) < slots[best].failed_at.unwrap_or(now) {
                best = i;
            }
        }
        KeyEntry { index: best, key: slots[best].key.clone() }
    }

    /// Start the cooldown timer for the key at `index`.
    pub fn mark_failed(&self, index: usize) {
        let mut slots = self.slots.lock();
        if let Some(slot) = slots.get_mut(index) {
            slot.failed_at = Some(Instant::now());
            tracing::warn!(
                key_index = index,
                cooldown_secs = self.cooldown.as_secs(),
                "API key marked as failed, entering cooldown"
            );
        }
    }

    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// Manual Debug impl to avoid leaking key values.
impl std::fmt::Debug for KeyRing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyRing")
            .field("key_count", &self.len())
            .field("cooldown", &self.cooldown)
            .finish()
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(keys: &[&str], cooldown: Duration) -> KeyRing {
        KeyRing::new(keys.iter().map(|k| k.to_string()).collect(), cooldown).unwrap()
    }

    #[test]
    fn single_key_always_returns_same() {
        let ring = ring(&["key-a"], Duration::from_secs(60));
        assert_eq!(ring.next_key().key, "key-a");
        assert_eq!(ring.next_key().key, "key-a");
    }

    #[test]
    fn round_robin_cycles_through_keys() {
        let ring = ring(&["a", "b", "c"], Duration::from_secs(60));
        let seen: Vec<String> = (0..6).map(|_| ring.next_key().key).collect();
        assert_eq!(seen, vec!["a", "b", "c", "a", "b", "c"]);
    }

    #[test]
    fn failed_key_is_skipped() {
        let ring = ring(&["a", "b", "c"], Duration::from_secs(60));
        assert_eq!(ring.next_key().key, "a");
        ring.mark_failed(1);
        // counter=1 lands on "b", which is cooling down.
        assert_eq!(ring.next_key().key, "c");
        assert_eq!(ring.next_key().key, "c");
        assert_eq!(ring.next_key().key, "a");
    }

    #[test]
    fn all_failed_returns_least_recently_failed() {
        let ring = ring(&["a", "b"], Duration::from_secs(60));
        ring.mark_failed(0);
        std::thread::sleep(Duration::from_millis(10));
        ring.mark_failed(1);
        assert_eq!(ring.next_key().key, "a");
    }

    #[test]
    fn expired_cooldown_key_is_available() {
        let ring = ring(&["a", "b"], Duration::from_millis(50));
        ring.mark_failed(0);
        std::thread::sleep(Duration::from_millis(100));
        assert_eq!(ring.next_key().key, "a");
    }

    #[test]
    fn empty_keys_returns_error() {
        assert!(KeyRing::new(vec![], Duration::from_secs(60)).is_err());
    }

    #[test]
    fn from_auth_config_keys_env_missing() {
        let auth = AuthConfig {
            keys: vec!["TW_NONEXISTENT_VAR_12345".into()],
            ..AuthConfig::default()
        };
        assert!(KeyRing::from_auth_config(&auth).is_err());
    }

    #[test]
    fn debug_does_not_leak_keys() {
        let ring = ring(&["secret-key"], Duration::from_secs(60));
        let debug_str = format!("{:?}", ring);
        assert!(!debug_str.contains("secret-key"));
        assert!(debug_str.contains("key_count: 1"));
    }
}
