use crate::model_registry::ModelInfo;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

pub const MODELS_CACHE_TTL: Duration = Duration::from_secs(10 * 60);

#[derive(Debug, Clone)]
struct CacheEntry {
    models: Vec<ModelInfo>,
    expires_at: Instant,
}

/// Model lists keyed by the credential's access token.
///
/// Lists are copied on the way in and on the way out, so no caller ever holds
/// memory owned by the cache. Expired entries are treated as missing and are
/// replaced by the next successful store.
#[derive(Debug, Clone)]
pub struct ModelCache {
    inner: Arc<Mutex<HashMap<String, CacheEntry>>>,
    ttl: Duration,
}

impl Default for ModelCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelCache {
    pub fn new() -> Self {
        Self::with_ttl(MODELS_CACHE_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn lookup(&self, access_token: &str) -> Option<Vec<ModelInfo>> {
        self.lookup_at(access_token, Instant::now())
    }

    pub fn store(&self, access_token: &str, models: &[ModelInfo]) {
        self.store_at(access_token, models, Instant::now());
    }

    pub fn lookup_at(&self, access_token: &str, now: Instant) -> Option<Vec<ModelInfo>> {
        let guard = self.lock();
        let entry = guard.get(access_token)?;
        if now > entry.expires_at {
            return None;
        }
        Some(entry.models.clone())
    }

    /// Empty tokens and empty lists are never stored, so a transient empty
    /// upstream answer cannot shadow a good entry.
    pub fn store_at(&self, access_token: &str, models: &[ModelInfo], now: Instant) {
        if access_token.is_empty() || models.is_empty() {
            return;
        }
        let entry = CacheEntry {
            models: models.to_vec(),
            expires_at: now + self.ttl,
        };
        self.lock().insert(access_token.to_string(), entry);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // Entries are replaced whole, so a poisoned map is still consistent.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
