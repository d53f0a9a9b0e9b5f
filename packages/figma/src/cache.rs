//! # Metadata Cache
//!
//! File metadata changes only when someone edits the Figma file, so
//! reads are cached for a short TTL and concurrent viewers of the same
//! file share one in-flight fetch instead of issuing duplicates. Errors
//! are never cached; the next caller retries.

use crate::client::FigmaClient;
use crate::error::FigmaError;
use crate::rest::FileResponse;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

#[derive(Default)]
struct Slot {
    value: Option<(Instant, Arc<FileResponse>)>,
}

/// TTL cache over full-file metadata, keyed by file key.
pub struct MetadataCache {
    ttl: Duration,
    slots: Mutex<HashMap<String, Arc<Mutex<Slot>>>>,
}

impl MetadataCache {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Fetch the file, serving from cache while the entry is fresh.
    ///
    /// Callers racing on the same key serialize on the per-key slot, so
    /// at most one fetch per key is in flight; the losers read the
    /// winner's result.
    pub async fn file(
        &self,
        client: &FigmaClient,
        file_key: &str,
    ) -> Result<Arc<FileResponse>, FigmaError> {
        let slot = {
            let mut slots = self.slots.lock().await;
            slots.entry(file_key.to_string()).or_default().clone()
        };

        let mut guard = slot.lock().await;
        if let Some((fetched_at, value)) = &guard.value {
            if fetched_at.elapsed() < self.ttl {
                debug!(file_key, "serving figma metadata from cache");
                return Ok(value.clone());
            }
        }

        let fresh = Arc::new(client.file(file_key).await?);
        guard.value = Some((Instant::now(), fresh.clone()));
        Ok(fresh)
    }

    /// Drop a cached entry, forcing the next read to refetch. Used by
    /// explicit re-import.
    pub async fn invalidate(&self, file_key: &str) {
        let mut slots = self.slots.lock().await;
        slots.remove(file_key);
    }

    /// Seed an entry directly. Test and warm-start hook.
    pub async fn put(&self, file_key: &str, file: FileResponse) {
        let slot = {
            let mut slots = self.slots.lock().await;
            slots.entry(file_key.to_string()).or_default().clone()
        };
        let mut guard = slot.lock().await;
        guard.value = Some((Instant::now(), Arc::new(file)));
    }

    /// Cached value for a key, if still fresh.
    pub async fn peek(&self, file_key: &str) -> Option<Arc<FileResponse>> {
        let slot = {
            let slots = self.slots.lock().await;
            slots.get(file_key)?.clone()
        };
        let guard = slot.lock().await;
        match &guard.value {
            Some((fetched_at, value)) if fetched_at.elapsed() < self.ttl => Some(value.clone()),
            _ => None,
        }
    }
}

impl Default for MetadataCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn file(name: &str) -> FileResponse {
        FileResponse {
            name: name.to_string(),
            components: HashMap::new(),
            styles: HashMap::new(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fresh_entry_is_served() {
        let cache = MetadataCache::with_ttl(Duration::from_secs(60));
        cache.put("abc", file("Design System")).await;

        let cached = cache.peek("abc").await.unwrap();
        assert_eq!(cached.name, "Design System");
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_ttl() {
        let cache = MetadataCache::with_ttl(Duration::from_secs(60));
        cache.put("abc", file("Design System")).await;

        tokio::time::advance(Duration::from_secs(61)).await;
        assert!(cache.peek("abc").await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalidate_drops_entry() {
        let cache = MetadataCache::with_ttl(Duration::from_secs(60));
        cache.put("abc", file("Design System")).await;

        cache.invalidate("abc").await;
        assert!(cache.peek("abc").await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_keys_are_independent() {
        let cache = MetadataCache::with_ttl(Duration::from_secs(60));
        cache.put("abc", file("A")).await;
        cache.put("def", file("B")).await;

        cache.invalidate("abc").await;
        assert!(cache.peek("abc").await.is_none());
        assert_eq!(cache.peek("def").await.unwrap().name, "B");
    }
}
