use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use tokio::sync::RwLock;

struct CachedView {
    body: Value,
    stored_at: DateTime<Utc>,
}

#[derive(Default)]
struct Views {
    /// Bumped by every invalidation; a load that started under an older
    /// generation must not be stored.
    generation: u64,
    by_path: HashMap<String, HashMap<String, CachedView>>,
}

/// Rendered GET responses keyed by path, then query string.
///
/// Only collections written exclusively through this service are cached.
/// Mutations drop every view under the paths they affect, so a list, its
/// detail pages and dependent listings are refetched on the next read.
#[derive(Clone)]
pub struct ViewCache {
    ttl: Duration,
    views: Arc<RwLock<Views>>,
}

impl ViewCache {
    pub fn new(ttl_seconds: u64) -> Self {
        Self::with_ttl(Duration::seconds(i64::try_from(ttl_seconds).unwrap_or(i64::MAX)))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            views: Arc::new(RwLock::new(Views::default())),
        }
    }

    pub fn disabled() -> Self {
        Self::new(0)
    }

    pub fn is_enabled(&self) -> bool {
        self.ttl > Duration::zero()
    }

    fn is_expired(&self, view: &CachedView, now: DateTime<Utc>) -> bool {
        now - view.stored_at > self.ttl
    }

    /// Current invalidation generation, taken before loading a view
    pub async fn generation(&self) -> u64 {
        self.views.read().await.generation
    }

    pub async fn get(&self, path: &str, query: &str) -> Option<Value> {
        if !self.is_enabled() {
            return None;
        }
        let now = Utc::now();
        {
            let views = self.views.read().await;
            let view = views.by_path.get(path)?.get(query)?;
            if !self.is_expired(view, now) {
                return Some(view.body.clone());
            }
        }

        // 过期条目立即移除
        let mut views = self.views.write().await;
        if let Some(queries) = views.by_path.get_mut(path) {
            if queries.get(query).is_some_and(|view| self.is_expired(view, now)) {
                queries.remove(query);
            }
            if queries.is_empty() {
                views.by_path.remove(path);
            }
        }
        None
    }

    /// Stores `body` unless an invalidation happened since `generation` was
    /// read. Expired views are pruned on every store.
    pub async fn put(&self, path: &str, query: &str, body: Value, generation: u64) {
        if !self.is_enabled() {
            return;
        }
        let now = Utc::now();
        let mut views = self.views.write().await;
        if views.generation != generation {
            log::debug!("Discarding view of {path} loaded before an invalidation");
            return;
        }
        views.by_path.retain(|_, queries| {
            queries.retain(|_, view| !self.is_expired(view, now));
            !queries.is_empty()
        });
        views.by_path.entry(path.to_string()).or_default().insert(
            query.to_string(),
            CachedView {
                body,
                stored_at: now,
            },
        );
    }

    /// Drops `prefix` itself and everything below it
    pub async fn invalidate_prefix(&self, prefix: &str) {
        let mut views = self.views.write().await;
        views.generation += 1;
        views.by_path.retain(|path, _| !path.starts_with(prefix));
        log::debug!("View cache invalidated under {prefix}");
    }

    pub async fn len(&self) -> usize {
        self.views.read().await.by_path.values().map(HashMap::len).sum()
    }
}
