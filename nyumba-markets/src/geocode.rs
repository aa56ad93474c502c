//! Geocoding seam with a bounded TTL cache in front.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use nyumba_cache::TtlCache;
use nyumba_types::{CountryCode, GeoPoint};
use tokio::sync::Mutex;
use tracing::debug;

use crate::MarketsResult;

/// Resolves a free-form address to a coordinate.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolves `query` within `country`, or `None` when the provider
    /// has no match for it.
    async fn geocode(&self, country: &CountryCode, query: &str)
    -> MarketsResult<Option<GeoPoint>>;
}

/// A [`Geocoder`] that caches resolved coordinates.
///
/// Provider lookups are metered and slow, and browse screens re-ask
/// for the same neighborhoods constantly. Hits are served locally
/// until the entry expires. Negative answers are not cached, so a
/// place the provider learns about later is not pinned to `None` for
/// a whole TTL.
pub struct CachingGeocoder {
    inner: Arc<dyn Geocoder>,
    cache: Mutex<TtlCache<String, GeoPoint>>,
}

impl CachingGeocoder {
    /// Wraps `inner` with a cache of at most `capacity` entries, each
    /// living for `ttl` after insertion.
    #[must_use]
    pub fn new(inner: Arc<dyn Geocoder>, capacity: usize, ttl: Duration) -> Self {
        Self::with_cache(inner, TtlCache::new(capacity, ttl))
    }

    /// Wraps `inner` with a caller-built cache.
    #[must_use]
    pub fn with_cache(inner: Arc<dyn Geocoder>, cache: TtlCache<String, GeoPoint>) -> Self {
        Self {
            inner,
            cache: Mutex::new(cache),
        }
    }

    /// Number of live cached entries.
    pub async fn cached_len(&self) -> usize {
        self.cache.lock().await.len()
    }
}

#[async_trait]
impl Geocoder for CachingGeocoder {
    async fn geocode(
        &self,
        country: &CountryCode,
        query: &str,
    ) -> MarketsResult<Option<GeoPoint>> {
        let key = cache_key(country, query);
        {
            let mut cache = self.cache.lock().await;
            if let Some(point) = cache.get(&key) {
                debug!(%country, query, "geocode cache hit");
                return Ok(Some(*point));
            }
        }

        let resolved = self.inner.geocode(country, query).await?;
        if let Some(point) = resolved {
            self.cache.lock().await.put(key, point);
        }
        Ok(resolved)
    }
}

/// Cache key: country plus the query lowercased with whitespace runs
/// collapsed, so retyped queries land on the same entry.
fn cache_key(country: &CountryCode, query: &str) -> String {
    let normalized = query
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    format!("{country}:{normalized}")
}
