use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use atlas_core::model::{Country, CountryCode};
use atlas_core::time::Clock;

use crate::repository::{CountrySource, SourceError};

struct Snapshot {
    fetched_at: DateTime<Utc>,
    countries: Vec<Country>,
}

/// Caching decorator for a [`CountrySource`].
///
/// Holds the `list_all` snapshot until the TTL elapses or the caller
/// invalidates it; per-code lookups pass straight through, since only the
/// full list is worth memoizing. An explicit, injectable object rather than
/// a process-wide global, so tests can substitute a fake source and a fixed
/// clock.
///
/// The snapshot sits behind an async mutex: concurrent callers coalesce on
/// a single upstream fetch instead of racing.
pub struct CachedSource {
    inner: Arc<dyn CountrySource>,
    clock: Clock,
    ttl: Duration,
    snapshot: Mutex<Option<Snapshot>>,
}

impl CachedSource {
    #[must_use]
    pub fn new(inner: Arc<dyn CountrySource>, ttl: Duration) -> Self {
        Self::with_clock(inner, ttl, Clock::default())
    }

    #[must_use]
    pub fn with_clock(inner: Arc<dyn CountrySource>, ttl: Duration, clock: Clock) -> Self {
        Self {
            inner,
            clock,
            ttl,
            snapshot: Mutex::new(None),
        }
    }

    /// Drop the held snapshot; the next `list_all` fetches fresh data.
    pub async fn invalidate(&self) {
        let mut guard = self.snapshot.lock().await;
        *guard = None;
        debug!("country snapshot invalidated");
    }

    /// Fetch fresh data now, replacing whatever snapshot is held.
    ///
    /// # Errors
    ///
    /// Returns the upstream `SourceError`; a failed refresh leaves the old
    /// snapshot in place.
    pub async fn refresh(&self) -> Result<Vec<Country>, SourceError> {
        let mut guard = self.snapshot.lock().await;
        let countries = self.inner.list_all().await?;
        info!(count = countries.len(), "country snapshot refreshed");
        *guard = Some(Snapshot {
            fetched_at: self.clock.now(),
            countries: countries.clone(),
        });
        Ok(countries)
    }
}

#[async_trait]
impl CountrySource for CachedSource {
    async fn list_all(&self) -> Result<Vec<Country>, SourceError> {
        let mut guard = self.snapshot.lock().await;

        if let Some(snapshot) = guard.as_ref() {
            if self.clock.now() - snapshot.fetched_at < self.ttl {
                debug!("serving country list from cache");
                return Ok(snapshot.countries.clone());
            }
        }

        let countries = self.inner.list_all().await?;
        info!(count = countries.len(), "country snapshot refreshed");
        *guard = Some(Snapshot {
            fetched_at: self.clock.now(),
            countries: countries.clone(),
        });
        Ok(countries)
    }

    async fn get_by_code(&self, code: &CountryCode) -> Result<Country, SourceError> {
        self.inner.get_by_code(code).await
    }

    async fn get_by_codes(&self, codes: &[CountryCode]) -> Result<Vec<Country>, SourceError> {
        self.inner.get_by_codes(codes).await
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_core::model::{CountryName, FlagImages};
    use atlas_core::time::fixed_now;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn country(code: &str, name: &str) -> Country {
        Country::new(
            CountryCode::new(code).unwrap(),
            CountryName::new(name, None).unwrap(),
            FlagImages::new(Some(format!("https://flags.example/{code}.svg")), None, None)
                .unwrap(),
        )
    }

    /// Fake source that counts upstream fetches.
    struct CountingSource {
        countries: Vec<Country>,
        list_calls: AtomicUsize,
        code_calls: AtomicUsize,
    }

    impl CountingSource {
        fn new(countries: Vec<Country>) -> Arc<Self> {
            Arc::new(Self {
                countries,
                list_calls: AtomicUsize::new(0),
                code_calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl CountrySource for CountingSource {
        async fn list_all(&self) -> Result<Vec<Country>, SourceError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.countries.clone())
        }

        async fn get_by_code(&self, code: &CountryCode) -> Result<Country, SourceError> {
            self.code_calls.fetch_add(1, Ordering::SeqCst);
            self.countries
                .iter()
                .find(|c| c.code() == code)
                .cloned()
                .ok_or_else(|| SourceError::NotFound { code: code.clone() })
        }

        async fn get_by_codes(&self, codes: &[CountryCode]) -> Result<Vec<Country>, SourceError> {
            Ok(self
                .countries
                .iter()
                .filter(|c| codes.contains(c.code()))
                .cloned()
                .collect())
        }
    }

    fn fixtures() -> Vec<Country> {
        vec![country("DE", "Germany"), country("FR", "France")]
    }

    #[tokio::test]
    async fn second_call_within_ttl_is_served_from_cache() {
        let upstream = CountingSource::new(fixtures());
        let cache = CachedSource::with_clock(
            upstream.clone(),
            Duration::minutes(10),
            Clock::fixed(fixed_now()),
        );

        let first = cache.list_all().await.unwrap();
        let second = cache.list_all().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(upstream.list_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn expired_snapshot_is_refetched() {
        let upstream = CountingSource::new(fixtures());
        // Zero TTL: every snapshot is already stale when read back.
        let cache = CachedSource::new(upstream.clone(), Duration::zero());

        cache.list_all().await.unwrap();
        cache.list_all().await.unwrap();

        assert_eq!(upstream.list_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_a_fresh_fetch() {
        let upstream = CountingSource::new(fixtures());
        let cache = CachedSource::with_clock(
            upstream.clone(),
            Duration::minutes(10),
            Clock::fixed(fixed_now()),
        );

        cache.list_all().await.unwrap();
        cache.invalidate().await;
        cache.list_all().await.unwrap();

        assert_eq!(upstream.list_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn refresh_replaces_the_snapshot() {
        let upstream = CountingSource::new(fixtures());
        let cache = CachedSource::with_clock(
            upstream.clone(),
            Duration::minutes(10),
            Clock::fixed(fixed_now()),
        );

        cache.list_all().await.unwrap();
        let refreshed = cache.refresh().await.unwrap();
        assert_eq!(refreshed.len(), 2);

        // refresh counts as an upstream call; the next read is cached again.
        cache.list_all().await.unwrap();
        assert_eq!(upstream.list_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn per_code_lookups_bypass_the_cache() {
        let upstream = CountingSource::new(fixtures());
        let cache = CachedSource::with_clock(
            upstream.clone(),
            Duration::minutes(10),
            Clock::fixed(fixed_now()),
        );

        let code = CountryCode::new("DE").unwrap();
        cache.get_by_code(&code).await.unwrap();
        cache.get_by_code(&code).await.unwrap();

        assert_eq!(upstream.code_calls.load(Ordering::SeqCst), 2);
    }
}
