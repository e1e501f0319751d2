// ── Tag-based response cache ──
//
// Responses are stored under logical tags (`"interventions"`,
// `"interventions:42"`, `"interventions:query:status=open"`), never raw
// URLs. Tags form a hierarchy on `:` boundaries: invalidating a tag drops
// the tag itself and every tag nested below it, and nothing else.
// `"interventions"` covers `"interventions:42"` but not
// `"interventions_archive"`.
//
// The map is ordered, so nested tags are found with one range scan. All
// operations take the lock briefly and never across an `.await`. Every
// insert sweeps out expired entries, so keys that are never read again
// do not pile up.

use std::any::Any;
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::ops::Bound;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;
use tracing::trace;

/// Default lifetime of a cached response.
pub const DEFAULT_TTL: Duration = Duration::from_secs(30);

const SEPARATOR: char = ':';

// ── Tags ───────────────────────────────────────────────────────────

/// Logical cache key: a resource family optionally followed by
/// `:`-separated segments.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CacheTag(String);

impl CacheTag {
    /// A resource family tag, e.g. `"interventions"`.
    pub fn family(name: &str) -> Self {
        Self(name.to_owned())
    }

    /// A tag nested under this one: `"{self}:{segment}"`.
    #[must_use]
    pub fn child(&self, segment: impl fmt::Display) -> Self {
        Self(format!("{}{SEPARATOR}{segment}", self.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` if `self` is `ancestor` or nested below it.
    pub fn is_within(&self, ancestor: &str) -> bool {
        self.0
            .strip_prefix(ancestor)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(SEPARATOR))
    }
}

impl fmt::Display for CacheTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CacheTag {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// ── Cache ──────────────────────────────────────────────────────────

struct Entry {
    value: Arc<dyn Any + Send + Sync>,
    expires_at: Instant,
}

#[derive(Default)]
struct Inner {
    entries: BTreeMap<CacheTag, Entry>,
    /// Bumped by every invalidation. A fetch that started under an older
    /// generation does not store its result.
    generation: u64,
}

impl Inner {
    /// Insert `value` under `tag`, sweeping out expired entries first.
    fn store(&mut self, tag: CacheTag, value: Arc<dyn Any + Send + Sync>, ttl: Duration) {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.expires_at > now);
        let swept = before - self.entries.len();
        if swept > 0 {
            trace!(swept, "expired cache entries dropped");
        }
        self.entries.insert(
            tag,
            Entry {
                value,
                expires_at: now + ttl,
            },
        );
    }
}

/// Shared response cache keyed by [`CacheTag`].
pub struct TagCache {
    inner: Mutex<Inner>,
    ttl: Duration,
}

impl TagCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cached value for `tag`, if present, fresh, and of type `T`.
    pub fn get<T: Clone + 'static>(&self, tag: &CacheTag) -> Option<T> {
        let mut inner = self.lock();
        let entry = inner.entries.get(tag)?;
        if entry.expires_at <= Instant::now() {
            inner.entries.remove(tag);
            trace!(%tag, "cache entry expired");
            return None;
        }
        entry.value.downcast_ref::<T>().cloned()
    }

    /// Store `value` under `tag`, replacing any previous entry.
    pub fn insert<T: Send + Sync + 'static>(&self, tag: CacheTag, value: T) {
        self.lock().store(tag, Arc::new(value), self.ttl);
    }

    fn generation(&self) -> u64 {
        self.lock().generation
    }

    fn insert_if_current<T: Send + Sync + 'static>(
        &self,
        tag: CacheTag,
        value: T,
        generation: u64,
    ) {
        let mut inner = self.lock();
        if inner.generation != generation {
            trace!(%tag, "discarding result fetched before an invalidation");
            return;
        }
        inner.store(tag, Arc::new(value), self.ttl);
    }

    /// Return the cached value for `tag`, or run `fetch` and cache its
    /// success. Errors are returned as-is and never cached.
    pub async fn get_or_fetch<T, E, F, Fut>(&self, tag: CacheTag, fetch: F) -> Result<T, E>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(hit) = self.get::<T>(&tag) {
            trace!(%tag, "cache hit");
            return Ok(hit);
        }

        let generation = self.generation();
        let value = fetch().await?;
        self.insert_if_current(tag, value.clone(), generation);
        Ok(value)
    }

    /// Drop `tag` and every tag nested under it. Returns the number of
    /// entries removed; unknown tags remove nothing.
    pub fn invalidate(&self, tag: impl AsRef<str>) -> usize {
        let tag = tag.as_ref();
        let mut inner = self.lock();
        inner.generation = inner.generation.wrapping_add(1);

        let doomed: Vec<CacheTag> = inner
            .entries
            .range::<str, _>((Bound::Included(tag), Bound::Unbounded))
            .map(|(key, _)| key)
            .take_while(|key| key.as_str().starts_with(tag))
            .filter(|key| key.is_within(tag))
            .cloned()
            .collect();

        for key in &doomed {
            inner.entries.remove(key);
        }
        trace!(tag, removed = doomed.len(), "cache invalidated");
        doomed.len()
    }

    pub fn invalidate_many<I, S>(&self, tags: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tags.into_iter().map(|tag| self.invalidate(tag)).sum()
    }

    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.generation = inner.generation.wrapping_add(1);
        inner.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TagCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl fmt::Debug for TagCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagCache")
            .field("entries", &self.len())
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn tag(s: &str) -> CacheTag {
        let mut parts = s.split(SEPARATOR);
        let mut tag = CacheTag::family(parts.next().unwrap());
        for part in parts {
            tag = tag.child(part);
        }
        tag
    }

    #[test]
    fn tags_nest_on_separator_only() {
        assert!(tag("interventions:42").is_within("interventions"));
        assert!(tag("interventions").is_within("interventions"));
        assert!(!tag("interventions_archive").is_within("interventions"));
        assert!(!tag("interventions").is_within("interventions:42"));
        assert_eq!(CacheTag::family("stock").child(7).as_str(), "stock:7");
    }

    #[test]
    fn invalidating_unknown_tag_is_noop() {
        let cache = TagCache::default();
        cache.insert(tag("machines"), 1_u32);
        assert_eq!(cache.invalidate("interventions"), 0);
        assert_eq!(cache.invalidate("interventions"), 0);
        assert_eq!(cache.get::<u32>(&tag("machines")), Some(1));
    }

    #[test]
    fn invalidation_covers_nested_tags_only() {
        let cache = TagCache::default();
        cache.insert(tag("interventions"), 1_u32);
        cache.insert(tag("interventions:7"), 2_u32);
        cache.insert(tag("interventions:query:status=open"), 3_u32);
        cache.insert(tag("interventions_archive"), 4_u32);
        cache.insert(tag("intervention_statuses"), 5_u32);

        assert_eq!(cache.invalidate("interventions"), 3);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get::<u32>(&tag("interventions_archive")), Some(4));
        assert_eq!(cache.get::<u32>(&tag("intervention_statuses")), Some(5));
    }

    #[test]
    fn item_invalidation_keeps_siblings() {
        let cache = TagCache::default();
        cache.insert(tag("stock:1"), 1_u32);
        cache.insert(tag("stock:10"), 10_u32);
        cache.insert(tag("stock"), 0_u32);

        assert_eq!(cache.invalidate(tag("stock:1")), 1);
        assert_eq!(cache.get::<u32>(&tag("stock:10")), Some(10));
        assert_eq!(cache.get::<u32>(&tag("stock")), Some(0));
    }

    #[test]
    fn wrong_type_is_a_miss() {
        let cache = TagCache::default();
        cache.insert(tag("machines"), vec![1_u32]);
        assert_eq!(cache.get::<String>(&tag("machines")), None);
    }

    #[tokio::test]
    async fn get_or_fetch_fetches_once_until_invalidated() {
        let cache = TagCache::default();
        let counter = AtomicUsize::new(0);
        let calls = &counter;
        let fetch = || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, ()>(vec!["a".to_owned()])
        };

        cache.get_or_fetch(tag("machines"), fetch).await.unwrap();
        cache.get_or_fetch(tag("machines"), fetch).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        cache.invalidate("machines");
        cache.get_or_fetch(tag("machines"), fetch).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let cache = TagCache::default();
        let result: Result<u32, &str> = cache
            .get_or_fetch(tag("stats"), || async { Err("boom") })
            .await;
        assert_eq!(result, Err("boom"));
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn fetch_overlapping_invalidation_is_not_stored() {
        let cache = TagCache::default();
        let shared = &cache;
        let value = cache
            .get_or_fetch(tag("interventions"), || async move {
                // A mutation lands while this read is in flight.
                shared.invalidate("interventions:7");
                Ok::<_, ()>(1_u32)
            })
            .await
            .unwrap();

        assert_eq!(value, 1);
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn entries_expire_after_ttl() {
        let cache = TagCache::new(Duration::from_secs(30));
        cache.insert(tag("machines"), 1_u32);

        tokio::time::advance(Duration::from_secs(29)).await;
        assert_eq!(cache.get::<u32>(&tag("machines")), Some(1));

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(cache.get::<u32>(&tag("machines")), None);
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn inserts_sweep_expired_entries_never_read_again() {
        let cache = TagCache::new(Duration::from_secs(30));
        cache.insert(tag("interventions:query:status=open"), 1_u32);
        cache.insert(tag("interventions:query:status=closed"), 2_u32);

        tokio::time::advance(Duration::from_secs(20)).await;
        cache.insert(tag("machines"), 3_u32);
        assert_eq!(cache.len(), 3);

        tokio::time::advance(Duration::from_secs(11)).await;
        cache.insert(tag("stock_items"), 4_u32);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get::<u32>(&tag("machines")), Some(3));
    }
}
