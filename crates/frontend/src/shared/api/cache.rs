use std::collections::HashMap;

/// Time source for cache expiry, in milliseconds.
pub trait Clock {
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

struct Entry<V> {
    value: V,
    stored_at: i64,
}

/// Small keyed cache with a fixed time-to-live.
///
/// Keys are request paths, so a mutation on `/classes/12` can drop every
/// cached `/classes...` entry with [`TtlCache::invalidate_prefix`].
pub struct TtlCache<V, C = SystemClock> {
    entries: HashMap<String, Entry<V>>,
    ttl_millis: i64,
    clock: C,
}

impl<V: Clone, C: Clock> TtlCache<V, C> {
    pub fn new(ttl_secs: u64, clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            ttl_millis: i64::try_from(ttl_secs.saturating_mul(1000)).unwrap_or(i64::MAX),
            clock,
        }
    }

    /// Fresh value for `key`. Expired entries are dropped on access.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let now = self.clock.now_millis();
        let expired = match self.entries.get(key) {
            Some(entry) if now - entry.stored_at < self.ttl_millis => return Some(entry.value.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            self.entries.remove(key);
        }
        None
    }

    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        if self.ttl_millis == 0 {
            return;
        }
        let stored_at = self.clock.now_millis();
        self.entries.insert(key.into(), Entry { value, stored_at });
    }

    pub fn invalidate_prefix(&mut self, prefix: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.starts_with(prefix));
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct ManualClock(Rc<Cell<i64>>);

    impl ManualClock {
        fn advance_secs(&self, secs: i64) {
            self.0.set(self.0.get() + secs * 1000);
        }
    }

    impl Clock for ManualClock {
        fn now_millis(&self) -> i64 {
            self.0.get()
        }
    }

    #[test]
    fn entries_expire_after_ttl() {
        let clock = ManualClock::default();
        let mut cache = TtlCache::new(300, clock.clone());
        cache.insert("/references/branches", "[1]".to_string());

        clock.advance_secs(299);
        assert_eq!(cache.get("/references/branches").as_deref(), Some("[1]"));

        clock.advance_secs(1);
        assert_eq!(cache.get("/references/branches"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn prefix_invalidation_only_hits_matching_keys() {
        let mut cache = TtlCache::new(60, ManualClock::default());
        cache.insert("/classes?ecole=1", 1);
        cache.insert("/classes/4", 2);
        cache.insert("/salles", 3);

        assert_eq!(cache.invalidate_prefix("/classes"), 2);
        assert_eq!(cache.get("/salles"), Some(3));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn zero_ttl_disables_caching() {
        let mut cache = TtlCache::new(0, ManualClock::default());
        cache.insert("/salles", 1);
        assert_eq!(cache.get("/salles"), None);
    }
}
