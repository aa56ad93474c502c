use nyumba_cache::{Clock, TtlCache};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// A clock the test advances by hand.
struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(Instant::now()),
        })
    }

    fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap()
    }
}

const TTL: Duration = Duration::from_secs(60);

fn cache_with_clock(capacity: usize) -> (TtlCache<String, u32>, Arc<ManualClock>) {
    let clock = ManualClock::new();
    let cache = TtlCache::with_clock(capacity, TTL, clock.clone());
    (cache, clock)
}

// ── basic storage ─────────────────────────────────────────────────

#[test]
fn put_then_get() {
    let (mut cache, _clock) = cache_with_clock(4);
    cache.put("abidjan".into(), 1);

    assert_eq!(cache.get(&"abidjan".into()), Some(&1));
    assert_eq!(cache.len(), 1);
    assert!(cache.contains(&"abidjan".into()));
}

#[test]
fn get_missing_is_none() {
    let (mut cache, _clock) = cache_with_clock(4);
    assert_eq!(cache.get(&"nowhere".into()), None);
}

#[test]
fn put_replaces_existing_value() {
    let (mut cache, _clock) = cache_with_clock(4);
    cache.put("k".into(), 1);
    cache.put("k".into(), 2);

    assert_eq!(cache.get(&"k".into()), Some(&2));
    assert_eq!(cache.len(), 1);
}

#[test]
fn clear_empties_the_cache() {
    let (mut cache, _clock) = cache_with_clock(4);
    cache.put("a".into(), 1);
    cache.put("b".into(), 2);

    cache.clear();
    assert!(cache.is_empty());
    assert_eq!(cache.get(&"a".into()), None);
}

// ── expiry ────────────────────────────────────────────────────────

#[test]
fn entries_expire_after_ttl() {
    let (mut cache, clock) = cache_with_clock(4);
    cache.put("k".into(), 1);

    clock.advance(TTL + Duration::from_secs(1));

    assert_eq!(cache.get(&"k".into()), None);
    assert!(!cache.contains(&"k".into()));
    assert!(cache.is_empty());
}

#[test]
fn entry_is_live_just_before_ttl() {
    let (mut cache, clock) = cache_with_clock(4);
    cache.put("k".into(), 1);

    clock.advance(TTL - Duration::from_secs(1));
    assert_eq!(cache.get(&"k".into()), Some(&1));
}

#[test]
fn get_does_not_extend_expiry() {
    let (mut cache, clock) = cache_with_clock(4);
    cache.put("k".into(), 1);

    // Keep reading the entry right up to the deadline.
    clock.advance(TTL / 2);
    assert!(cache.get(&"k".into()).is_some());
    clock.advance(TTL / 2);

    assert_eq!(cache.get(&"k".into()), None);
}

#[test]
fn put_resets_expiry() {
    let (mut cache, clock) = cache_with_clock(4);
    cache.put("k".into(), 1);

    clock.advance(TTL / 2);
    cache.put("k".into(), 2);
    clock.advance(TTL / 2 + Duration::from_secs(1));

    assert_eq!(cache.get(&"k".into()), Some(&2));
}

#[test]
fn purge_expired_reports_count() {
    let (mut cache, clock) = cache_with_clock(8);
    cache.put("a".into(), 1);
    cache.put("b".into(), 2);

    clock.advance(TTL / 2);
    cache.put("c".into(), 3);

    clock.advance(TTL / 2 + Duration::from_secs(1));
    // a and b are past their TTL, c is not.
    assert_eq!(cache.purge_expired(), 2);
    assert_eq!(cache.len(), 1);
    assert!(cache.contains(&"c".into()));
}

// ── capacity and eviction ─────────────────────────────────────────

#[test]
fn capacity_is_a_hard_bound() {
    let (mut cache, _clock) = cache_with_clock(2);
    cache.put("a".into(), 1);
    cache.put("b".into(), 2);
    cache.put("c".into(), 3);

    assert_eq!(cache.len(), 2);
}

#[test]
fn least_recently_used_is_evicted_first() {
    let (mut cache, _clock) = cache_with_clock(2);
    cache.put("a".into(), 1);
    cache.put("b".into(), 2);

    // Touch a so b becomes the eviction candidate.
    cache.get(&"a".into());
    cache.put("c".into(), 3);

    assert!(cache.contains(&"a".into()));
    assert!(!cache.contains(&"b".into()));
    assert!(cache.contains(&"c".into()));
}

#[test]
fn expired_entries_are_purged_before_live_ones_are_evicted() {
    let (mut cache, clock) = cache_with_clock(2);
    cache.put("stale".into(), 1);
    clock.advance(TTL + Duration::from_secs(1));

    cache.put("fresh".into(), 2);
    cache.put("newer".into(), 3);

    // The expired entry made room; both live entries survive.
    assert!(cache.contains(&"fresh".into()));
    assert!(cache.contains(&"newer".into()));
}

#[test]
fn replacing_a_key_does_not_evict_others() {
    let (mut cache, _clock) = cache_with_clock(2);
    cache.put("a".into(), 1);
    cache.put("b".into(), 2);
    cache.put("a".into(), 10);

    assert!(cache.contains(&"a".into()));
    assert!(cache.contains(&"b".into()));
}

#[test]
fn zero_capacity_stores_nothing() {
    let (mut cache, _clock) = cache_with_clock(0);
    cache.put("k".into(), 1);

    assert!(cache.is_empty());
    assert_eq!(cache.get(&"k".into()), None);
}

// ── explicit eviction ─────────────────────────────────────────────

#[test]
fn evict_returns_the_live_value() {
    let (mut cache, _clock) = cache_with_clock(4);
    cache.put("k".into(), 7);

    assert_eq!(cache.evict(&"k".into()), Some(7));
    assert_eq!(cache.evict(&"k".into()), None);
    assert!(cache.is_empty());
}

#[test]
fn evict_of_expired_entry_returns_none() {
    let (mut cache, clock) = cache_with_clock(4);
    cache.put("k".into(), 7);
    clock.advance(TTL + Duration::from_secs(1));

    assert_eq!(cache.evict(&"k".into()), None);
}

// ── invariants ────────────────────────────────────────────────────

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// The capacity bound holds under any operation sequence.
        #[test]
        fn len_never_exceeds_capacity(
            capacity in 0usize..8,
            ops in prop::collection::vec((any::<bool>(), 0u8..16), 0..100),
        ) {
            let (mut cache, _clock) = {
                let clock = ManualClock::new();
                (TtlCache::with_clock(capacity, TTL, clock.clone()), clock)
            };

            for (is_put, key) in ops {
                let key = key.to_string();
                if is_put {
                    cache.put(key, 0u32);
                } else {
                    cache.get(&key);
                }
                prop_assert!(cache.len() <= capacity);
            }
        }

        /// A value just written is readable until time moves.
        #[test]
        fn put_then_get_is_always_a_hit(
            keys in prop::collection::vec(0u8..16, 1..40),
        ) {
            let (mut cache, _clock) = cache_with_clock(16);

            for key in keys {
                let key = key.to_string();
                cache.put(key.clone(), u32::from(key.as_bytes()[0]));
                prop_assert!(cache.get(&key).is_some());
            }
        }
    }
}
