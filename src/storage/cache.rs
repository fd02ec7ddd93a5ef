//! Read cache with an injected clock.
//!
//! The cache is owned by the store, not the computation core, and its
//! notion of time comes in through the [`Clock`] trait so tests can pin
//! it.

use chrono::{DateTime, Duration, Utc};

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A single-value TTL cache.
#[derive(Debug)]
pub struct Cache<T> {
    ttl: Duration,
    entry: Option<(DateTime<Utc>, T)>,
}

impl<T> Cache<T> {
    /// Create an empty cache with the given time-to-live.
    #[must_use]
    pub const fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    /// The cached value, if present and still fresh at `now`.
    pub fn get(&self, now: DateTime<Utc>) -> Option<&T> {
        self.entry
            .as_ref()
            .filter(|(stamp, _)| now - *stamp < self.ttl)
            .map(|(_, value)| value)
    }

    /// Store a value stamped at `now`.
    pub fn put(&mut self, value: T, now: DateTime<Utc>) {
        self.entry = Some((now, value));
    }

    /// Drop the cached value. Called after every write so the next read
    /// sees fresh data.
    pub fn clear(&mut self) {
        self.entry = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 6, 12, 0, secs).unwrap()
    }

    #[test]
    fn test_fresh_value_returned() {
        let mut cache = Cache::new(Duration::seconds(30));
        cache.put(7, at(0));
        assert_eq!(cache.get(at(10)), Some(&7));
    }

    #[test]
    fn test_expired_value_dropped() {
        let mut cache = Cache::new(Duration::seconds(30));
        cache.put(7, at(0));
        assert_eq!(cache.get(at(31)), None);
    }

    #[test]
    fn test_clear() {
        let mut cache = Cache::new(Duration::seconds(30));
        cache.put(7, at(0));
        cache.clear();
        assert_eq!(cache.get(at(1)), None);
    }
}
