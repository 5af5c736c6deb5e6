//! Single-slot cache for the live-status aggregation result.
//!
//! One process-wide mutable slot holding the most recent completed poll
//! cycle. A slot is served only while fresh AND non-empty: an all-empty
//! result is stored but never trusted, so the next call re-polls instead of
//! pinning a transient all-providers-down condition for the whole window.

use std::time::{Duration, Instant};

use parking_lot::RwLock;

use crate::models::LiveStreamRecord;

#[derive(Debug, Default)]
struct CacheSlot {
    last_updated: Option<Instant>,
    entries: Vec<LiveStreamRecord>,
}

/// Freshness-windowed cache for aggregated live-stream records
#[derive(Debug)]
pub struct LiveCache {
    slot: RwLock<CacheSlot>,
    ttl: Duration,
}

impl LiveCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: RwLock::new(CacheSlot::default()),
            ttl,
        }
    }

    /// Return the cached entries when the slot is within the freshness
    /// window and non-empty; `None` means the caller must refresh.
    #[must_use]
    pub fn fresh(&self) -> Option<Vec<LiveStreamRecord>> {
        let slot = self.slot.read();
        let last_updated = slot.last_updated?;
        if last_updated.elapsed() < self.ttl && !slot.entries.is_empty() {
            return Some(slot.entries.clone());
        }
        None
    }

    /// Replace the slot with the result of a completed poll cycle
    pub fn store(&self, entries: Vec<LiveStreamRecord>) {
        let mut slot = self.slot.write();
        slot.last_updated = Some(Instant::now());
        slot.entries = entries;
    }

    /// Number of entries in the slot, regardless of freshness
    #[must_use]
    pub fn len(&self) -> usize {
        self.slot.read().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Platform, StreamerId};

    fn sample_record(name: &str) -> LiveStreamRecord {
        let streamer_id = StreamerId::from_string(format!("{name}-id"));
        LiveStreamRecord {
            id: LiveStreamRecord::record_id(Platform::Twitch, &streamer_id),
            streamer_name: name.to_string(),
            platform: Platform::Twitch,
            title: "title".to_string(),
            thumbnail_url: "https://example.com/t.jpg".to_string(),
            viewer_count: 10,
            stream_url: "https://twitch.tv/x".to_string(),
        }
    }

    #[test]
    fn test_empty_cache_is_never_fresh() {
        let cache = LiveCache::new(Duration::from_secs(30));
        assert!(cache.fresh().is_none());
    }

    #[test]
    fn test_fresh_within_window() {
        let cache = LiveCache::new(Duration::from_secs(30));
        cache.store(vec![sample_record("alice")]);

        let entries = cache.fresh().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].streamer_name, "alice");
    }

    #[test]
    fn test_all_empty_result_is_stored_but_not_served() {
        let cache = LiveCache::new(Duration::from_secs(30));
        cache.store(Vec::new());

        assert!(cache.is_empty());
        assert!(cache.fresh().is_none());
    }

    #[test]
    fn test_expired_slot_is_not_served() {
        let cache = LiveCache::new(Duration::ZERO);
        cache.store(vec![sample_record("alice")]);

        assert!(cache.fresh().is_none());
    }

    #[test]
    fn test_store_replaces_previous_entries() {
        let cache = LiveCache::new(Duration::from_secs(30));
        cache.store(vec![sample_record("alice"), sample_record("bob")]);
        cache.store(vec![sample_record("carol")]);

        let entries = cache.fresh().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].streamer_name, "carol");
    }
}
