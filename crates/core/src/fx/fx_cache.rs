//! In-memory exchange-rate cache with TTL.
//!
//! One cache instance is constructed per process and shared by reference.
//! Entries expire a fixed interval after creation and are evicted lazily
//! on the next lookup for that key; there is no background sweeper. The
//! clock is injected so expiry is testable.

use chrono::Duration;
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::fx_model::{pair_key, CachedRate};
use crate::constants::EXCHANGE_RATE_CACHE_TTL_SECS;
use crate::utils::Clock;

pub struct RateCache {
    entries: DashMap<String, CachedRate>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl RateCache {
    /// Create a cache with the default 5-minute TTL.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_ttl(clock, Duration::seconds(EXCHANGE_RATE_CACHE_TTL_SECS))
    }

    pub fn with_ttl(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            clock,
        }
    }

    /// Get a live rate for the pair, evicting it first if it has expired.
    pub fn get(&self, from: &str, to: &str) -> Option<Decimal> {
        let key = pair_key(from, to);
        let now = self.clock.now();

        let expired = match self.entries.get(&key) {
            Some(entry) if !entry.is_expired(now) => return Some(entry.rate),
            Some(_) => true,
            None => false,
        };
        if expired {
            // Evict so the map does not accumulate stale pairs
            self.entries.remove(&key);
        }
        None
    }

    pub fn insert(&self, from: &str, to: &str, rate: Decimal) {
        let now = self.clock.now();
        self.entries.insert(
            pair_key(from, to),
            CachedRate {
                rate,
                fetched_at: now,
                expires_at: now + self.ttl,
            },
        );
    }

    /// Number of entries currently stored, expired or not.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}
