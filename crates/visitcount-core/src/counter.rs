//! Daily-deduplicated visit counter.
//!
//! Per visit: lazily create `total` at the start value, then bump it only if
//! the visitor has no marker for today. The read-then-write sequence is not
//! atomic; concurrent first visits from one IP can both increment.

use std::sync::Arc;
use std::time::Duration;

use crate::clock::Clock;
use crate::error::Result;
use crate::keys::{self, COUNTER_KEY, VISITOR_MARK, VISITOR_TTL_SECS};
use crate::store::{KvStore, PutOptions};

/// Counter value used when nothing is configured.
pub const DEFAULT_START_AT: u64 = 9000;

/// Outcome of one recorded visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit {
    /// Counter value to report.
    pub total: u64,
    /// True if this visit incremented the counter.
    pub counted: bool,
}

pub struct Counter {
    store: Arc<dyn KvStore>,
    clock: Arc<dyn Clock>,
    start_at: u64,
    visitor_ttl: Duration,
}

impl Counter {
    pub fn new(store: Arc<dyn KvStore>, clock: Arc<dyn Clock>, start_at: u64) -> Self {
        Self {
            store,
            clock,
            start_at,
            visitor_ttl: Duration::from_secs(VISITOR_TTL_SECS),
        }
    }

    pub fn with_visitor_ttl(mut self, ttl: Duration) -> Self {
        self.visitor_ttl = ttl;
        self
    }

    /// Record a visit from `ip` and return the counter to report.
    pub async fn record_visit(&self, ip: &str) -> Result<Visit> {
        let visitor_key = keys::visitor_key(self.clock.today(), ip);

        let total = match self.store.get(COUNTER_KEY).await? {
            Some(raw) => raw,
            None => {
                let init = self.start_at.to_string();
                self.store
                    .put(COUNTER_KEY, init.clone(), PutOptions::default())
                    .await?;
                tracing::info!(start_at = self.start_at, "counter initialized");
                init
            }
        };

        if self.store.get(&visitor_key).await?.is_some() {
            tracing::debug!(%visitor_key, "visitor already counted today");
            return Ok(Visit { total: self.parse_total(&total), counted: false });
        }

        let next = self.parse_total(&total).saturating_add(1);
        self.store
            .put(COUNTER_KEY, next.to_string(), PutOptions::default())
            .await?;
        self.store
            .put(
                &visitor_key,
                VISITOR_MARK.to_string(),
                PutOptions::with_ttl(self.visitor_ttl),
            )
            .await?;

        tracing::debug!(%visitor_key, total = next, "visit counted");
        Ok(Visit { total: next, counted: true })
    }

    /// Stored counter as a number; anything unparseable reads as the start value.
    ///
    /// Only non-negative integers count as numbers here: empty, fractional and
    /// negative values all read as the start value.
    fn parse_total(&self, raw: &str) -> u64 {
        match raw.trim().parse::<u64>() {
            Ok(n) => n,
            Err(_) => {
                tracing::warn!(raw, start_at = self.start_at, "stored total is not a number");
                self.start_at
            }
        }
    }
}
