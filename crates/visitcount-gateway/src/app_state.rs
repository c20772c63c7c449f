//! Shared application state for the visitcount gateway.
//!
//! Config is compiled once here (origin allowlist, counter) and shared
//! read-only across requests. The store and clock are injected so tests can
//! swap them.

use std::sync::Arc;
use std::time::Duration;

use visitcount_core::clock::Clock;
use visitcount_core::counter::Counter;
use visitcount_core::origin::AllowedOrigins;
use visitcount_core::store::KvStore;

use crate::config::CounterConfig;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    origins: AllowedOrigins,
    counter: Counter,
}

impl AppState {
    pub fn new(cfg: CounterConfig, store: Arc<dyn KvStore>, clock: Arc<dyn Clock>) -> Self {
        let origins = cfg.counter.compile_origins();
        let counter = Counter::new(store, clock, cfg.counter.start_at)
            .with_visitor_ttl(Duration::from_secs(cfg.counter.visitor_ttl_secs));

        Self {
            inner: Arc::new(AppStateInner { origins, counter }),
        }
    }

    pub fn origins(&self) -> &AllowedOrigins {
        &self.inner.origins
    }

    pub fn counter(&self) -> &Counter {
        &self.inner.counter
    }
}
