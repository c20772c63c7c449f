//! Key-value store seam.
//!
//! The counter only needs `get` and `put` with an optional per-key TTL.
//! Absence is an explicit `None`; there is no null sentinel value.

pub mod memory;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

pub use memory::{spawn_sweeper, MemoryStore};

/// Write options for [`KvStore::put`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PutOptions {
    /// Entry disappears this long after the write. `None` keeps it forever.
    pub expiration_ttl: Option<Duration>,
}

impl PutOptions {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self { expiration_ttl: Some(ttl) }
    }
}

/// Async key-value store with per-key expiration.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn put(&self, key: &str, value: String, opts: PutOptions) -> Result<()>;
}
