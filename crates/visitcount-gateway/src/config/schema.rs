use std::net::SocketAddr;

use axum::http::HeaderValue;
use serde::Deserialize;
use visitcount_core::counter::DEFAULT_START_AT;
use visitcount_core::error::{CountError, Result};
use visitcount_core::keys::VISITOR_TTL_SECS;
use visitcount_core::origin::{AllowedOrigins, DEFAULT_ORIGIN};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CounterConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub counter: CounterSection,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            counter: CounterSection::default(),
        }
    }
}

impl CounterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(CountError::BadConfig(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.server.validate()?;
        self.counter.validate()?;

        Ok(())
    }

    /// Apply `ALLOWED_ORIGINS`, `START_AT` and `LISTEN` on top of file values.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("ALLOWED_ORIGINS") {
            self.counter.allowed_origins = v;
        }
        if let Some(v) = lookup("START_AT") {
            self.counter.start_at = v.trim().parse().map_err(|_| {
                CountError::BadConfig(format!("START_AT must be a non-negative integer, got {v:?}"))
            })?;
        }
        if let Some(v) = lookup("LISTEN") {
            self.server.listen = v;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if !(1..=86_400).contains(&self.sweep_interval_secs) {
            return Err(CountError::BadConfig(
                "server.sweep_interval_secs must be between 1 and 86400".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            CountError::BadConfig(format!("server.listen must be a valid SocketAddr: {}", self.listen))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_sweep_interval_secs() -> u64 {
    300
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CounterSection {
    /// Comma-separated, e.g. `https://a.com,https://b.com`.
    #[serde(default)]
    pub allowed_origins: String,

    #[serde(default = "default_start_at")]
    pub start_at: u64,

    #[serde(default = "default_origin")]
    pub default_origin: String,

    #[serde(default = "default_visitor_ttl_secs")]
    pub visitor_ttl_secs: u64,
}

impl Default for CounterSection {
    fn default() -> Self {
        Self {
            allowed_origins: String::new(),
            start_at: default_start_at(),
            default_origin: default_origin(),
            visitor_ttl_secs: default_visitor_ttl_secs(),
        }
    }
}

impl CounterSection {
    pub fn validate(&self) -> Result<()> {
        if self.default_origin.trim().is_empty() {
            return Err(CountError::BadConfig("counter.default_origin must not be empty".into()));
        }
        if self.visitor_ttl_secs == 0 {
            return Err(CountError::BadConfig("counter.visitor_ttl_secs must be > 0".into()));
        }
        // Every origin ends up in a response header.
        let origins = self.compile_origins();
        for o in origins.origins().iter().chain(std::iter::once(&self.default_origin)) {
            if HeaderValue::from_str(o).is_err() {
                return Err(CountError::BadConfig(format!(
                    "origin is not a valid header value: {o:?}"
                )));
            }
        }
        Ok(())
    }

    pub fn compile_origins(&self) -> AllowedOrigins {
        AllowedOrigins::parse(&self.allowed_origins, self.default_origin.clone())
    }
}

fn default_start_at() -> u64 {
    DEFAULT_START_AT
}
fn default_origin() -> String {
    DEFAULT_ORIGIN.into()
}
fn default_visitor_ttl_secs() -> u64 {
    VISITOR_TTL_SECS
}
