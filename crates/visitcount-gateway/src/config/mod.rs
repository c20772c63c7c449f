//! Gateway config loader (strict YAML + environment overrides).

pub mod schema;

use std::fs;
use std::path::Path;

use visitcount_core::error::{CountError, Result};

pub use schema::{CounterConfig, CounterSection, ServerSection};

/// Env var naming the YAML config file.
pub const CONFIG_PATH_ENV: &str = "VISITCOUNT_CONFIG";
/// Config file read when `VISITCOUNT_CONFIG` is unset (optional).
pub const DEFAULT_CONFIG_PATH: &str = "visitcount.yaml";

pub fn load_from_file(path: &str) -> Result<CounterConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| CountError::BadConfig(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<CounterConfig> {
    let cfg: CounterConfig = serde_yaml::from_str(s)
        .map_err(|e| CountError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load from the process environment.
pub fn load() -> Result<CounterConfig> {
    load_with(|key| std::env::var(key).ok())
}

/// Resolve the config file, then apply env overrides and validate.
///
/// An explicitly named file must exist; the default file is optional.
pub fn load_with<F>(lookup: F) -> Result<CounterConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = match lookup(CONFIG_PATH_ENV) {
        Some(path) => load_from_file(&path)?,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => load_from_file(DEFAULT_CONFIG_PATH)?,
        None => CounterConfig::default(),
    };
    cfg.apply_env(lookup)?;
    cfg.validate()?;
    Ok(cfg)
}
