//! Allowed-origin compilation and resolution for CORS responses.
//!
//! The raw allowlist is a comma-separated string. Entries are trimmed and
//! empty entries dropped; configured order is kept because the first entry
//! doubles as the fallback origin.

/// Origin echoed when nothing is configured and the request has none.
pub const DEFAULT_ORIGIN: &str = "https://sc-sk.com";

/// Compiled origin allowlist.
#[derive(Debug, Clone)]
pub struct AllowedOrigins {
    origins: Vec<String>,
    default_origin: String,
}

impl AllowedOrigins {
    /// Compile a comma-separated list such as `https://a.com, https://b.com`.
    pub fn parse(raw: &str, default_origin: impl Into<String>) -> Self {
        let origins = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Self { origins, default_origin: default_origin.into() }
    }

    pub fn origins(&self) -> &[String] {
        &self.origins
    }

    pub fn is_allowed(&self, origin: &str) -> bool {
        self.origins.iter().any(|o| o == origin)
    }

    /// First configured origin, or the default when the list is empty.
    pub fn fallback(&self) -> &str {
        self.origins.first().map(String::as_str).unwrap_or(&self.default_origin)
    }

    /// Allow-origin for a counted request: the request origin only if listed.
    pub fn resolve<'a>(&'a self, request_origin: Option<&'a str>) -> &'a str {
        match request_origin {
            Some(o) if self.is_allowed(o) => o,
            _ => self.fallback(),
        }
    }

    /// Allow-origin for a preflight: mirrors any non-empty request origin.
    pub fn preflight<'a>(&'a self, request_origin: Option<&'a str>) -> &'a str {
        match request_origin {
            Some(o) if !o.is_empty() => o,
            _ => self.fallback(),
        }
    }
}

impl Default for AllowedOrigins {
    fn default() -> Self {
        Self::parse("", DEFAULT_ORIGIN)
    }
}
