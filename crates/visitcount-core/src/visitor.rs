//! Visitor identity from proxy headers.

/// Identity used when no proxy header carries a client address.
pub const UNKNOWN_IP: &str = "0.0.0.0";

/// Pick the visitor IP: `CF-Connecting-IP`, then `X-Forwarded-For`, then `0.0.0.0`.
///
/// Empty header values count as absent. `X-Forwarded-For` is taken whole;
/// multi-hop lists are not split.
pub fn resolve_ip<'a>(cf_connecting_ip: Option<&'a str>, forwarded_for: Option<&'a str>) -> &'a str {
    cf_connecting_ip
        .filter(|v| !v.is_empty())
        .or(forwarded_for.filter(|v| !v.is_empty()))
        .unwrap_or(UNKNOWN_IP)
}
