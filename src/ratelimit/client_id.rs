//! Caller identity resolution from request headers.

use axum::http::HeaderMap;

/// Identifier used when no client address can be determined.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Derive a best-effort caller identifier from request headers, for use as
/// a rate-limit key.
///
/// `x-forwarded-for` takes precedence; it may carry a comma-separated proxy
/// chain, of which the first entry is conventionally the original client.
/// `x-real-ip` is used as-is when present. With neither header readable,
/// the literal `"unknown"` is returned, which lumps all such callers into a
/// single quota. This is not authentication-grade identity.
pub fn client_identifier(headers: &HeaderMap) -> String {
    if let Some(forwarded) = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
    {
        if let Some(first) = forwarded.split(',').next() {
            return first.trim().to_string();
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        return real_ip.to_string();
    }

    UNKNOWN_CLIENT.to_string()
}
