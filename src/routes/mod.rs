//! HTTP route handlers.

pub mod embed;
pub mod files;
pub mod health;
pub mod upload;

use axum::http::HeaderMap;

/// Scheme and host of the incoming request, for building absolute URLs.
///
/// Scheme comes from `X-Forwarded-Proto` when a proxy sets it, host from
/// the `Host` header. Falls back to `http://localhost` so URL building
/// never fails on malformed requests.
pub(crate) fn request_base(headers: &HeaderMap) -> (String, String) {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| "http".to_string());

    let host = headers
        .get(axum::http::header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
        .unwrap_or_else(|| "localhost".to_string());

    (scheme, host)
}

/// Hostname of the incoming request, without any port.
///
/// Bracketed IPv6 hosts keep their brackets; the colons inside them are
/// not a port separator.
pub(crate) fn request_hostname(headers: &HeaderMap) -> String {
    let (_, host) = request_base(headers);
    if host.starts_with('[') {
        match host.find(']') {
            Some(end) => host[..=end].to_string(),
            None => host,
        }
    } else {
        host.split(':').next().unwrap_or(&host).to_string()
    }
}
