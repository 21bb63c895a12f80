//! Client IP resolution.
//!
//! Without a parseable peer address the client is unknown (empty string).
//! With forwarded headers trusted, `X-Forwarded-For` then `X-Real-IP` are
//! consulted; a header counts only if every comma-separated entry parses as
//! an IP, and then its first entry is used verbatim (trimmed). Otherwise the
//! peer IP is used.

use std::net::{IpAddr, SocketAddr};

use axum::http::HeaderMap;

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

pub fn resolve(headers: &HeaderMap, peer: Option<SocketAddr>, trust_forwarded: bool) -> String {
    let Some(peer) = peer else {
        return String::new();
    };
    if trust_forwarded {
        for name in [X_FORWARDED_FOR, X_REAL_IP] {
            if let Some(ip) = header_ip(headers, name) {
                return ip.to_string();
            }
        }
    }
    peer.ip().to_string()
}

fn header_ip<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    let raw = headers.get(name)?.to_str().ok()?;
    if raw.is_empty() {
        return None;
    }
    let mut entries = raw.split(',').map(str::trim);
    let first = entries.next()?;
    let all_valid = first.parse::<IpAddr>().is_ok()
        && entries.all(|e| e.parse::<IpAddr>().is_ok());
    all_valid.then_some(first)
}
