//! Caller address resolution.

use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{request::Parts, HeaderMap},
};

use super::handlers::AppState;

/// Address reported when no source yields one.
pub const UNKNOWN_CLIENT_IP: &str = "0.0.0.0";

/// Best-known address of the caller.
///
/// Sources are tried in order: the first `X-Forwarded-For` hop (only when
/// the server is configured to trust it), the socket peer address, then
/// [`UNKNOWN_CLIENT_IP`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientAddr(pub String);

impl ClientAddr {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve the caller address from request metadata.
    pub fn resolve(headers: &HeaderMap, peer: Option<SocketAddr>, trust_forwarded: bool) -> Self {
        if trust_forwarded {
            if let Some(ip) = forwarded_for(headers) {
                return Self(ip);
            }
        }

        match peer {
            Some(addr) => Self(display_ip(addr.ip())),
            None => Self(UNKNOWN_CLIENT_IP.to_string()),
        }
    }
}

impl FromRequestParts<AppState> for ClientAddr {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        Ok(Self::resolve(&parts.headers, peer, state.trust_forwarded_for))
    }
}

fn forwarded_for(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("x-forwarded-for")?.to_str().ok()?;
    let first = value.split(',').next()?.trim();
    first.parse::<IpAddr>().ok().map(display_ip)
}

fn display_ip(ip: IpAddr) -> String {
    match ip {
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => v4.to_string(),
            None => v6.to_string(),
        },
        IpAddr::V4(v4) => v4.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(forwarded: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_str(forwarded).unwrap());
        headers
    }

    #[test]
    fn test_peer_address() {
        let peer: SocketAddr = "203.0.113.7:51234".parse().unwrap();
        let addr = ClientAddr::resolve(&HeaderMap::new(), Some(peer), false);
        assert_eq!(addr.as_str(), "203.0.113.7");
    }

    #[test]
    fn test_unknown_without_sources() {
        let addr = ClientAddr::resolve(&HeaderMap::new(), None, true);
        assert_eq!(addr.as_str(), UNKNOWN_CLIENT_IP);
    }

    #[test]
    fn test_forwarded_for_ignored_by_default() {
        let peer: SocketAddr = "10.0.0.1:80".parse().unwrap();
        let addr = ClientAddr::resolve(&headers("198.51.100.4"), Some(peer), false);
        assert_eq!(addr.as_str(), "10.0.0.1");
    }

    #[test]
    fn test_forwarded_for_first_hop() {
        let peer: SocketAddr = "10.0.0.1:80".parse().unwrap();
        let addr = ClientAddr::resolve(
            &headers("198.51.100.4, 10.0.0.2, 10.0.0.3"),
            Some(peer),
            true,
        );
        assert_eq!(addr.as_str(), "198.51.100.4");
    }

    #[test]
    fn test_garbage_forwarded_for_falls_back() {
        let peer: SocketAddr = "10.0.0.1:80".parse().unwrap();
        let addr = ClientAddr::resolve(&headers("not-an-ip"), Some(peer), true);
        assert_eq!(addr.as_str(), "10.0.0.1");
    }

    #[test]
    fn test_ipv4_mapped_peer() {
        let peer: SocketAddr = "[::ffff:192.0.2.33]:443".parse().unwrap();
        let addr = ClientAddr::resolve(&HeaderMap::new(), Some(peer), false);
        assert_eq!(addr.as_str(), "192.0.2.33");
    }
}
