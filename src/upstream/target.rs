//! Upstream address resolution and transport security selection.

use std::net::IpAddr;

/// Port appended to secure targets that do not name one.
pub const DEFAULT_SECURE_PORT: u16 = 443;

/// Transport security for the Brain channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityMode {
    /// Unauthenticated HTTP/2, only for loopback targets.
    Plaintext,
    /// TLS with certificate validation.
    Tls,
}

impl std::fmt::Display for SecurityMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecurityMode::Plaintext => write!(f, "plaintext"),
            SecurityMode::Tls => write!(f, "tls"),
        }
    }
}

/// Where and how to connect to the Brain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamTarget {
    /// Endpoint URI handed to the gRPC channel (scheme://host:port).
    pub uri: String,
    /// Selected transport security.
    pub security: SecurityMode,
}

impl UpstreamTarget {
    /// Resolve a configured address.
    ///
    /// An explicit `http://` or `https://` prefix decides the mode. Otherwise
    /// loopback addresses use plaintext and everything else uses TLS, with
    /// `:443` appended when no port is given.
    pub fn resolve(address: &str) -> Self {
        let address = address.trim().trim_end_matches('/');

        if let Some(authority) = address.strip_prefix("https://") {
            return Self::secure(authority);
        }
        if let Some(authority) = address.strip_prefix("http://") {
            return Self::plaintext(authority);
        }

        if is_loopback(address) {
            Self::plaintext(address)
        } else {
            Self::secure(address)
        }
    }

    fn plaintext(authority: &str) -> Self {
        Self {
            uri: format!("http://{}", authority),
            security: SecurityMode::Plaintext,
        }
    }

    fn secure(authority: &str) -> Self {
        let uri = match split_authority(authority).1 {
            Some(_) => format!("https://{}", authority),
            None => format!("https://{}:{}", authority, DEFAULT_SECURE_PORT),
        };
        Self {
            uri,
            security: SecurityMode::Tls,
        }
    }
}

fn is_loopback(authority: &str) -> bool {
    if authority.contains("localhost") {
        return true;
    }
    split_authority(authority)
        .0
        .parse::<IpAddr>()
        .map(|ip| ip.is_loopback())
        .unwrap_or(false)
}

/// Split `host[:port]`, understanding bracketed IPv6 hosts.
fn split_authority(authority: &str) -> (&str, Option<&str>) {
    if let Some(rest) = authority.strip_prefix('[') {
        return match rest.split_once(']') {
            Some((host, tail)) => (host, tail.strip_prefix(':')),
            None => (authority, None),
        };
    }
    match authority.split_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (authority, None),
    }
}
