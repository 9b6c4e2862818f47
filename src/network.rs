//! Host network information.
//!
//! Every session record carries a description of the host that served it:
//! the address of the first non-loopback IPv4 interface and, when the
//! platform exposes it, that interface's MAC address. The lookup sits behind
//! [`HostNetworkInfo`] so the registry can be tested without touching real
//! interfaces.

use std::net::IpAddr;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Network descriptors of the host process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    /// IPv4 address of the first external interface.
    pub ip: Option<String>,
    /// MAC address of that interface, lowercase and colon separated.
    pub mac: Option<String>,
}

impl ServerInfo {
    pub fn new(ip: impl Into<String>, mac: Option<String>) -> Self {
        Self {
            ip: Some(ip.into()),
            mac,
        }
    }
}

/// Provider of host network descriptors.
pub trait HostNetworkInfo: Send + Sync {
    fn server_info(&self) -> ServerInfo;
}

/// Fixed network info, for tests and hosts without usable interfaces.
#[derive(Debug, Clone, Default)]
pub struct StaticNetworkInfo(pub ServerInfo);

impl StaticNetworkInfo {
    pub fn new(info: ServerInfo) -> Self {
        Self(info)
    }
}

impl HostNetworkInfo for StaticNetworkInfo {
    fn server_info(&self) -> ServerInfo {
        self.0.clone()
    }
}

/// Network info read from the host's interfaces.
///
/// Results are cached for `refresh`; a zero interval queries the host on
/// every call.
#[derive(Debug)]
pub struct SystemNetworkInfo {
    refresh: Duration,
    cache: RwLock<Option<(Instant, ServerInfo)>>,
}

impl SystemNetworkInfo {
    pub fn new(refresh: Duration) -> Self {
        Self {
            refresh,
            cache: RwLock::new(None),
        }
    }

    /// Query the host interfaces, bypassing the cache.
    pub fn lookup() -> ServerInfo {
        let interfaces = match if_addrs::get_if_addrs() {
            Ok(interfaces) => interfaces,
            Err(e) => {
                tracing::warn!("failed to enumerate network interfaces: {}", e);
                return ServerInfo::default();
            }
        };

        let external = interfaces
            .into_iter()
            .find(|iface| !iface.is_loopback() && matches!(iface.ip(), IpAddr::V4(_)));

        match external {
            Some(iface) => ServerInfo {
                ip: Some(iface.ip().to_string()),
                mac: mac_for(&iface.name),
            },
            None => {
                tracing::debug!("no external IPv4 interface found");
                ServerInfo::default()
            }
        }
    }

    fn cached(&self) -> Option<ServerInfo> {
        let cache = self.cache.read().ok()?;
        match cache.as_ref() {
            Some((at, info)) if at.elapsed() < self.refresh => Some(info.clone()),
            _ => None,
        }
    }
}

impl Default for SystemNetworkInfo {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

impl HostNetworkInfo for SystemNetworkInfo {
    fn server_info(&self) -> ServerInfo {
        if let Some(info) = self.cached() {
            return info;
        }

        let info = Self::lookup();
        if !self.refresh.is_zero() {
            if let Ok(mut cache) = self.cache.write() {
                *cache = Some((Instant::now(), info.clone()));
            }
        }
        info
    }
}

fn mac_for(interface: &str) -> Option<String> {
    match mac_address::mac_address_by_name(interface) {
        Ok(Some(mac)) => Some(mac.to_string().to_lowercase()),
        Ok(None) => None,
        Err(e) => {
            tracing::debug!("no MAC address for {}: {}", interface, e);
            None
        }
    }
}
