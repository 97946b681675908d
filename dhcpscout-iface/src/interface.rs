//! Network interface enumeration

use crate::hostname;
use dhcpscout_core::MacAddr;
use pnet_datalink::{self, NetworkInterface};
use std::fmt;
use std::net::Ipv4Addr;

/// Link-layer view of a local network interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkInterface {
    /// Interface name (e.g., "eth0", "en0")
    pub name: String,
    /// Hardware address, if the interface has a 6-byte one
    pub mac: Option<MacAddr>,
    /// IPv4 addresses assigned to the interface
    pub ipv4: Vec<Ipv4Addr>,
    /// Is interface up?
    pub is_up: bool,
    /// Is interface a loopback?
    pub is_loopback: bool,
}

impl LinkInterface {
    /// Create an up, non-loopback interface with no addresses
    pub fn new<S: Into<String>>(name: S, mac: Option<MacAddr>) -> Self {
        Self {
            name: name.into(),
            mac,
            ipv4: Vec::new(),
            is_up: true,
            is_loopback: false,
        }
    }

    /// Hardware address usable as a DHCP `chaddr`
    ///
    /// Loopback and tunnel devices report an all-zero address, which does
    /// not count.
    pub fn hardware_address(&self) -> Option<MacAddr> {
        self.mac.filter(|mac| !mac.is_zero())
    }
}

impl From<&NetworkInterface> for LinkInterface {
    fn from(iface: &NetworkInterface) -> Self {
        let mac = iface
            .mac
            .map(|mac| MacAddr::new([mac.0, mac.1, mac.2, mac.3, mac.4, mac.5]));

        let ipv4 = iface
            .ips
            .iter()
            .filter_map(|network| match network {
                ipnetwork::IpNetwork::V4(v4) => Some(v4.ip()),
                ipnetwork::IpNetwork::V6(_) => None,
            })
            .collect();

        Self {
            name: iface.name.clone(),
            mac,
            ipv4,
            is_up: iface.is_up(),
            is_loopback: iface.is_loopback(),
        }
    }
}

impl fmt::Display for LinkInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.hardware_address() {
            Some(mac) => write!(f, "{} ({})", self.name, mac),
            None => write!(f, "{} (no hardware address)", self.name),
        }
    }
}

/// Host state the discovery engine depends on
///
/// Passed into the resolver instead of being queried ambiently so tests can
/// supply a fixed interface list and hostname.
pub trait HostInfo {
    /// Enumerate local network interfaces
    fn interfaces(&self) -> Vec<LinkInterface>;

    /// The host's own name, if it can be determined
    fn hostname(&self) -> Option<String>;
}

/// The running machine's real interfaces and hostname
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHost;

impl HostInfo for SystemHost {
    fn interfaces(&self) -> Vec<LinkInterface> {
        pnet_datalink::interfaces()
            .iter()
            .map(LinkInterface::from)
            .collect()
    }

    fn hostname(&self) -> Option<String> {
        hostname::system_hostname()
    }
}

/// Fixed host description for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct StaticHost {
    pub interfaces: Vec<LinkInterface>,
    pub hostname: Option<String>,
}

impl StaticHost {
    pub fn new(interfaces: Vec<LinkInterface>) -> Self {
        Self {
            interfaces,
            hostname: None,
        }
    }

    pub fn with_hostname<S: Into<String>>(mut self, hostname: S) -> Self {
        self.hostname = Some(hostname.into());
        self
    }
}

impl HostInfo for StaticHost {
    fn interfaces(&self) -> Vec<LinkInterface> {
        self.interfaces.clone()
    }

    fn hostname(&self) -> Option<String> {
        self.hostname.clone()
    }
}

impl<H: HostInfo + ?Sized> HostInfo for &H {
    fn interfaces(&self) -> Vec<LinkInterface> {
        (**self).interfaces()
    }

    fn hostname(&self) -> Option<String> {
        (**self).hostname()
    }
}
