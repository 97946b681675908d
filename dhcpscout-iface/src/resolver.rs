//! Client MAC address selection

use crate::interface::{HostInfo, LinkInterface};
use dhcpscout_core::{Error, MacAddr, Result};
use tracing::{debug, warn};

/// Adapter preferred when the caller does not name one
#[cfg(target_os = "macos")]
pub const DEFAULT_ADAPTER: &str = "en0";

/// Adapter preferred when the caller does not name one
#[cfg(not(target_os = "macos"))]
pub const DEFAULT_ADAPTER: &str = "eth0";

/// Where a resolved MAC address came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacSource {
    /// The interface the caller asked for
    Named,
    /// The platform's default adapter
    DefaultAdapter,
    /// The first interface with a hardware address
    FirstAvailable,
    /// No interface had one; the address was generated
    Random,
}

/// A MAC address and the interface it was taken from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMac {
    pub mac: MacAddr,
    pub interface: Option<String>,
    pub source: MacSource,
}

/// Pick the client hardware address for a query
///
/// # Arguments
/// * `host` - Source of the interface list
/// * `interface_name` - Interface the caller wants to use, if any
///
/// # Returns
/// The MAC of `interface_name` when given. Otherwise the default adapter's,
/// then the first hardware address found, then a random locally
/// administered address.
///
/// # Errors
/// `InterfaceUnavailable` when `interface_name` is given and no interface
/// by that name has a hardware address.
pub fn resolve_mac<H: HostInfo>(host: &H, interface_name: Option<&str>) -> Result<MacAddr> {
    resolve_mac_detailed(host, interface_name).map(|resolved| resolved.mac)
}

/// Same as [`resolve_mac`], also reporting where the address came from
pub fn resolve_mac_detailed<H: HostInfo>(
    host: &H,
    interface_name: Option<&str>,
) -> Result<ResolvedMac> {
    let candidates: Vec<(LinkInterface, MacAddr)> = host
        .interfaces()
        .into_iter()
        .filter_map(|iface| iface.hardware_address().map(|mac| (iface, mac)))
        .collect();

    let found = |iface: &LinkInterface, mac: MacAddr, source: MacSource| ResolvedMac {
        mac,
        interface: Some(iface.name.clone()),
        source,
    };

    if let Some(name) = interface_name {
        return candidates
            .iter()
            .find(|(iface, _)| iface.name == name)
            .map(|(iface, mac)| found(iface, *mac, MacSource::Named))
            .ok_or_else(|| Error::InterfaceUnavailable(name.to_string()));
    }

    if let Some((iface, mac)) = candidates
        .iter()
        .find(|(iface, _)| iface.name == DEFAULT_ADAPTER)
    {
        debug!("Using MAC {} of default adapter {}", mac, iface.name);
        return Ok(found(iface, *mac, MacSource::DefaultAdapter));
    }

    if let Some((iface, mac)) = candidates.first() {
        debug!("Using MAC {} of interface {}", mac, iface.name);
        return Ok(found(iface, *mac, MacSource::FirstAvailable));
    }

    let mac = MacAddr::random_local();
    warn!("No interface has a hardware address; using random MAC {}", mac);
    Ok(ResolvedMac {
        mac,
        interface: None,
        source: MacSource::Random,
    })
}
