//! Host interface access for dhcpscout
//!
//! This crate wraps the host state the discovery engine reads: the list of
//! local network interfaces (through `pnet_datalink`) and the machine's
//! hostname. Both are reached through the [`HostInfo`] trait so callers can
//! substitute a fixed description of the host.
//!
//! ## Example
//!
//! ```no_run
//! use dhcpscout_iface::{default_hostname, resolve_mac, SystemHost};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mac = resolve_mac(&SystemHost, None)?;
//! let hostname = default_hostname(&SystemHost);
//! println!("{} {:?}", mac, hostname);
//! # Ok(())
//! # }
//! ```

pub mod hostname;
pub mod interface;
pub mod resolver;

// Re-export main types
pub use hostname::default_hostname;
pub use interface::{HostInfo, LinkInterface, StaticHost, SystemHost};
pub use resolver::{resolve_mac, resolve_mac_detailed, MacSource, ResolvedMac, DEFAULT_ADAPTER};
