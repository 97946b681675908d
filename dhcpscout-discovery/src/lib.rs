//! DHCP server discovery for dhcpscout
//!
//! This crate broadcasts a single DHCPDISCOVER and reports the servers that
//! answer. It includes:
//!
//! - `Discoverer`: Validates a query, resolves the client MAC and reduces replies
//! - `DiscoverySocket`: UDP broadcast socket with a single overall deadline
//! - `Transport`: Seam between the orchestrator and the network
//! - `query_async`: Runs a query on tokio's blocking pool
//!
//! # Example
//!
//! ```no_run
//! use dhcpscout_core::QueryConfig;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = QueryConfig::new().with_timeout(Duration::from_secs(2));
//!
//!     for server in dhcpscout_discovery::query_async(config).await? {
//!         println!("{}", server);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod discover;
pub mod socket;
pub mod transport;
pub mod worker;

pub use discover::{
    collect_servers, query, server_info, Discoverer, DiscoveryRequest, UNKNOWN_SERVER_ID,
};
pub use socket::DiscoverySocket;
pub use transport::{RawReply, Transport};
pub use worker::query_async;
