//! dhcpscout core library
//!
//! This crate provides the shared types and error handling for the
//! dhcpscout DHCP server discovery tool: the query configuration, the
//! per-server result type, MAC addresses, and the error taxonomy every
//! other crate reports through.

pub mod config;
pub mod error;
pub mod server;
pub mod types;

// Re-export commonly used types
pub use config::{QueryConfig, DEFAULT_MAX_RESPONSES, DEFAULT_TIMEOUT};
pub use error::{Error, Result};
pub use server::ServerInfo;
pub use types::MacAddr;
