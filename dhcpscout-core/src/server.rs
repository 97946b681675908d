//! Discovered DHCP server description

use std::fmt;

/// One distinct DHCP server that answered a DISCOVER
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerInfo {
    /// Server identifier (option 54), else the reply's source address
    pub id: String,
    /// Address offered to the client (`yiaddr`)
    pub offered_address: String,
    /// Subnet mask (option 1)
    pub subnet_mask: Option<String>,
    /// Routers in server order (option 3)
    pub routers: Vec<String>,
    /// DNS servers in server order (option 6)
    pub dns_servers: Vec<String>,
    /// Lease time in seconds (option 51)
    pub lease_seconds: Option<u32>,
    /// Vendor class identifier (option 60)
    pub vendor: Option<String>,
}

impl fmt::Display for ServerInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} offers {}", self.id, self.offered_address)?;
        if let Some(mask) = &self.subnet_mask {
            write!(f, "/{}", mask)?;
        }
        if let Some(lease) = self.lease_seconds {
            write!(f, " for {}s", lease)?;
        }
        Ok(())
    }
}
