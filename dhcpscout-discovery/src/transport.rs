//! Send/collect seam between the orchestrator and the network

use dhcpscout_core::Result;
use std::net::Ipv4Addr;
use std::time::Duration;

/// One datagram received while collecting replies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReply {
    /// UDP payload
    pub payload: Vec<u8>,
    /// Source address of the datagram
    pub sender: Ipv4Addr,
}

impl RawReply {
    pub fn new(payload: Vec<u8>, sender: Ipv4Addr) -> Self {
        Self { payload, sender }
    }
}

/// Broadcasts a DISCOVER and gathers whatever comes back
pub trait Transport {
    /// Send `discover` once, then collect datagrams until `timeout` elapses
    /// or `max_responses` have arrived
    ///
    /// Datagrams are returned unparsed and in arrival order. Running out of
    /// time is not an error.
    fn send_and_collect(
        &self,
        discover: &[u8],
        timeout: Duration,
        max_responses: usize,
        interface_name: Option<&str>,
    ) -> Result<Vec<RawReply>>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send_and_collect(
        &self,
        discover: &[u8],
        timeout: Duration,
        max_responses: usize,
        interface_name: Option<&str>,
    ) -> Result<Vec<RawReply>> {
        (**self).send_and_collect(discover, timeout, max_responses, interface_name)
    }
}
