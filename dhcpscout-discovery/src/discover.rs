//! Discovery orchestration
//!
//! A query validates its configuration, picks the client MAC, broadcasts one
//! DHCPDISCOVER through a [`Transport`] and reduces the datagrams that come
//! back to one [`ServerInfo`] per distinct server.
//!
//! - Replies whose transaction ID differs from the request are dropped
//! - Replies whose message type is present but not OFFER/ACK are dropped
//! - A later reply from the same server replaces the earlier one
//! - Results are ordered by server ID

use crate::socket::DiscoverySocket;
use crate::transport::{RawReply, Transport};
use dhcpscout_core::{MacAddr, QueryConfig, Result, ServerInfo};
use dhcpscout_iface::{resolve_mac, HostInfo, SystemHost};
use dhcpscout_packet::{build_discover, decode_reply, DhcpReply, OptionCode};
use rand::Rng;
use std::collections::BTreeMap;
use std::net::Ipv4Addr;
use tracing::{debug, info};

/// Server ID used when a reply carries no option 54 and no usable source
pub const UNKNOWN_SERVER_ID: &str = "unknown";

/// A DISCOVER ready to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryRequest {
    pub transaction_id: u32,
    pub mac: MacAddr,
    pub packet: Vec<u8>,
}

impl DiscoveryRequest {
    /// Build a request with a fresh random transaction ID
    pub fn new(mac: MacAddr, hostname: Option<&str>) -> Self {
        Self::with_transaction_id(mac, rand::thread_rng().gen(), hostname)
    }

    pub fn with_transaction_id(mac: MacAddr, transaction_id: u32, hostname: Option<&str>) -> Self {
        Self {
            transaction_id,
            mac,
            packet: build_discover(mac, transaction_id, hostname),
        }
    }
}

/// Runs discovery queries against a host and a transport
#[derive(Debug, Clone, Default)]
pub struct Discoverer<H = SystemHost, T = DiscoverySocket> {
    host: H,
    transport: T,
}

impl Discoverer {
    /// Real interfaces, real broadcast socket
    pub fn system() -> Self {
        Self::default()
    }
}

impl<H: HostInfo, T: Transport> Discoverer<H, T> {
    pub fn new(host: H, transport: T) -> Self {
        Self { host, transport }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Broadcast one DISCOVER and summarize the servers that answered
    ///
    /// # Errors
    /// * `InvalidParameter` / `InvalidMac` - bad configuration, nothing sent
    /// * `InterfaceUnavailable` - the named interface has no hardware address
    /// * socket errors from the transport
    ///
    /// Receiving nothing before the timeout is an empty result, not an error.
    pub fn query(&self, config: &QueryConfig) -> Result<Vec<ServerInfo>> {
        let interface_name = config.interface_name.as_deref();

        let mac = match config.validate()? {
            Some(mac) => mac,
            None => resolve_mac(&self.host, interface_name)?,
        };

        let request = DiscoveryRequest::new(mac, config.hostname.as_deref());

        info!(
            xid = %format!("{:#010x}", request.transaction_id),
            mac = %mac,
            interface = interface_name.unwrap_or("any"),
            timeout_ms = config.timeout.as_millis() as u64,
            "Broadcasting DHCPDISCOVER"
        );

        let replies = self.transport.send_and_collect(
            &request.packet,
            config.timeout,
            config.max_responses,
            interface_name,
        )?;

        let servers = collect_servers(request.transaction_id, &replies);

        info!(
            datagrams = replies.len(),
            servers = servers.len(),
            "Discovery finished"
        );

        Ok(servers)
    }
}

/// Reduce raw datagrams to one entry per server, ordered by server ID
pub fn collect_servers(transaction_id: u32, replies: &[RawReply]) -> Vec<ServerInfo> {
    let mut servers = BTreeMap::new();

    for raw in replies {
        let reply = match decode_reply(&raw.payload) {
            Ok(reply) => reply,
            Err(reason) => {
                debug!("Dropping datagram from {}: {}", raw.sender, reason);
                continue;
            }
        };

        if reply.xid != transaction_id {
            debug!(
                "Dropping reply from {}: xid {:#010x} does not match {:#010x}",
                raw.sender, reply.xid, transaction_id
            );
            continue;
        }

        if !reply.is_offer_or_ack() {
            debug!(
                "Dropping reply from {}: message type {}",
                raw.sender,
                message_type_label(&reply)
            );
            continue;
        }

        let info = server_info(&reply, raw.sender);
        debug!("Accepted reply: {}", info);
        servers.insert(info.id.clone(), info);
    }

    servers.into_values().collect()
}

/// Option 53 by name for log lines
fn message_type_label(reply: &DhcpReply) -> String {
    match (reply.message_kind(), reply.option(OptionCode::MessageType)) {
        (Some(kind), _) => kind.to_string(),
        (None, Some([code])) => format!("unknown ({})", code),
        (None, Some(value)) => format!("malformed ({} bytes)", value.len()),
        (None, None) => "absent".to_string(),
    }
}

/// Summarize one accepted reply
///
/// The ID is option 54 when present, otherwise the datagram's source
/// address, otherwise [`UNKNOWN_SERVER_ID`].
pub fn server_info(reply: &DhcpReply, sender: Ipv4Addr) -> ServerInfo {
    let id = reply
        .server_identifier()
        .or_else(|| (!sender.is_unspecified()).then(|| sender.to_string()))
        .unwrap_or_else(|| UNKNOWN_SERVER_ID.to_string());

    ServerInfo {
        id,
        offered_address: reply.offered_address.clone(),
        subnet_mask: reply.subnet_mask(),
        routers: reply.routers(),
        dns_servers: reply.dns_servers(),
        lease_seconds: reply.lease_seconds(),
        vendor: reply.vendor_class(),
    }
}

/// Run one query on the real system
pub fn query(config: &QueryConfig) -> Result<Vec<ServerInfo>> {
    Discoverer::system().query(config)
}
