//! UDP broadcast socket for DHCP discovery

use crate::transport::{RawReply, Transport};
use dhcpscout_core::{Error, Result};
use dhcpscout_packet::{DHCP_CLIENT_PORT, DHCP_SERVER_PORT};
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4, UdpSocket};
use std::time::{Duration, Instant};
use tracing::debug;

/// Large enough for any UDP payload
const RECV_BUFFER_SIZE: usize = 65_536;

/// Upper bound used when `now + timeout` does not fit in an `Instant`
const MAX_WAIT: Duration = Duration::from_secs(u32::MAX as u64);

/// Sends one DISCOVER from the DHCP client port and polls for replies
///
/// A fresh socket is opened for every call and dropped before the call
/// returns, on success and on every error path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoverySocket {
    bind_addr: SocketAddrV4,
    destination: SocketAddrV4,
}

impl Default for DiscoverySocket {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, DHCP_CLIENT_PORT),
            destination: SocketAddrV4::new(Ipv4Addr::BROADCAST, DHCP_SERVER_PORT),
        }
    }
}

impl DiscoverySocket {
    /// Bind 0.0.0.0:68 and send to 255.255.255.255:67
    pub fn new() -> Self {
        Self::default()
    }

    /// Use non-standard local and destination addresses
    pub fn with_addresses(bind_addr: SocketAddrV4, destination: SocketAddrV4) -> Self {
        Self {
            bind_addr,
            destination,
        }
    }

    pub fn bind_addr(&self) -> SocketAddrV4 {
        self.bind_addr
    }

    pub fn destination(&self) -> SocketAddrV4 {
        self.destination
    }

    fn open(&self, interface_name: Option<&str>) -> Result<UdpSocket> {
        let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))
            .map_err(Error::SocketCreateFailed)?;

        socket
            .set_broadcast(true)
            .map_err(Error::SocketCreateFailed)?;

        socket
            .set_reuse_address(true)
            .map_err(Error::SocketCreateFailed)?;

        if let Some(name) = interface_name {
            bind_to_device(&socket, name, self.bind_addr)?;
        }

        socket
            .bind(&self.bind_addr.into())
            .map_err(|source| bind_error(self.bind_addr, source))?;

        debug!("Bound DHCP client socket to {}", self.bind_addr);
        Ok(socket.into())
    }
}

impl Transport for DiscoverySocket {
    fn send_and_collect(
        &self,
        discover: &[u8],
        timeout: Duration,
        max_responses: usize,
        interface_name: Option<&str>,
    ) -> Result<Vec<RawReply>> {
        let socket = self.open(interface_name)?;

        socket
            .send_to(discover, self.destination)
            .map_err(|source| Error::SendFailed {
                addr: self.destination,
                source,
            })?;
        debug!(
            "Sent {} byte DHCPDISCOVER to {}",
            discover.len(),
            self.destination
        );

        let now = Instant::now();
        let deadline = now
            .checked_add(timeout)
            .unwrap_or_else(|| now + MAX_WAIT);

        collect_replies(&socket, deadline, max_responses)
    }
}

/// Receive datagrams until `deadline` or until `max_responses` have arrived
///
/// Each iteration waits once, for at most the time left before the deadline.
fn collect_replies(
    socket: &UdpSocket,
    deadline: Instant,
    max_responses: usize,
) -> Result<Vec<RawReply>> {
    let mut replies = Vec::new();
    let mut buf = vec![0u8; RECV_BUFFER_SIZE];

    while replies.len() < max_responses {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            debug!("Reply window closed with {} datagrams", replies.len());
            break;
        }

        socket
            .set_read_timeout(Some(remaining))
            .map_err(Error::ReceiveFailed)?;

        match socket.recv_from(&mut buf) {
            Ok((len, SocketAddr::V4(sender))) => {
                debug!("Received {} bytes from {}", len, sender);
                replies.push(RawReply::new(buf[..len].to_vec(), *sender.ip()));
            }
            Ok((_, sender)) => {
                debug!("Ignoring datagram from non-IPv4 sender {}", sender);
            }
            // Timer granularity can end the wait early; the loop head decides
            Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {
                continue
            }
            // Signal delivery; the next iteration recomputes the remaining time
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            // Windows reports ICMP port unreachable from earlier sends this way
            Err(e) if e.kind() == io::ErrorKind::ConnectionReset => continue,
            Err(e) => return Err(Error::ReceiveFailed(e)),
        }
    }

    Ok(replies)
}

fn bind_error(addr: SocketAddrV4, source: io::Error) -> Error {
    if source.kind() == io::ErrorKind::PermissionDenied {
        Error::PermissionDenied { addr, source }
    } else {
        Error::BindFailed { addr, source }
    }
}

#[cfg(any(target_os = "linux", target_os = "android", target_os = "fuchsia"))]
fn bind_to_device(socket: &Socket, name: &str, addr: SocketAddrV4) -> Result<()> {
    socket.bind_device(Some(name.as_bytes())).map_err(|source| {
        if source.kind() == io::ErrorKind::PermissionDenied {
            Error::PermissionDenied { addr, source }
        } else if source.raw_os_error() == Some(libc::ENODEV) {
            Error::InterfaceUnavailable(name.to_string())
        } else {
            Error::BindFailed { addr, source }
        }
    })?;
    debug!("Bound DHCP client socket to device {}", name);
    Ok(())
}

#[cfg(not(any(target_os = "linux", target_os = "android", target_os = "fuchsia")))]
fn bind_to_device(_socket: &Socket, name: &str, _addr: SocketAddrV4) -> Result<()> {
    tracing::warn!(
        "Binding to interface {} is not supported on this platform; sending on all interfaces",
        name
    );
    Ok(())
}
