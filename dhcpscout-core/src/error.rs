//! Error types for dhcpscout

use std::io;
use std::net::SocketAddrV4;
use thiserror::Error;

/// Result type alias for dhcpscout operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for dhcpscout
///
/// Every variant is fatal to the query that produced it. Malformed or
/// unrelated replies are never reported here; they are dropped by the parser.
#[derive(Error, Debug)]
pub enum Error {
    /// Binding the client port failed because the process lacks privileges
    #[error("Insufficient privileges to bind {addr}: {source}")]
    PermissionDenied {
        addr: SocketAddrV4,
        #[source]
        source: io::Error,
    },

    /// The UDP socket could not be created or configured
    #[error("Failed to create UDP socket: {0}")]
    SocketCreateFailed(#[source] io::Error),

    /// Binding the socket failed for a reason other than privileges
    #[error("Failed to bind {addr}: {source}")]
    BindFailed {
        addr: SocketAddrV4,
        #[source]
        source: io::Error,
    },

    /// The DHCPDISCOVER datagram could not be sent
    #[error("Failed to send DHCPDISCOVER to {addr}: {source}")]
    SendFailed {
        addr: SocketAddrV4,
        #[source]
        source: io::Error,
    },

    /// Waiting for or reading a reply failed
    #[error("Failed to receive DHCP reply: {0}")]
    ReceiveFailed(#[source] io::Error),

    /// Caller-supplied MAC address text is not 6 hex octets
    #[error("Invalid MAC address '{0}': expected six colon-separated hex octets")]
    InvalidMac(String),

    /// Caller named an interface that could not be found or used
    #[error("Interface '{0}' is not available")]
    InterfaceUnavailable(String),

    /// Invalid query parameter
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// The worker running a blocking query did not complete
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
}

impl Error {
    /// Create an invalid parameter error
    pub fn invalid_parameter<S: Into<String>>(name: S, reason: S) -> Self {
        Error::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Whether the failure is caused by missing privileges rather than a fault
    pub fn is_privilege_error(&self) -> bool {
        matches!(self, Error::PermissionDenied { .. })
    }
}
