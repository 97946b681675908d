//! BOOTP/DHCP wire codec for dhcpscout
//!
//! - [`wire`] - network byte order writers and bounds-checked readers
//! - [`dhcp`] - DHCPDISCOVER construction and BOOTREPLY parsing
//!
//! # Example
//!
//! ```rust
//! use dhcpscout_core::MacAddr;
//! use dhcpscout_packet::{build_discover, parse_reply};
//!
//! let mac = MacAddr::new([0x02, 0x00, 0x00, 0x00, 0x00, 0x01]);
//! let discover = build_discover(mac, 0x1234_5678, Some("scout"));
//! assert_eq!(discover.len(), 240 + 3 + 7 + 5 + 1);
//!
//! // A client's own request is never mistaken for a reply
//! assert!(parse_reply(&discover).is_none());
//! ```

pub mod dhcp;
pub mod wire;

pub use dhcp::{
    build_discover, decode_reply, parse_options, parse_reply, BootpHeader, DhcpMessageType,
    DhcpReply, OptionCode, ReplyRejection, DHCP_CLIENT_PORT, DHCP_MAGIC_COOKIE,
    DHCP_SERVER_PORT, MIN_REPLY_LEN,
};
