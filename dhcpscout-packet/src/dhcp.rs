//! DHCP packet building and parsing
//!
//! This module builds the DHCPDISCOVER datagram sent by dhcpscout and
//! parses the BOOTREPLY datagrams servers send back (RFC 2131, RFC 2132).
//! Replies arrive from the network and are treated as untrusted: every
//! read is bounds-checked and a malformed packet is rejected or cut
//! short, never a panic.

use crate::wire::{
    append_u16, append_u32, append_u8, byte_at, format_ipv4, format_ipv4_list, read_ipv4,
    read_u16_be, read_u32_be,
};
use dhcpscout_core::MacAddr;
use std::collections::BTreeMap;
use std::fmt;
use std::net::Ipv4Addr;

/// DHCP magic cookie value (0x63825363)
pub const DHCP_MAGIC_COOKIE: u32 = 0x63825363;

/// DHCP server port
pub const DHCP_SERVER_PORT: u16 = 67;

/// DHCP client port
pub const DHCP_CLIENT_PORT: u16 = 68;

/// Broadcast flag value
pub const DHCP_BROADCAST_FLAG: u16 = 0x8000;

/// BOOTREQUEST opcode
pub const BOOTREQUEST: u8 = 1;

/// BOOTREPLY opcode
pub const BOOTREPLY: u8 = 2;

/// Ethernet hardware type
pub const HTYPE_ETHERNET: u8 = 1;

/// Ethernet hardware address length
pub const HLEN_ETHERNET: u8 = 6;

/// Size of the fixed BOOTP header
pub const BOOTP_HEADER_LEN: usize = 236;

/// Fixed header plus magic cookie; anything shorter is not a DHCP reply
pub const MIN_REPLY_LEN: usize = BOOTP_HEADER_LEN + 4;

/// Longest hostname carried in option 12
pub const MAX_HOSTNAME_LEN: usize = 63;

/// Options requested from servers in the parameter request list
pub const REQUESTED_PARAMETERS: [u8; 3] = [
    OptionCode::SubnetMask as u8,
    OptionCode::Router as u8,
    OptionCode::DnsServer as u8,
];

const SNAME_LEN: usize = 64;
const FILE_LEN: usize = 128;
const CHADDR_LEN: usize = 16;

/// DHCP Message Types (RFC 2132)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DhcpMessageType {
    Discover = 1,
    Offer = 2,
    Request = 3,
    Decline = 4,
    Ack = 5,
    Nak = 6,
    Release = 7,
    Inform = 8,
}

impl DhcpMessageType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(DhcpMessageType::Discover),
            2 => Some(DhcpMessageType::Offer),
            3 => Some(DhcpMessageType::Request),
            4 => Some(DhcpMessageType::Decline),
            5 => Some(DhcpMessageType::Ack),
            6 => Some(DhcpMessageType::Nak),
            7 => Some(DhcpMessageType::Release),
            8 => Some(DhcpMessageType::Inform),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DhcpMessageType::Discover => "DISCOVER",
            DhcpMessageType::Offer => "OFFER",
            DhcpMessageType::Request => "REQUEST",
            DhcpMessageType::Decline => "DECLINE",
            DhcpMessageType::Ack => "ACK",
            DhcpMessageType::Nak => "NAK",
            DhcpMessageType::Release => "RELEASE",
            DhcpMessageType::Inform => "INFORM",
        }
    }
}

impl fmt::Display for DhcpMessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// DHCP Option Codes used by dhcpscout (RFC 2132)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionCode {
    Pad = 0,
    SubnetMask = 1,
    Router = 3,
    DnsServer = 6,
    Hostname = 12,
    LeaseTime = 51,
    MessageType = 53,
    ServerId = 54,
    ParameterRequestList = 55,
    VendorClassId = 60,
    End = 255,
}

/// Fixed BOOTP header fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootpHeader {
    /// Message op code (1 = BOOTREQUEST, 2 = BOOTREPLY)
    pub op: u8,
    /// Hardware address type (1 = Ethernet)
    pub htype: u8,
    /// Hardware address length (6 for Ethernet)
    pub hlen: u8,
    pub hops: u8,
    /// Transaction ID
    pub xid: u32,
    pub secs: u16,
    /// Flags (broadcast bit)
    pub flags: u16,
    pub ciaddr: Ipv4Addr,
    /// Your (client) IP address
    pub yiaddr: Ipv4Addr,
    pub siaddr: Ipv4Addr,
    pub giaddr: Ipv4Addr,
    /// Client hardware address, zero padded
    pub chaddr: [u8; CHADDR_LEN],
}

impl BootpHeader {
    /// Decode the fixed header, or `None` if fewer than 236 bytes are present
    pub fn decode(data: &[u8]) -> Option<Self> {
        if data.len() < BOOTP_HEADER_LEN {
            return None;
        }

        let addr_at = |index: usize| data.get(index..index + 4).and_then(read_ipv4);

        Some(Self {
            op: byte_at(data, 0)?,
            htype: byte_at(data, 1)?,
            hlen: byte_at(data, 2)?,
            hops: byte_at(data, 3)?,
            xid: read_u32_be(data, 4)?,
            secs: read_u16_be(data, 8)?,
            flags: read_u16_be(data, 10)?,
            ciaddr: addr_at(12)?,
            yiaddr: addr_at(16)?,
            siaddr: addr_at(20)?,
            giaddr: addr_at(24)?,
            chaddr: data.get(28..28 + CHADDR_LEN)?.try_into().ok()?,
        })
    }

    /// First `hlen` bytes of `chaddr`, capped at the field size
    pub fn client_hardware_address(&self) -> &[u8] {
        let len = usize::from(self.hlen).min(CHADDR_LEN);
        &self.chaddr[..len]
    }
}

/// Build a DHCPDISCOVER payload
///
/// # Arguments
/// * `mac` - Client hardware address placed in `chaddr`
/// * `xid` - Transaction ID servers echo back
/// * `hostname` - Optional hostname for option 12; non-ASCII characters are
///   dropped and the result is truncated to 63 bytes
///
/// # Returns
/// The UDP payload: 236-byte header, magic cookie and options
pub fn build_discover(mac: MacAddr, xid: u32, hostname: Option<&str>) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(300);

    // Fixed header (236 bytes)
    append_u8(&mut bytes, BOOTREQUEST);
    append_u8(&mut bytes, HTYPE_ETHERNET);
    append_u8(&mut bytes, HLEN_ETHERNET);
    append_u8(&mut bytes, 0); // hops
    append_u32(&mut bytes, xid);
    append_u16(&mut bytes, 0); // secs
    append_u16(&mut bytes, DHCP_BROADCAST_FLAG);
    for _ in 0..4 {
        // ciaddr, yiaddr, siaddr, giaddr
        append_u32(&mut bytes, 0);
    }
    bytes.extend_from_slice(mac.as_bytes());
    bytes.resize(bytes.len() + CHADDR_LEN - 6, 0);
    bytes.resize(bytes.len() + SNAME_LEN + FILE_LEN, 0);
    debug_assert_eq!(bytes.len(), BOOTP_HEADER_LEN);

    append_u32(&mut bytes, DHCP_MAGIC_COOKIE);

    append_option(
        &mut bytes,
        OptionCode::MessageType,
        &[DhcpMessageType::Discover as u8],
    );

    let hostname = hostname.map(encode_hostname).unwrap_or_default();
    if !hostname.is_empty() {
        append_option(&mut bytes, OptionCode::Hostname, &hostname);
    }

    append_option(
        &mut bytes,
        OptionCode::ParameterRequestList,
        &REQUESTED_PARAMETERS,
    );
    append_u8(&mut bytes, OptionCode::End as u8);

    bytes
}

fn append_option(buf: &mut Vec<u8>, code: OptionCode, value: &[u8]) {
    append_u8(buf, code as u8);
    append_u8(buf, value.len() as u8);
    buf.extend_from_slice(value);
}

/// ASCII bytes of `name`, other characters dropped, at most 63 bytes
pub fn encode_hostname(name: &str) -> Vec<u8> {
    name.bytes()
        .filter(u8::is_ascii)
        .take(MAX_HOSTNAME_LEN)
        .collect()
}

/// Reason a datagram was not accepted as a DHCP reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyRejection {
    /// Fewer than 240 bytes
    TooShort(usize),
    /// `op` is not BOOTREPLY
    NotBootReply(u8),
    /// Hardware type/length is not Ethernet
    UnsupportedHardware { htype: u8, hlen: u8 },
}

impl fmt::Display for ReplyRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplyRejection::TooShort(len) => {
                write!(f, "too short: {} bytes (minimum {})", len, MIN_REPLY_LEN)
            }
            ReplyRejection::NotBootReply(op) => write!(f, "op {} is not BOOTREPLY", op),
            ReplyRejection::UnsupportedHardware { htype, hlen } => {
                write!(f, "unsupported hardware type {} / length {}", htype, hlen)
            }
        }
    }
}

/// A parsed BOOTREPLY
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DhcpReply {
    /// Transaction ID echoed by the server
    pub xid: u32,
    /// Option 53, when it is present and exactly one byte long
    pub message_type: Option<u8>,
    /// `yiaddr` as dotted-quad text
    pub offered_address: String,
    /// Option values keyed by tag
    pub options: BTreeMap<u8, Vec<u8>>,
}

impl DhcpReply {
    /// Raw value of an option
    pub fn option(&self, code: OptionCode) -> Option<&[u8]> {
        self.options.get(&(code as u8)).map(Vec::as_slice)
    }

    /// Decoded message type, if option 53 holds a known value
    pub fn message_kind(&self) -> Option<DhcpMessageType> {
        self.message_type.and_then(DhcpMessageType::from_u8)
    }

    /// True when option 53 is absent, or is exactly one byte equal to OFFER or ACK
    pub fn is_offer_or_ack(&self) -> bool {
        if self.option(OptionCode::MessageType).is_none() {
            return true;
        }
        matches!(
            self.message_kind(),
            Some(DhcpMessageType::Offer | DhcpMessageType::Ack)
        )
    }

    /// Subnet mask (option 1)
    pub fn subnet_mask(&self) -> Option<String> {
        self.option(OptionCode::SubnetMask).and_then(format_ipv4)
    }

    /// Routers (option 3)
    pub fn routers(&self) -> Vec<String> {
        self.option(OptionCode::Router)
            .map(format_ipv4_list)
            .unwrap_or_default()
    }

    /// DNS servers (option 6)
    pub fn dns_servers(&self) -> Vec<String> {
        self.option(OptionCode::DnsServer)
            .map(format_ipv4_list)
            .unwrap_or_default()
    }

    /// Lease time (option 51); only a 4-byte value is accepted
    pub fn lease_seconds(&self) -> Option<u32> {
        self.option(OptionCode::LeaseTime)
            .filter(|value| value.len() == 4)
            .and_then(|value| read_u32_be(value, 0))
    }

    /// Server identifier (option 54); only a 4-byte value is accepted
    pub fn server_identifier(&self) -> Option<String> {
        self.option(OptionCode::ServerId).and_then(format_ipv4)
    }

    /// Vendor class identifier (option 60); empty values count as absent
    pub fn vendor_class(&self) -> Option<String> {
        self.option(OptionCode::VendorClassId)
            .filter(|value| !value.is_empty())
            .map(|value| String::from_utf8_lossy(value).into_owned())
    }
}

/// Parse a candidate reply datagram
///
/// Returns `None` for anything that is not an Ethernet BOOTREPLY of at
/// least 240 bytes.
pub fn parse_reply(payload: &[u8]) -> Option<DhcpReply> {
    decode_reply(payload).ok()
}

/// Parse a candidate reply datagram, reporting why it was rejected
pub fn decode_reply(payload: &[u8]) -> Result<DhcpReply, ReplyRejection> {
    if payload.len() < MIN_REPLY_LEN {
        return Err(ReplyRejection::TooShort(payload.len()));
    }

    let header =
        BootpHeader::decode(payload).ok_or(ReplyRejection::TooShort(payload.len()))?;

    if header.op != BOOTREPLY {
        return Err(ReplyRejection::NotBootReply(header.op));
    }
    if header.htype != HTYPE_ETHERNET || header.hlen != HLEN_ETHERNET {
        return Err(ReplyRejection::UnsupportedHardware {
            htype: header.htype,
            hlen: header.hlen,
        });
    }

    let options = find_options_start(payload)
        .and_then(|start| payload.get(start..))
        .map(parse_options)
        .unwrap_or_default();

    let message_type = match options.get(&(OptionCode::MessageType as u8)).map(Vec::as_slice) {
        Some([kind]) => Some(*kind),
        _ => None,
    };

    Ok(DhcpReply {
        xid: header.xid,
        message_type,
        offered_address: header.yiaddr.to_string(),
        options,
    })
}

/// Offset just past the magic cookie
///
/// The standard position (236) is checked first; otherwise the first
/// occurrence anywhere in the payload is used.
fn find_options_start(payload: &[u8]) -> Option<usize> {
    if read_u32_be(payload, BOOTP_HEADER_LEN) == Some(DHCP_MAGIC_COOKIE) {
        return Some(MIN_REPLY_LEN);
    }

    let cookie = DHCP_MAGIC_COOKIE.to_be_bytes();
    payload
        .windows(cookie.len())
        .position(|window| window == cookie)
        .map(|index| index + cookie.len())
}

/// Parse a TLV option stream
///
/// Stops at End, at the end of the data, or at the first option whose
/// length runs past the data; options parsed before that point are kept.
/// A tag that appears more than once has its values concatenated
/// (RFC 3396).
pub fn parse_options(data: &[u8]) -> BTreeMap<u8, Vec<u8>> {
    let mut options: BTreeMap<u8, Vec<u8>> = BTreeMap::new();
    let mut offset = 0;

    while let Some(code) = byte_at(data, offset) {
        offset += 1;

        if code == OptionCode::Pad as u8 {
            continue;
        }
        if code == OptionCode::End as u8 {
            break;
        }

        let Some(length) = byte_at(data, offset) else {
            break;
        };
        offset += 1;

        let end = offset + usize::from(length);
        let Some(value) = data.get(offset..end) else {
            break;
        };
        options.entry(code).or_default().extend_from_slice(value);
        offset = end;
    }

    options
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAC: MacAddr = MacAddr::new([0x11, 0x22, 0x33, 0x44, 0x55, 0x66]);

    /// BOOTREPLY with the cookie at the standard offset
    struct ReplyBuilder {
        bytes: Vec<u8>,
    }

    impl ReplyBuilder {
        fn new(xid: u32, yiaddr: [u8; 4]) -> Self {
            let mut bytes = vec![0u8; BOOTP_HEADER_LEN];
            bytes[0] = BOOTREPLY;
            bytes[1] = HTYPE_ETHERNET;
            bytes[2] = HLEN_ETHERNET;
            bytes[4..8].copy_from_slice(&xid.to_be_bytes());
            bytes[16..20].copy_from_slice(&yiaddr);
            bytes[28..34].copy_from_slice(MAC.as_bytes());
            bytes.extend_from_slice(&DHCP_MAGIC_COOKIE.to_be_bytes());
            Self { bytes }
        }

        fn option(mut self, code: u8, value: &[u8]) -> Self {
            self.bytes.push(code);
            self.bytes.push(value.len() as u8);
            self.bytes.extend_from_slice(value);
            self
        }

        fn build(mut self) -> Vec<u8> {
            self.bytes.push(255);
            self.bytes
        }
    }

    #[test]
    fn test_dhcp_constants() {
        assert_eq!(DHCP_MAGIC_COOKIE, 0x63825363);
        assert_eq!(DHCP_SERVER_PORT, 67);
        assert_eq!(DHCP_CLIENT_PORT, 68);
        assert_eq!(DHCP_BROADCAST_FLAG, 0x8000);
        assert_eq!(MIN_REPLY_LEN, 240);
    }

    #[test]
    fn test_message_type_conversion() {
        assert_eq!(DhcpMessageType::from_u8(1), Some(DhcpMessageType::Discover));
        assert_eq!(DhcpMessageType::from_u8(2), Some(DhcpMessageType::Offer));
        assert_eq!(DhcpMessageType::from_u8(5), Some(DhcpMessageType::Ack));
        assert_eq!(DhcpMessageType::from_u8(99), None);
        assert_eq!(DhcpMessageType::Offer.to_string(), "OFFER");
    }

    #[test]
    fn test_build_discover_layout() {
        let bytes = build_discover(MAC, 0x12345678, Some("scout"));

        assert_eq!(&bytes[0..4], &[BOOTREQUEST, HTYPE_ETHERNET, HLEN_ETHERNET, 0]);
        assert_eq!(&bytes[4..8], &[0x12, 0x34, 0x56, 0x78]);
        assert_eq!(&bytes[8..10], &[0, 0]);
        assert_eq!(&bytes[10..12], &[0x80, 0x00]);
        assert!(bytes[12..28].iter().all(|&b| b == 0));
        assert_eq!(&bytes[28..34], MAC.as_bytes());
        assert!(bytes[34..BOOTP_HEADER_LEN].iter().all(|&b| b == 0));
        assert_eq!(&bytes[236..240], &[0x63, 0x82, 0x53, 0x63]);

        let expected: Vec<u8> = vec![
            53, 1, 1, // DISCOVER
            12, 5, b's', b'c', b'o', b'u', b't', // hostname
            55, 3, 1, 3, 6, // parameter request list
            255,
        ];
        assert_eq!(bytes[240..].to_vec(), expected);
    }

    #[test]
    fn test_build_discover_hostname_option() {
        let omitted = build_discover(MAC, 1, None);
        assert!(!parse_options(&omitted[240..]).contains_key(&12));

        let empty = build_discover(MAC, 1, Some(""));
        assert!(!parse_options(&empty[240..]).contains_key(&12));

        let non_ascii = build_discover(MAC, 1, Some("h\u{e9}\u{e9}"));
        let options = parse_options(&non_ascii[240..]);
        assert_eq!(options.get(&12), Some(&b"h".to_vec()));
        assert_eq!(options.get(&53), Some(&vec![1]));
        assert_eq!(options.get(&55), Some(&vec![1, 3, 6]));
    }

    #[test]
    fn test_encode_hostname() {
        assert_eq!(encode_hostname("scout"), b"scout".to_vec());
        assert_eq!(encode_hostname("caf\u{e9}-1"), b"caf-1".to_vec());
        assert!(encode_hostname("\u{1f600}").is_empty());

        let long = "a".repeat(100);
        assert_eq!(encode_hostname(&long).len(), MAX_HOSTNAME_LEN);
    }

    #[test]
    fn test_discover_header_round_trip() {
        let macs = [
            MAC,
            MacAddr::new([0x02, 0, 0, 0, 0, 0x01]),
            MacAddr::new([0xff; 6]),
        ];
        let xids = [0u32, 1, 0x63825363, 0xdeadbeef, u32::MAX];

        for mac in macs {
            for xid in xids {
                let bytes = build_discover(mac, xid, Some("round-trip"));
                let header = BootpHeader::decode(&bytes).unwrap();
                assert_eq!(header.op, BOOTREQUEST);
                assert_eq!(header.htype, HTYPE_ETHERNET);
                assert_eq!(header.hlen, HLEN_ETHERNET);
                assert_eq!(header.xid, xid);
                assert_eq!(header.flags, DHCP_BROADCAST_FLAG);
                assert_eq!(header.client_hardware_address(), mac.as_bytes());
                assert_eq!(&header.chaddr[6..], &[0u8; 10]);
            }
        }
    }

    #[test]
    fn test_parse_rejects_short_payloads() {
        let full = ReplyBuilder::new(7, [10, 0, 0, 5]).option(53, &[2]).build();
        for len in 0..MIN_REPLY_LEN {
            assert_eq!(parse_reply(&full[..len]), None);
            assert_eq!(decode_reply(&full[..len]), Err(ReplyRejection::TooShort(len)));
        }
    }

    #[test]
    fn test_parse_rejects_wrong_header() {
        let mut request = ReplyBuilder::new(7, [10, 0, 0, 5]).build();
        request[0] = BOOTREQUEST;
        assert_eq!(decode_reply(&request), Err(ReplyRejection::NotBootReply(1)));

        let mut token_ring = ReplyBuilder::new(7, [10, 0, 0, 5]).build();
        token_ring[1] = 6;
        assert_eq!(
            decode_reply(&token_ring),
            Err(ReplyRejection::UnsupportedHardware { htype: 6, hlen: 6 })
        );

        let mut long_hw = ReplyBuilder::new(7, [10, 0, 0, 5]).build();
        long_hw[2] = 8;
        assert!(parse_reply(&long_hw).is_none());
    }

    #[test]
    fn test_parse_offer() {
        let bytes = ReplyBuilder::new(0xcafe0001, [192, 168, 1, 50])
            .option(53, &[2])
            .option(54, &[192, 168, 1, 1])
            .option(1, &[255, 255, 255, 0])
            .option(3, &[192, 168, 1, 1])
            .option(6, &[8, 8, 8, 8])
            .option(51, &[0x00, 0x01, 0x51, 0x80])
            .option(60, b"MSFT 5.0")
            .build();

        let reply = parse_reply(&bytes).unwrap();
        assert_eq!(reply.xid, 0xcafe0001);
        assert_eq!(reply.message_type, Some(2));
        assert_eq!(reply.message_kind(), Some(DhcpMessageType::Offer));
        assert!(reply.is_offer_or_ack());
        assert_eq!(reply.offered_address, "192.168.1.50");
        assert_eq!(reply.server_identifier().as_deref(), Some("192.168.1.1"));
        assert_eq!(reply.subnet_mask().as_deref(), Some("255.255.255.0"));
        assert_eq!(reply.routers(), vec!["192.168.1.1"]);
        assert_eq!(reply.dns_servers(), vec!["8.8.8.8"]);
        assert_eq!(reply.lease_seconds(), Some(86400));
        assert_eq!(reply.vendor_class().as_deref(), Some("MSFT 5.0"));
    }

    #[test]
    fn test_parse_router_list_and_lease() {
        let bytes = ReplyBuilder::new(1, [10, 0, 0, 9])
            .option(3, &[10, 0, 0, 1, 10, 0, 0, 2])
            .option(51, &[0, 0, 14, 16])
            .build();
        let reply = parse_reply(&bytes).unwrap();
        assert_eq!(reply.routers(), vec!["10.0.0.1", "10.0.0.2"]);
        assert_eq!(reply.lease_seconds(), Some(3600));
        assert_eq!(reply.message_type, None);
        assert!(reply.is_offer_or_ack());
    }

    #[test]
    fn test_malformed_option_values() {
        let bytes = ReplyBuilder::new(1, [10, 0, 0, 9])
            .option(1, &[255, 255, 0])
            .option(51, &[0, 0, 14])
            .option(54, &[10, 0, 0, 1, 0])
            .option(60, &[])
            .build();
        let reply = parse_reply(&bytes).unwrap();
        assert_eq!(reply.subnet_mask(), None);
        assert_eq!(reply.lease_seconds(), None);
        assert_eq!(reply.server_identifier(), None);
        assert_eq!(reply.vendor_class(), None);
    }

    #[test]
    fn test_message_type_filter() {
        for (value, accepted) in [(1u8, false), (2, true), (3, false), (5, true), (6, false)] {
            let bytes = ReplyBuilder::new(1, [10, 0, 0, 9]).option(53, &[value]).build();
            let reply = parse_reply(&bytes).unwrap();
            assert_eq!(reply.is_offer_or_ack(), accepted, "message type {}", value);
        }

        let empty = ReplyBuilder::new(1, [10, 0, 0, 9]).option(53, &[]).build();
        assert!(!parse_reply(&empty).unwrap().is_offer_or_ack());
    }

    #[test]
    fn test_multi_byte_message_type_has_no_kind() {
        let bytes = ReplyBuilder::new(1, [10, 0, 0, 9]).option(53, &[2, 0]).build();
        let reply = parse_reply(&bytes).unwrap();

        assert_eq!(reply.option(OptionCode::MessageType), Some(&[2u8, 0][..]));
        assert_eq!(reply.message_type, None);
        assert_eq!(reply.message_kind(), None);
        assert!(!reply.is_offer_or_ack());
    }

    #[test]
    fn test_parse_options_padding_and_end() {
        let data = [0, 0, 53, 1, 2, 0, 255, 1, 4, 255, 255, 255, 0];
        let options = parse_options(&data);
        assert_eq!(options.len(), 1);
        assert_eq!(options.get(&53), Some(&vec![2]));
    }

    #[test]
    fn test_parse_options_truncated() {
        // Option 6 claims 8 bytes but only 4 follow
        let data = [53, 1, 5, 6, 8, 8, 8, 8, 8];
        let options = parse_options(&data);
        assert_eq!(options.get(&53), Some(&vec![5]));
        assert!(!options.contains_key(&6));

        // Tag with no length byte
        let data = [53, 1, 2, 3];
        let options = parse_options(&data);
        assert_eq!(options.len(), 1);
    }

    #[test]
    fn test_parse_options_without_end() {
        let data = [53, 1, 2, 54, 4, 10, 0, 0, 1];
        let options = parse_options(&data);
        assert_eq!(options.get(&54), Some(&vec![10, 0, 0, 1]));
    }

    #[test]
    fn test_parse_options_concatenates_repeated_tags() {
        let data = [6, 4, 8, 8, 8, 8, 6, 4, 1, 1, 1, 1, 255];
        let options = parse_options(&data);
        assert_eq!(options.get(&6), Some(&vec![8, 8, 8, 8, 1, 1, 1, 1]));
    }

    #[test]
    fn test_cookie_at_shifted_offset() {
        // Two extra bytes between the header and the cookie
        let mut bytes = ReplyBuilder::new(1, [10, 0, 0, 9]).build();
        bytes.truncate(BOOTP_HEADER_LEN);
        bytes.extend_from_slice(&[0xaa, 0xbb]);
        bytes.extend_from_slice(&DHCP_MAGIC_COOKIE.to_be_bytes());
        bytes.extend_from_slice(&[53, 1, 5, 255]);

        let reply = parse_reply(&bytes).unwrap();
        assert_eq!(reply.message_type, Some(5));
    }

    #[test]
    fn test_missing_cookie_yields_no_options() {
        let mut bytes = ReplyBuilder::new(1, [10, 0, 0, 9]).option(53, &[2]).build();
        bytes[236..240].copy_from_slice(&[0, 0, 0, 0]);

        let reply = parse_reply(&bytes).unwrap();
        assert!(reply.options.is_empty());
        assert_eq!(reply.message_type, None);
        assert_eq!(reply.offered_address, "10.0.0.9");
    }

    #[test]
    fn test_parse_is_idempotent() {
        let bytes = ReplyBuilder::new(42, [172, 16, 0, 10])
            .option(53, &[5])
            .option(54, &[172, 16, 0, 1])
            .build();
        assert_eq!(parse_reply(&bytes), parse_reply(&bytes));
    }

    #[test]
    fn test_parse_own_discover_is_rejected() {
        let bytes = build_discover(MAC, 99, None);
        assert_eq!(decode_reply(&bytes), Err(ReplyRejection::NotBootReply(BOOTREQUEST)));
    }
}
