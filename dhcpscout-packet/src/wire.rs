//! Network byte order helpers
//!
//! Writers append to a growable buffer and cannot fail. Readers take
//! untrusted input and return `None` instead of panicking when the
//! requested bytes are not there.

use bytes::BufMut;
use std::net::Ipv4Addr;

/// Append a single byte
pub fn append_u8(buf: &mut Vec<u8>, value: u8) {
    buf.put_u8(value);
}

/// Append a 16-bit value in big-endian order
pub fn append_u16(buf: &mut Vec<u8>, value: u16) {
    buf.put_u16(value);
}

/// Append a 32-bit value in big-endian order
pub fn append_u32(buf: &mut Vec<u8>, value: u32) {
    buf.put_u32(value);
}

/// Byte at `index`, or `None` when out of bounds
pub fn byte_at(buf: &[u8], index: usize) -> Option<u8> {
    buf.get(index).copied()
}

/// Big-endian 16-bit value at `index`, if two full bytes are available
pub fn read_u16_be(buf: &[u8], index: usize) -> Option<u16> {
    let end = index.checked_add(2)?;
    let bytes: [u8; 2] = buf.get(index..end)?.try_into().ok()?;
    Some(u16::from_be_bytes(bytes))
}

/// Big-endian 32-bit value at `index`, if four full bytes are available
pub fn read_u32_be(buf: &[u8], index: usize) -> Option<u32> {
    let end = index.checked_add(4)?;
    let bytes: [u8; 4] = buf.get(index..end)?.try_into().ok()?;
    Some(u32::from_be_bytes(bytes))
}

/// Interpret exactly four bytes as an IPv4 address
pub fn read_ipv4(bytes: &[u8]) -> Option<Ipv4Addr> {
    let octets: [u8; 4] = bytes.try_into().ok()?;
    Some(Ipv4Addr::from(octets))
}

/// Render exactly four bytes as dotted-quad text
pub fn format_ipv4(bytes: &[u8]) -> Option<String> {
    read_ipv4(bytes).map(|addr| addr.to_string())
}

/// Render a list of IPv4 addresses packed back to back
///
/// Trailing bytes that do not form a whole address are ignored.
pub fn format_ipv4_list(bytes: &[u8]) -> Vec<String> {
    bytes
        .chunks_exact(4)
        .filter_map(format_ipv4)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_network_order() {
        let mut buf = Vec::new();
        append_u8(&mut buf, 0x01);
        append_u16(&mut buf, 0x8000);
        append_u32(&mut buf, 0x63825363);
        assert_eq!(buf, vec![0x01, 0x80, 0x00, 0x63, 0x82, 0x53, 0x63]);
    }

    #[test]
    fn test_byte_at_bounds() {
        let buf = [1u8, 2, 3];
        assert_eq!(byte_at(&buf, 0), Some(1));
        assert_eq!(byte_at(&buf, 2), Some(3));
        assert_eq!(byte_at(&buf, 3), None);
        assert_eq!(byte_at(&[], 0), None);
        assert_eq!(byte_at(&buf, usize::MAX), None);
    }

    #[test]
    fn test_read_u32_be() {
        let buf = [0x00, 0x00, 0x0e, 0x10, 0xff];
        assert_eq!(read_u32_be(&buf, 0), Some(3600));
        assert_eq!(read_u32_be(&buf, 1), Some(0x000e10ff));
        assert_eq!(read_u32_be(&buf, 2), None);
        assert_eq!(read_u32_be(&buf, usize::MAX - 1), None);
    }

    #[test]
    fn test_read_u16_be() {
        let buf = [0x80, 0x00];
        assert_eq!(read_u16_be(&buf, 0), Some(0x8000));
        assert_eq!(read_u16_be(&buf, 1), None);
    }

    #[test]
    fn test_format_ipv4() {
        assert_eq!(format_ipv4(&[192, 168, 1, 50]).as_deref(), Some("192.168.1.50"));
        assert_eq!(format_ipv4(&[0, 0, 0, 0]).as_deref(), Some("0.0.0.0"));
        assert_eq!(format_ipv4(&[10, 0, 0]), None);
        assert_eq!(format_ipv4(&[10, 0, 0, 1, 2]), None);
    }

    #[test]
    fn test_format_ipv4_list() {
        let bytes = [10, 0, 0, 1, 10, 0, 0, 2];
        assert_eq!(format_ipv4_list(&bytes), vec!["10.0.0.1", "10.0.0.2"]);

        let ragged = [8, 8, 8, 8, 1, 1];
        assert_eq!(format_ipv4_list(&ragged), vec!["8.8.8.8"]);
        assert!(format_ipv4_list(&[]).is_empty());
    }
}
