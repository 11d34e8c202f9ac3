//! Ethernet header parsing.

use vbridge_types::MacAddress;

/// Length of a MAC address on the wire.
pub const MAC_LEN: usize = 6;

/// Minimum Ethernet header: two MACs plus the EtherType.
pub const HEADER_LEN: usize = 2 * MAC_LEN + 2;

/// EtherType of IPv6. These frames are dropped without learning,
/// forwarding, or logging.
pub const ETHERTYPE_IPV6: u16 = 0x86DD;

/// Parsed Ethernet header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EthernetHeader {
    pub dst: MacAddress,
    pub src: MacAddress,
    pub ethertype: u16,
}

impl EthernetHeader {
    /// Parses the header from the start of a frame.
    ///
    /// Returns `None` for runts shorter than [`HEADER_LEN`]. The EtherType
    /// is read big-endian; MAC bytes are taken in wire order.
    pub fn parse(frame: &[u8]) -> Option<Self> {
        if frame.len() < HEADER_LEN {
            return None;
        }

        let dst = MacAddress::new(frame[0..MAC_LEN].try_into().ok()?);
        let src = MacAddress::new(frame[MAC_LEN..2 * MAC_LEN].try_into().ok()?);
        let ethertype = u16::from_be_bytes([frame[2 * MAC_LEN], frame[2 * MAC_LEN + 1]]);

        Some(EthernetHeader {
            dst,
            src,
            ethertype,
        })
    }

    /// Returns true for IPv6 frames.
    pub fn is_ipv6(&self) -> bool {
        self.ethertype == ETHERTYPE_IPV6
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn build_frame(dst: [u8; 6], src: [u8; 6], ethertype: u16) -> Vec<u8> {
        let mut frame = Vec::new();
        frame.extend_from_slice(&dst);
        frame.extend_from_slice(&src);
        frame.extend_from_slice(&ethertype.to_be_bytes());
        frame
    }

    #[test]
    fn test_parse() {
        let frame = build_frame(
            [0x02, 0, 0, 0, 0, 0x02],
            [0x02, 0, 0, 0, 0, 0x01],
            0x0800,
        );
        let header = EthernetHeader::parse(&frame).unwrap();
        assert_eq!(header.dst, MacAddress::new([0x02, 0, 0, 0, 0, 0x02]));
        assert_eq!(header.src, MacAddress::new([0x02, 0, 0, 0, 0, 0x01]));
        assert_eq!(header.ethertype, 0x0800);
    }

    #[test]
    fn test_parse_ignores_payload() {
        let mut frame = build_frame([0xff; 6], [0x02, 0, 0, 0, 0, 0x01], 0x0806);
        frame.extend_from_slice(&[0u8; 60]);
        let header = EthernetHeader::parse(&frame).unwrap();
        assert_eq!(header.ethertype, 0x0806);
    }

    #[test]
    fn test_runt_rejected() {
        assert_eq!(EthernetHeader::parse(&[]), None);
        assert_eq!(EthernetHeader::parse(&[0u8; HEADER_LEN - 1]), None);
        assert!(EthernetHeader::parse(&[0u8; HEADER_LEN]).is_some());
    }

    #[test]
    fn test_ethertype_big_endian() {
        let frame = build_frame([0u8; 6], [0u8; 6], ETHERTYPE_IPV6);
        let header = EthernetHeader::parse(&frame).unwrap();
        assert!(header.is_ipv6());
        assert_eq!(frame[12], 0x86);
        assert_eq!(frame[13], 0xdd);
    }
}
