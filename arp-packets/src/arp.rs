use std::error::Error;
use std::fmt;

pub enum ArpOp {
    Request = 1,
    Reply = 2,
}

pub enum ArpHardwareType {
    Ethernet = 1,
}

const HARDWARE_TYPE_RANGE: (usize, usize) = (0, 2);
const PROTOCOL_TYPE_RANGE: (usize, usize) = (2, 4);
const HARDWARE_ADDR_LEN_RANGE: (usize, usize) = (4, 5);
const PROTOCOL_ADDR_LEN_RANGE: (usize, usize) = (5, 6);
const OPCODE_RANGE: (usize, usize) = (6, 8);

/// Length of the fixed ARP header, before the four variable-length address fields.
pub const ARP_HEADER_LEN: usize = 8;

/// Byte length of an IPv4 protocol address as it appears on the wire.
pub const IPV4_ADDR_LEN: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArpError {
    /// A sender hardware address shorter than 6 bytes was supplied at construction.
    BadHardwareAddr,
    /// A protocol address that is not 4 bytes was supplied at construction.
    BadProtocolAddr,
    /// A declared address length field disagrees with the actual field length at encode.
    LengthMismatch,
    /// The buffer is shorter than the 8-byte fixed header.
    TruncatedHeader,
    /// The buffer is shorter than the total length declared by its own length fields.
    TruncatedBody,
}

impl fmt::Display for ArpError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ArpError::BadHardwareAddr => write!(f, "hardware address must be at least 6 bytes"),
            ArpError::BadProtocolAddr => write!(f, "protocol address must be exactly 4 bytes"),
            ArpError::LengthMismatch => {
                write!(f, "declared address lengths disagree with actual field lengths")
            }
            ArpError::TruncatedHeader => write!(f, "buffer is shorter than the ARP fixed header"),
            ArpError::TruncatedBody => {
                write!(f, "buffer is shorter than its declared address fields")
            }
        }
    }
}

impl Error for ArpError {}

///
/// The packet structure described in RFC 826, with the four variable-length
/// address fields held as owned byte vectors of the declared lengths.
/// https://tools.ietf.org/html/rfc826
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArpMessage {
    pub hardware_type: u16,
    pub protocol_type: u16,
    pub hardware_addr_len: u8,
    pub protocol_addr_len: u8,
    pub operation: u16,
    pub sender_hardware_addr: Vec<u8>,
    pub sender_protocol_addr: Vec<u8>,
    pub target_hardware_addr: Vec<u8>,
    pub target_protocol_addr: Vec<u8>,
}

impl ArpMessage {
    ///
    /// Constructs an Ethernet/IPv4 request asking who holds `target_protocol_addr`.
    /// The target hardware slot is zeroed; it still occupies its bytes on the wire.
    ///
    pub fn request(
        sender_hardware_addr: &[u8],
        sender_protocol_addr: &[u8],
        target_protocol_addr: &[u8],
    ) -> Result<ArpMessage, ArpError> {
        if sender_hardware_addr.len() < 6 {
            return Err(ArpError::BadHardwareAddr);
        }
        if sender_protocol_addr.len() != IPV4_ADDR_LEN
            || target_protocol_addr.len() != IPV4_ADDR_LEN
        {
            return Err(ArpError::BadProtocolAddr);
        }

        Ok(ArpMessage {
            hardware_type: ArpHardwareType::Ethernet as u16,
            protocol_type: crate::IPV4_ETHER_TYPE,
            hardware_addr_len: sender_hardware_addr.len() as u8,
            protocol_addr_len: IPV4_ADDR_LEN as u8,
            operation: ArpOp::Request as u16,
            sender_hardware_addr: sender_hardware_addr.to_vec(),
            sender_protocol_addr: sender_protocol_addr.to_vec(),
            target_hardware_addr: vec![0; sender_hardware_addr.len()],
            target_protocol_addr: target_protocol_addr.to_vec(),
        })
    }

    /// Total wire size: the fixed header plus two hardware and two protocol addresses.
    pub fn encoded_len(&self) -> usize {
        ARP_HEADER_LEN
            + (2 * self.hardware_addr_len as usize)
            + (2 * self.protocol_addr_len as usize)
    }

    pub fn is_reply(&self) -> bool {
        self.operation == ArpOp::Reply as u16
    }

    ///
    /// Serializes the message to its canonical byte layout. The declared length
    /// fields must agree with the actual address field lengths; a disagreement
    /// would produce a corrupt wire image, so it fails instead.
    ///
    pub fn encode(&self) -> Result<Vec<u8>, ArpError> {
        let hlen = self.hardware_addr_len as usize;
        let plen = self.protocol_addr_len as usize;

        if self.sender_hardware_addr.len() != hlen
            || self.target_hardware_addr.len() != hlen
            || self.sender_protocol_addr.len() != plen
            || self.target_protocol_addr.len() != plen
        {
            return Err(ArpError::LengthMismatch);
        }

        let mut bytes = Vec::with_capacity(self.encoded_len());
        bytes.extend(&self.hardware_type.to_be_bytes());
        bytes.extend(&self.protocol_type.to_be_bytes());
        bytes.push(self.hardware_addr_len);
        bytes.push(self.protocol_addr_len);
        bytes.extend(&self.operation.to_be_bytes());
        bytes.extend(&self.sender_hardware_addr);
        bytes.extend(&self.sender_protocol_addr);
        bytes.extend(&self.target_hardware_addr);
        bytes.extend(&self.target_protocol_addr);
        Ok(bytes)
    }

    ///
    /// Deserializes a message, slicing the address fields at the offsets dictated
    /// by the in-message length fields. Every slice is bounded against the buffer,
    /// so a frame that lies about its lengths is rejected rather than read past.
    /// The returned address vectors are independent copies of the input.
    ///
    pub fn decode(bytes: &[u8]) -> Result<ArpMessage, ArpError> {
        if bytes.len() < ARP_HEADER_LEN {
            return Err(ArpError::TruncatedHeader);
        }

        let hardware_addr_len = bytes[HARDWARE_ADDR_LEN_RANGE.0];
        let protocol_addr_len = bytes[PROTOCOL_ADDR_LEN_RANGE.0];
        let hlen = hardware_addr_len as usize;
        let plen = protocol_addr_len as usize;

        if bytes.len() < ARP_HEADER_LEN + (2 * hlen) + (2 * plen) {
            return Err(ArpError::TruncatedBody);
        }

        let sender_hardware_range = (ARP_HEADER_LEN, ARP_HEADER_LEN + hlen);
        let sender_protocol_range = (sender_hardware_range.1, sender_hardware_range.1 + plen);
        let target_hardware_range = (sender_protocol_range.1, sender_protocol_range.1 + hlen);
        let target_protocol_range = (target_hardware_range.1, target_hardware_range.1 + plen);

        Ok(ArpMessage {
            hardware_type: be_u16(bytes, HARDWARE_TYPE_RANGE),
            protocol_type: be_u16(bytes, PROTOCOL_TYPE_RANGE),
            hardware_addr_len,
            protocol_addr_len,
            operation: be_u16(bytes, OPCODE_RANGE),
            sender_hardware_addr: bytes[sender_hardware_range.0..sender_hardware_range.1].to_vec(),
            sender_protocol_addr: bytes[sender_protocol_range.0..sender_protocol_range.1].to_vec(),
            target_hardware_addr: bytes[target_hardware_range.0..target_hardware_range.1].to_vec(),
            target_protocol_addr: bytes[target_protocol_range.0..target_protocol_range.1].to_vec(),
        })
    }
}

fn be_u16(bytes: &[u8], range: (usize, usize)) -> u16 {
    use std::convert::TryInto;
    u16::from_be_bytes(bytes[range.0..range.1].try_into().unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(hlen: u8, plen: u8) -> ArpMessage {
        ArpMessage {
            hardware_type: ArpHardwareType::Ethernet as u16,
            protocol_type: crate::IPV4_ETHER_TYPE,
            hardware_addr_len: hlen,
            protocol_addr_len: plen,
            operation: ArpOp::Reply as u16,
            sender_hardware_addr: (0..hlen).collect(),
            sender_protocol_addr: (0..plen).map(|b| b.wrapping_add(0x10)).collect(),
            target_hardware_addr: (0..hlen).map(|b| b.wrapping_add(0x20)).collect(),
            target_protocol_addr: (0..plen).map(|b| b.wrapping_add(0x30)).collect(),
        }
    }

    #[test]
    fn round_trip_over_address_lengths() {
        for &hlen in &[1u8, 6, 8] {
            for &plen in &[4u8, 16] {
                let m = message(hlen, plen);
                let bytes = m.encode().unwrap();
                assert_eq!(bytes.len(), m.encoded_len());
                assert_eq!(ArpMessage::decode(&bytes).unwrap(), m);
            }
        }
    }

    #[test]
    fn encoded_len_matches_length_fields() {
        for &(hlen, plen) in &[(1u8, 4u8), (6, 4), (8, 16)] {
            let m = message(hlen, plen);
            let bytes = m.encode().unwrap();
            assert_eq!(
                bytes.len(),
                8 + (2 * hlen as usize) + (2 * plen as usize)
            );
        }
    }

    #[test]
    fn request_scenario_encodes_to_28_bytes() {
        let request = ArpMessage::request(
            &[0x02, 0, 0, 0, 0, 0x01],
            &[10, 0, 0, 5],
            &[10, 0, 0, 1],
        )
        .unwrap();
        assert_eq!(request.hardware_type, 1);
        assert_eq!(request.protocol_type, 0x0800);
        assert_eq!(request.hardware_addr_len, 6);
        assert_eq!(request.protocol_addr_len, 4);
        assert_eq!(request.operation, ArpOp::Request as u16);
        assert_eq!(request.target_hardware_addr, vec![0; 6]);

        let bytes = request.encode().unwrap();
        assert_eq!(bytes.len(), 28);
        assert_eq!(
            bytes,
            vec![
                0x00, 0x01, 0x08, 0x00, 6, 4, 0x00, 0x01, // fixed header
                0x02, 0, 0, 0, 0, 0x01, // sender hardware
                10, 0, 0, 5, // sender protocol
                0, 0, 0, 0, 0, 0, // target hardware
                10, 0, 0, 1, // target protocol
            ]
        );
        assert_eq!(ArpMessage::decode(&bytes).unwrap(), request);
    }

    #[test]
    fn construction_validates_address_lengths() {
        assert_eq!(
            ArpMessage::request(&[1, 2, 3], &[10, 0, 0, 5], &[10, 0, 0, 1]),
            Err(ArpError::BadHardwareAddr)
        );
        assert_eq!(
            ArpMessage::request(&[1, 2, 3, 4, 5, 6], &[10, 0, 0], &[10, 0, 0, 1]),
            Err(ArpError::BadProtocolAddr)
        );
        assert_eq!(
            ArpMessage::request(
                &[1, 2, 3, 4, 5, 6],
                &[10, 0, 0, 5],
                &[0xfe, 0x80, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            ),
            Err(ArpError::BadProtocolAddr)
        );
    }

    #[test]
    fn encode_rejects_length_mismatch() {
        let mut m = message(6, 4);
        m.sender_protocol_addr.pop();
        assert_eq!(m.encode(), Err(ArpError::LengthMismatch));
    }

    #[test]
    fn decode_rejects_truncated_header() {
        for len in 0..8 {
            let bytes = vec![0u8; len];
            assert_eq!(ArpMessage::decode(&bytes), Err(ArpError::TruncatedHeader));
        }
    }

    #[test]
    fn decode_rejects_truncated_body() {
        let mut bytes = message(6, 4).encode().unwrap();
        bytes.truncate(27);
        assert_eq!(ArpMessage::decode(&bytes), Err(ArpError::TruncatedBody));

        // A header whose length fields claim more data than the buffer holds.
        let lying_header = vec![0x00, 0x01, 0x08, 0x00, 0xff, 0xff, 0x00, 0x02];
        assert_eq!(
            ArpMessage::decode(&lying_header),
            Err(ArpError::TruncatedBody)
        );
    }

    #[test]
    fn decoded_addresses_are_independent_copies() {
        let mut bytes = message(6, 4).encode().unwrap();
        let decoded = ArpMessage::decode(&bytes).unwrap();
        let sender_before = decoded.sender_hardware_addr.clone();
        for b in bytes.iter_mut() {
            *b = 0xff;
        }
        assert_eq!(decoded.sender_hardware_addr, sender_before);
    }
}
