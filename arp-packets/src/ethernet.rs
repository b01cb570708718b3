use crate::*;
use std::convert::TryInto;

/// Length of an Ethernet II header:
/// 0                    6                    12                      14
/// |---6 byte Dest_MAC--|---6 byte Src_MAC---|--2 Byte EtherType---|
pub const ETHERNET_HEADER_LEN: usize = 14;

#[derive(Clone, Debug)]
pub struct EthernetFrame {
    pub data: PacketData,
}

impl EthernetFrame {
    pub fn from_buffer(frame: PacketData) -> Result<EthernetFrame, &'static str> {
        // We could support other formats for the frames, but ARP sits atop Ethernet II
        if frame.len() < ETHERNET_HEADER_LEN {
            return Err("Frame is less than the minimum of 14 bytes");
        }

        Ok(EthernetFrame { data: frame })
    }

    /// Returns an empty EthernetFrame where all values all populated to zero. This function
    /// allocates a new array to hold the header.
    pub fn empty() -> EthernetFrame {
        let mut data = vec![];
        data.resize(ETHERNET_HEADER_LEN, 0);
        EthernetFrame::from_buffer(data).unwrap()
    }

    pub fn dest_mac(&self) -> MacAddr {
        MacAddr::from_slice(&self.data[0..6]).unwrap()
    }

    pub fn src_mac(&self) -> MacAddr {
        MacAddr::from_slice(&self.data[6..12]).unwrap()
    }

    pub fn set_dest_mac(&mut self, mac: MacAddr) {
        self.data[..6].copy_from_slice(&mac.bytes[..6]);
    }

    pub fn set_src_mac(&mut self, mac: MacAddr) {
        self.data[6..12].copy_from_slice(&mac.bytes[..6]);
    }

    pub fn ether_type(&self) -> u16 {
        u16::from_be_bytes(self.data[12..=13].try_into().unwrap())
    }

    pub fn set_ether_type(&mut self, ether_type: u16) {
        self.data[12..=13].copy_from_slice(&ether_type.to_be_bytes());
    }

    pub fn payload(&self) -> &[u8] {
        &self.data[ETHERNET_HEADER_LEN..]
    }

    pub fn set_payload(&mut self, payload: &[u8]) {
        self.data.truncate(ETHERNET_HEADER_LEN);
        self.data.reserve_exact(payload.len());
        self.data.extend(payload);
    }

    /// Wraps an encoded ARP message in a frame carrying the ARP ether type.
    pub fn encap_arp(payload: &[u8], src: MacAddr, dest: MacAddr) -> EthernetFrame {
        let mut frame = EthernetFrame::empty();
        frame.set_dest_mac(dest);
        frame.set_src_mac(src);
        frame.set_ether_type(ARP_ETHER_TYPE);
        frame.set_payload(payload);
        frame
    }
}

/// EthernetFrames are considered the same if they carry the same bytes from the
/// start of the layer 2 header onward.
impl PartialEq for EthernetFrame {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Eq for EthernetFrame {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    #[test]
    fn ethernet_frame() {
        let data: Vec<u8> = vec![0xde, 0xad, 0xbe, 0xef, 0xff, 0xff, 1, 2, 3, 4, 5, 6, 0, 0];
        let frame = EthernetFrame::from_buffer(data).unwrap();
        assert_eq!(
            frame.dest_mac(),
            MacAddr::new([0xde, 0xad, 0xbe, 0xef, 0xff, 0xff])
        );
        assert_eq!(frame.src_mac(), MacAddr::new([1, 2, 3, 4, 5, 6]));
        assert_eq!(frame.ether_type(), 0);
        assert_eq!(frame.payload().len(), 0);
    }

    #[test]
    fn set_payload() {
        let data: Vec<u8> = vec![0xde, 0xad, 0xbe, 0xef, 0xff, 0xff, 1, 2, 3, 4, 5, 6, 0, 0];
        let mut frame = EthernetFrame::from_buffer(data).unwrap();
        assert_eq!(frame.ether_type(), 0);
        assert_eq!(frame.payload().len(), 0);

        let new_payload: Vec<u8> = vec![1, 2, 3, 4, 5, 6, 7, 8, 9];
        frame.set_payload(&new_payload);
        assert_eq!(frame.payload(), new_payload.as_slice());
        assert_eq!(frame.payload()[2], 3);
    }

    #[test]
    fn invalid_data_length() {
        let data: Vec<u8> = vec![0xde, 0xad, 0xbe, 0xef, 0xff, 0xff, 1, 2, 3, 4, 5, 6];
        assert!(EthernetFrame::from_buffer(data).is_err());
    }

    #[test]
    fn set_dest_mac() {
        let data: Vec<u8> = vec![0xde, 0xad, 0xbe, 0xef, 0xff, 0xff, 1, 2, 3, 4, 5, 6, 0, 0];
        let mut frame = EthernetFrame::from_buffer(data).unwrap();
        let new_dest = MacAddr::new([0x98, 0x88, 0x18, 0x12, 0xb4, 0xdf]);
        frame.set_dest_mac(new_dest);
        assert_eq!(frame.dest_mac(), new_dest);
    }

    #[test]
    fn set_src_mac() {
        let data: Vec<u8> = vec![0xde, 0xad, 0xbe, 0xef, 0xff, 0xff, 1, 2, 3, 4, 5, 6, 0, 0];
        let mut frame = EthernetFrame::from_buffer(data).unwrap();
        let new_src = MacAddr::new([0x98, 0x88, 0x18, 0x12, 0xb4, 0xdf]);
        frame.set_src_mac(new_src);
        assert_eq!(frame.src_mac(), new_src);
    }

    #[test]
    fn ether_type() {
        let data: Vec<u8> = vec![
            0xde, 0xad, 0xbe, 0xef, 0xff, 0xff, 1, 2, 3, 4, 5, 6, 0xff, 0xff,
        ];
        let frame = EthernetFrame::from_buffer(data).unwrap();
        assert_eq!(frame.ether_type(), 0xffff);
    }

    #[test]
    fn encap_arp() {
        let payload: Vec<u8> = vec![0, 1, 2, 3];
        let src = MacAddr::new([1, 2, 3, 4, 5, 6]);
        let frame = EthernetFrame::encap_arp(&payload, src, MacAddr::BROADCAST);
        assert_eq!(frame.ether_type(), ARP_ETHER_TYPE);
        assert_eq!(frame.src_mac(), src);
        assert!(frame.dest_mac().is_broadcast());
        assert_eq!(frame.payload(), payload.as_slice());
    }
}
