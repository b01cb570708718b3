use crate::channel::LinkChannel;
use crate::config::ResolverConfig;
use crate::errors::ResolveError;
use arp_packets::{ArpMessage, EthernetFrame, MacAddr, ARP_ETHER_TYPE};
use log::{debug, info};
use std::net::Ipv4Addr;
use std::time::Instant;

/// An Ethernet/IPv4 ARP frame is 42 bytes; this leaves headroom for padded
/// frames and non-Ethernet address lengths.
const RECV_BUF_LEN: usize = 128;

///
/// Performs one ARP request/reply exchange per `resolve` call: broadcast a
/// request for the target, then filter inbound frames until the matching
/// reply arrives or the configured deadline elapses. There is no retry and no
/// table of outstanding requests; each call owns exactly one expectation.
///
/// Concurrent resolutions may share one receive stream, because each call
/// simply ignores replies that do not answer its own request.
///
pub struct Resolver {
    config: ResolverConfig,
}

impl Resolver {
    pub fn new(config: ResolverConfig) -> Resolver {
        Resolver { config }
    }

    pub fn resolve<C: LinkChannel>(
        &self,
        channel: &mut C,
        target: Ipv4Addr,
    ) -> Result<MacAddr, ResolveError> {
        let request = ArpMessage::request(
            &self.config.local_hardware_addr.bytes,
            &self.config.local_ipv4_addr.octets(),
            &target.octets(),
        )
        .map_err(ResolveError::Encode)?;
        let payload = request.encode().map_err(ResolveError::Encode)?;

        let frame = EthernetFrame::encap_arp(
            &payload,
            self.config.local_hardware_addr,
            MacAddr::BROADCAST,
        );
        channel
            .transmit(&frame.data)
            .map_err(ResolveError::Transmit)?;
        info!(
            "sent ARP request for {} on {}",
            target, self.config.interface
        );

        let deadline = Instant::now() + self.config.timeout;
        let mut buf = [0u8; RECV_BUF_LEN];
        while Instant::now() < deadline {
            let len = match channel.receive(&mut buf).map_err(ResolveError::Receive)? {
                Some(len) => len,
                None => break,
            };

            let frame = match EthernetFrame::from_buffer(buf[..len].to_vec()) {
                Ok(frame) => frame,
                Err(_) => {
                    debug!("discarding runt frame of {} bytes", len);
                    continue;
                }
            };
            if frame.ether_type() != ARP_ETHER_TYPE {
                continue;
            }

            let message = match ArpMessage::decode(frame.payload()) {
                Ok(message) => message,
                Err(err) => {
                    debug!("discarding malformed ARP payload: {}", err);
                    continue;
                }
            };
            if !message.is_reply() {
                continue;
            }
            if message.sender_protocol_addr[..] != target.octets()[..] {
                debug!(
                    "ignoring ARP reply answering for a different address ({:?})",
                    message.sender_protocol_addr
                );
                continue;
            }

            match MacAddr::from_slice(&message.sender_hardware_addr) {
                Some(addr) => return Ok(addr),
                // A matching reply with a sub-Ethernet hardware length is
                // useless to us; keep listening.
                None => continue,
            }
        }

        Err(ResolveError::NoReply)
    }
}
