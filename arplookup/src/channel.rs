use arp_packets::ARP_ETHER_TYPE;
use rawlink::{BoundSocket, Socket};
use std::io;
use std::time::Duration;

///
/// Contract between the resolver and the link layer. The resolver never
/// touches a socket directly; anything that can carry a framed packet out and
/// hand inbound frames back satisfies it, which is also what makes the
/// correlation loop testable without raw sockets.
///
pub trait LinkChannel {
    /// Hands a fully framed packet (link-layer header included) to the wire.
    fn transmit(&mut self, frame: &[u8]) -> io::Result<()>;

    /// Blocks for the next inbound frame, up to the channel's receive bound.
    /// `Ok(None)` signals end-of-input: the bound elapsed or the frame source
    /// is exhausted.
    fn receive(&mut self, buf: &mut [u8]) -> io::Result<Option<usize>>;
}

/// A `LinkChannel` over an AF_PACKET socket bound to one interface and
/// filtered to the ARP ether type.
pub struct RawChannel {
    socket: BoundSocket,
}

impl RawChannel {
    /// Opens and binds an ARP-only packet socket on `interface`, with `recv`
    /// bounded by `recv_timeout`. Requires CAP_NET_RAW.
    pub fn open(interface: &str, recv_timeout: Duration) -> io::Result<RawChannel> {
        let mut socket = Socket::new(ARP_ETHER_TYPE)?;
        socket.set_recv_timeout(recv_timeout)?;
        Ok(RawChannel {
            socket: socket.bind(interface)?,
        })
    }
}

impl LinkChannel for RawChannel {
    fn transmit(&mut self, frame: &[u8]) -> io::Result<()> {
        self.socket.send(frame).map(|_| ())
    }

    fn receive(&mut self, buf: &mut [u8]) -> io::Result<Option<usize>> {
        match self.socket.recv(buf) {
            Ok(len) => Ok(Some(len)),
            // SO_RCVTIMEO expiry surfaces as WouldBlock or TimedOut depending
            // on the platform's errno choice.
            Err(ref e)
                if e.kind() == io::ErrorKind::WouldBlock
                    || e.kind() == io::ErrorKind::TimedOut =>
            {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
