use arp_packets::ArpError;
use failure::Fail;
use std::io;

/// Failures that a resolution attempt surfaces to its caller. Malformed or
/// irrelevant inbound frames are never errors; the resolver swallows those
/// and keeps listening.
#[derive(Debug, Fail)]
pub enum ResolveError {
    /// The request message could not be built or serialized.
    #[fail(display = "failed to encode ARP request: {}", _0)]
    Encode(#[cause] ArpError),

    /// The transport rejected the outbound request frame.
    #[fail(display = "failed to transmit ARP request: {}", _0)]
    Transmit(#[cause] io::Error),

    /// The transport failed while listening for replies. Distinct from a
    /// silent target, which is `NoReply`.
    #[fail(display = "transport failure while awaiting ARP reply: {}", _0)]
    Receive(#[cause] io::Error),

    /// No matching reply arrived before end-of-input or the deadline.
    #[fail(display = "no matching ARP reply before the deadline")]
    NoReply,
}
