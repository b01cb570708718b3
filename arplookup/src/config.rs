use arp_packets::MacAddr;
use std::io;
use std::net::Ipv4Addr;
use std::time::Duration;

///
/// Everything a resolution attempt needs to know about its local end, looked
/// up once at start-up. Passing this in explicitly keeps the resolver free of
/// ad-hoc interface enumeration and any reliance on enumeration order.
///
#[derive(Clone, Debug)]
pub struct ResolverConfig {
    pub interface: String,
    pub local_hardware_addr: MacAddr,
    pub local_ipv4_addr: Ipv4Addr,
    /// How long one resolution attempt may wait for a matching reply.
    pub timeout: Duration,
}

impl ResolverConfig {
    /// Queries the kernel for `interface`'s hardware and IPv4 addresses and
    /// builds a config from them.
    pub fn for_interface(interface: &str, timeout: Duration) -> io::Result<ResolverConfig> {
        let local_hardware_addr = MacAddr::new(rawlink::hardware_addr(interface)?);
        let local_ipv4_addr = rawlink::ipv4_addr(interface)?;
        Ok(ResolverConfig {
            interface: interface.to_string(),
            local_hardware_addr,
            local_ipv4_addr,
            timeout,
        })
    }
}
