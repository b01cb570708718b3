use arplookup::{RawChannel, Resolver, ResolverConfig};
use arp_packets::MacAddr;
use clap::{App, Arg};
use failure::{format_err, Error};
use flexi_logger::Logger;
use log::error;
use std::net::Ipv4Addr;
use std::process;
use std::time::Duration;

fn run(interface: &str, target: Ipv4Addr, timeout: Duration) -> Result<MacAddr, Error> {
    let known = rawlink::interfaces()?;
    if !known.iter().any(|name| name == interface) {
        return Err(format_err!(
            "unknown interface {} (available: {})",
            interface,
            known.join(", ")
        ));
    }

    let config = ResolverConfig::for_interface(interface, timeout)?;
    let mut channel = RawChannel::open(interface, timeout)?;
    let addr = Resolver::new(config).resolve(&mut channel, target)?;
    Ok(addr)
}

fn main() {
    let _logger = Logger::try_with_env_or_str("info").and_then(|logger| logger.start());

    let matches = App::new("arplookup")
        .version("0.1")
        .about("Resolve an IPv4 address on the local segment to its hardware address with ARP")
        .arg(
            Arg::with_name("interface")
                .short("i")
                .long("interface")
                .value_name("NAME")
                .help("Network interface to resolve through")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("ip")
                .long("ip")
                .value_name("ADDR")
                .help("IPv4 address to resolve")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("timeout")
                .short("t")
                .long("timeout")
                .value_name("SECONDS")
                .help("Seconds to wait for a reply")
                .default_value("2")
                .takes_value(true),
        )
        .get_matches();

    // A missing interface or address is a usage mistake, not a failure.
    let (interface, ip) = match (matches.value_of("interface"), matches.value_of("ip")) {
        (Some(interface), Some(ip)) => (interface, ip),
        _ => {
            println!("{}", matches.usage());
            return;
        }
    };

    let target: Ipv4Addr = match ip.parse() {
        Ok(target) => target,
        Err(_) => {
            error!("{} is not a dotted-quad IPv4 address", ip);
            process::exit(1);
        }
    };
    let timeout = match matches.value_of("timeout").and_then(|s| s.parse::<u64>().ok()) {
        Some(seconds) => Duration::from_secs(seconds),
        None => {
            error!("timeout must be a whole number of seconds");
            process::exit(1);
        }
    };

    match run(interface, target, timeout) {
        Ok(addr) => {
            println!("TARGET IP: {}", target);
            println!("TARGET MAC: {}", addr);
        }
        Err(err) => {
            error!("{}", err);
            process::exit(1);
        }
    }
}
