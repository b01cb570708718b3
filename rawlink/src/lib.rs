#![cfg(target_os = "linux")]
mod linux;
mod netdev;
mod sockets;

pub use netdev::{hardware_addr, interfaces, ipv4_addr};
pub use sockets::{BoundSocket, Socket};
