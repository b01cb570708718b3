//! Netdevice queries: interface enumeration and local address discovery.
//! Interfaces with the linux netdevice kernel API (man 7 netdevice) and the
//! standard C library's interface listing.

use crate::linux;
use libc;
use std::{ffi::CStr, io, mem::MaybeUninit, net::Ipv4Addr};

/// Builds a zeroed `ifreq` carrying `name`, the common argument shape of the
/// SIOCGIF* ioctls. The name must fit IFNAMSIZ with its terminating NUL.
pub(crate) fn ifreq_with_name(name: &str) -> io::Result<linux::ifreq> {
    if name.is_empty() || name.len() >= libc::IFNAMSIZ || name.bytes().any(|b| b == 0) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "invalid interface name",
        ));
    }
    let mut ifr: linux::ifreq = unsafe { MaybeUninit::zeroed().assume_init() };
    // Union field access requires unsafe; the zeroed name array is in-bounds
    // for the length check above and stays NUL-terminated.
    unsafe {
        for (dst, src) in ifr.ifr_ifrn.ifrn_name.iter_mut().zip(name.bytes()) {
            *dst = src as libc::c_char;
        }
    }
    Ok(ifr)
}

/// Lists the names of the system's network interfaces, in kernel enumeration
/// order. The first entry is the conventional default interface.
pub fn interfaces() -> io::Result<Vec<String>> {
    // This block is marked as unsafe because it uses FFI. if_nameindex returns a
    // NULL-terminated, C-allocated array of (index, name) records which we copy
    // out of before handing it back to if_freenameindex.
    unsafe {
        let head = libc::if_nameindex();
        if head.is_null() {
            return Err(io::Error::last_os_error());
        }
        let mut names = Vec::new();
        let mut cur = head;
        while (*cur).if_index != 0 && !(*cur).if_name.is_null() {
            names.push(CStr::from_ptr((*cur).if_name).to_string_lossy().into_owned());
            cur = cur.add(1);
        }
        libc::if_freenameindex(head);
        Ok(names)
    }
}

/// Returns the 6-byte hardware address assigned to `iface`.
pub fn hardware_addr(iface: &str) -> io::Result<[u8; 6]> {
    let mut ifr = ifreq_with_name(iface)?;
    // See the safety discussion on `query_socket`; the ioctl only writes into
    // the stack-owned ifreq.
    unsafe {
        let fd = query_socket()?;
        let err = libc::ioctl(fd, linux::SIOCGIFHWADDR, &mut ifr);
        let ioctl_err = io::Error::last_os_error();
        libc::close(fd);
        if err < 0 {
            return Err(ioctl_err);
        }
        let sa_data = ifr.ifr_ifru.ifru_hwaddr.sa_data;
        let mut mac = [0u8; 6];
        for (dst, src) in mac.iter_mut().zip(sa_data.iter()) {
            *dst = *src as u8;
        }
        Ok(mac)
    }
}

/// Returns the IPv4 address assigned to `iface`. Fails with the kernel's
/// EADDRNOTAVAIL if the interface has no IPv4 address.
pub fn ipv4_addr(iface: &str) -> io::Result<Ipv4Addr> {
    let mut ifr = ifreq_with_name(iface)?;
    // See the safety discussion on `query_socket`. The returned ifru_addr is a
    // sockaddr_in for SIOCGIFADDR (man 7 netdevice), so the pointer cast reads
    // initialized memory.
    unsafe {
        let fd = query_socket()?;
        let err = libc::ioctl(fd, linux::SIOCGIFADDR, &mut ifr);
        let ioctl_err = io::Error::last_os_error();
        libc::close(fd);
        if err < 0 {
            return Err(ioctl_err);
        }
        let addr = &ifr.ifr_ifru.ifru_addr as *const libc::sockaddr as *const libc::sockaddr_in;
        Ok(Ipv4Addr::from((*addr).sin_addr.s_addr.to_be()))
    }
}

/// Opens a throwaway AF_INET datagram socket to issue SIOCGIF* queries on.
/// The netdevice ioctls do not need a packet socket, and an AF_INET socket
/// needs no capabilities.
unsafe fn query_socket() -> io::Result<libc::c_int> {
    let fd = libc::socket(libc::AF_INET, libc::SOCK_DGRAM, 0);
    if fd < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(fd)
}
