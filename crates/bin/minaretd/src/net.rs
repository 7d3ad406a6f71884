//! Local network address detection.

use std::net::{IpAddr, UdpSocket};

/// Address of the interface the host would use to reach the internet.
///
/// Connecting a UDP socket sends nothing; it only asks the OS to pick a
/// route. Returns `None` when there is no usable route.
pub fn local_ip() -> Option<IpAddr> {
    let socket = UdpSocket::bind("0.0.0.0:0").ok()?;
    socket.connect("8.8.8.8:80").ok()?;
    let ip = socket.local_addr().ok()?.ip();
    (!ip.is_unspecified()).then_some(ip)
}
