use std::io::{self, ErrorKind};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, ToSocketAddrs, UdpSocket};

use tracing::debug;

use super::StatsClient;
use crate::error::Result;

/// Sends StatsD lines to a daemon over UDP.
///
/// The socket is non-blocking: a datagram that cannot be queued right away
/// is dropped, as StatsD traffic is fire-and-forget.
pub struct UdpStatsClient {
    socket: UdpSocket,
    addr: SocketAddr,
    prefix: Option<String>,
}

impl UdpStatsClient {
    /// Resolves `host:port` once and binds an ephemeral local socket of the
    /// matching address family.
    pub fn new(host: &str, port: u16, prefix: Option<String>) -> io::Result<Self> {
        let addr = (host, port).to_socket_addrs()?.next().ok_or_else(|| {
            io::Error::new(
                ErrorKind::NotFound,
                format!("statsd host '{}' did not resolve", host),
            )
        })?;

        let local = if addr.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        };
        let socket = UdpSocket::bind(local)?;
        socket.set_nonblocking(true)?;

        Ok(UdpStatsClient {
            socket,
            addr,
            prefix,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

impl StatsClient for UdpStatsClient {
    fn backend_type(&self) -> &str {
        "udp"
    }

    fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    fn send(&self, data: &str) -> Result<()> {
        match self.socket.send_to(data.as_bytes(), self.addr) {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::WouldBlock => {
                debug!("Dropping statsd datagram, send buffer full: {}", data);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
