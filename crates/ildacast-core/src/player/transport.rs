use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};

use thiserror::Error;

/// Fire-and-forget datagram delivery to a single controller.
pub trait DatagramTransport {
    /// Send one datagram; it either leaves whole or fails.
    fn send(&mut self, datagram: &[u8]) -> Result<(), TransportError>;
}

impl<T: DatagramTransport + ?Sized> DatagramTransport for &mut T {
    fn send(&mut self, datagram: &[u8]) -> Result<(), TransportError> {
        (**self).send(datagram)
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("short send to {target}: {sent} of {len} bytes")]
    ShortSend {
        target: SocketAddr,
        sent: usize,
        len: usize,
    },
}

/// UDP socket bound to an ephemeral local port, sending to one target.
///
/// The socket lives as long as the transport and is closed on drop.
#[derive(Debug)]
pub struct UdpTransport {
    socket: UdpSocket,
    target: SocketAddr,
}

impl UdpTransport {
    /// Bind an unconnected socket of the target's address family; every
    /// datagram is addressed to `target` with `send_to`.
    pub fn bind(target: SocketAddr) -> Result<Self, TransportError> {
        let local = match target.ip() {
            IpAddr::V4(_) => SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0),
            IpAddr::V6(_) => SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), 0),
        };
        let socket = UdpSocket::bind(local)?;
        let transport = Self { socket, target };
        tracing::debug!(local = ?transport.local_addr().ok(), %target, "UDP transport ready");
        Ok(transport)
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }

    pub fn local_addr(&self) -> Result<SocketAddr, TransportError> {
        Ok(self.socket.local_addr()?)
    }
}

impl DatagramTransport for UdpTransport {
    fn send(&mut self, datagram: &[u8]) -> Result<(), TransportError> {
        let sent = self.socket.send_to(datagram, self.target)?;
        if sent != datagram.len() {
            return Err(TransportError::ShortSend {
                target: self.target,
                sent,
                len: datagram.len(),
            });
        }
        Ok(())
    }
}
