//! UDP transport for iterative queries (RFC 1035 §4.2.1)
//!
//! One ephemeral socket per address family, reused for every server a
//! lookup talks to. Only datagrams from the server last queried are
//! delivered; anything else is dropped.

use async_trait::async_trait;
use rootwalk_application::ports::DnsTransport;
use rootwalk_domain::TransportError;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::Instant;
use tracing::{debug, warn};

pub struct UdpTransport {
    v4: UdpSocket,
    /// Bound on first use of an IPv6 server.
    v6: Option<UdpSocket>,
    peer: Option<SocketAddr>,
    max_datagram_size: usize,
}

impl UdpTransport {
    pub async fn open(max_datagram_size: usize) -> Result<Self, TransportError> {
        let v4 = UdpSocket::bind(SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)))
            .await
            .map_err(|e| TransportError::Io(format!("Failed to bind UDP socket: {}", e)))?;

        debug!(local = ?v4.local_addr().ok(), "UDP transport opened");

        Ok(Self {
            v4,
            v6: None,
            peer: None,
            max_datagram_size,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, TransportError> {
        self.v4
            .local_addr()
            .map_err(|e| TransportError::Io(e.to_string()))
    }

    async fn socket_for(&mut self, server: SocketAddr) -> Result<&UdpSocket, TransportError> {
        if server.is_ipv4() {
            return Ok(&self.v4);
        }
        if self.v6.is_none() {
            let socket = UdpSocket::bind(SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0)))
                .await
                .map_err(|e| {
                    TransportError::Io(format!("Failed to bind IPv6 UDP socket: {}", e))
                })?;
            self.v6 = Some(socket);
        }
        self.v6
            .as_ref()
            .ok_or_else(|| TransportError::Io("IPv6 socket unavailable".to_string()))
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(&mut self, server: SocketAddr, query: &[u8]) -> Result<(), TransportError> {
        let socket = self.socket_for(server).await?;
        let bytes_sent = socket.send_to(query, server).await.map_err(|e| {
            TransportError::Io(format!("Failed to send UDP query to {}: {}", server, e))
        })?;

        debug!(server = %server, bytes_sent, "UDP query sent");
        self.peer = Some(server);
        Ok(())
    }

    async fn receive(&mut self, timeout: Duration) -> Result<Vec<u8>, TransportError> {
        let peer = self
            .peer
            .ok_or_else(|| TransportError::Io("No query outstanding".to_string()))?;
        let socket = if peer.is_ipv4() {
            &self.v4
        } else {
            self.v6
                .as_ref()
                .ok_or_else(|| TransportError::Io("IPv6 socket unavailable".to_string()))?
        };

        let mut recv_buf = vec![0u8; self.max_datagram_size];
        let deadline = Instant::now() + timeout;

        loop {
            let (bytes_received, from_addr) =
                tokio::time::timeout_at(deadline, socket.recv_from(&mut recv_buf))
                    .await
                    .map_err(|_| TransportError::Timeout)?
                    .map_err(|e| {
                        TransportError::Io(format!(
                            "Failed to receive UDP response from {}: {}",
                            peer, e
                        ))
                    })?;

            if from_addr != peer {
                warn!(
                    expected = %peer,
                    received_from = %from_addr,
                    "Dropping UDP datagram from unexpected source"
                );
                continue;
            }

            debug!(server = %peer, bytes_received, "UDP response received");
            return Ok(recv_buf[..bytes_received].to_vec());
        }
    }
}
