use async_trait::async_trait;
use rootwalk_domain::TransportError;
use std::net::SocketAddr;
use std::time::Duration;

/// One datagram socket's worth of DNS traffic.
///
/// `receive` yields whatever arrives next; matching a datagram to the
/// outstanding query is the caller's job.
#[async_trait]
pub trait DnsTransport: Send {
    async fn send(&mut self, server: SocketAddr, query: &[u8]) -> Result<(), TransportError>;

    /// Fails with `TransportError::Timeout` when nothing arrives in time.
    async fn receive(&mut self, timeout: Duration) -> Result<Vec<u8>, TransportError>;
}

/// Opens a transport for each top-level lookup.
#[async_trait]
pub trait TransportFactory: Send + Sync {
    async fn open(&self) -> Result<Box<dyn DnsTransport>, TransportError>;
}
