pub mod udp;

use async_trait::async_trait;
use rootwalk_application::ports::{DnsTransport, TransportFactory};
use rootwalk_domain::TransportError;

pub use udp::UdpTransport;

/// Opens a fresh [`UdpTransport`] per lookup.
pub struct UdpTransportFactory {
    max_datagram_size: usize,
}

impl UdpTransportFactory {
    pub fn new(max_datagram_size: usize) -> Self {
        Self { max_datagram_size }
    }
}

#[async_trait]
impl TransportFactory for UdpTransportFactory {
    async fn open(&self) -> Result<Box<dyn DnsTransport>, TransportError> {
        let transport = UdpTransport::open(self.max_datagram_size).await?;
        Ok(Box::new(transport))
    }
}
