#![allow(dead_code)]
use rootwalk_domain::{Message, MessageBuilder, ResourceRecord};
use std::net::{Ipv4Addr, SocketAddr};
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

pub const MOCK_ANSWER: Ipv4Addr = Ipv4Addr::new(93, 184, 216, 34);

/// How the mock reacts to each query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    /// Authoritative A answer with [`MOCK_ANSWER`].
    Answer,
    /// Never replies.
    Silent,
    /// Sends a datagram from a second socket first, then the real answer.
    StrayThenAnswer,
}

pub struct MockDnsServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(behavior: Behavior) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let stray = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let local_addr = socket.local_addr()?;

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        let Ok((len, peer)) = result else { continue };
                        let Some(response) = Self::build_mock_response(&buf[..len]) else { continue };

                        match behavior {
                            Behavior::Answer => {
                                let _ = socket.send_to(&response, peer).await;
                            }
                            Behavior::Silent => {}
                            Behavior::StrayThenAnswer => {
                                let _ = stray.send_to(&response, peer).await;
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr: local_addr,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    fn build_mock_response(query: &[u8]) -> Option<Vec<u8>> {
        let query = Message::decode(query).ok()?;
        let name = query.question()?.name.clone();
        MessageBuilder::response_to(&query)
            .authoritative(true)
            .answer(ResourceRecord::a(name, MOCK_ANSWER, 60))
            .build()
            .encode()
            .ok()
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
