#![allow(dead_code)]

use async_trait::async_trait;
use rootwalk_application::ports::{DnsTransport, TransportFactory};
use rootwalk_domain::{
    DomainName, Message, MessageBuilder, Question, Rcode, RecordType, ResourceRecord,
    TransportError,
};
use std::collections::{HashMap, VecDeque};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What a scripted server sends back for one query.
pub enum Reply {
    Message(Message),
    /// Several datagrams in order, e.g. a stray one before the real answer.
    Datagrams(Vec<Vec<u8>>),
    Silence,
}

type Handler = Box<dyn Fn(&Message) -> Reply + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentQuery {
    pub server: SocketAddr,
    pub id: u16,
    pub name: DomainName,
    pub qtype: RecordType,
}

/// A fake set of DNS servers keyed by address.
#[derive(Default)]
pub struct MockNetwork {
    servers: HashMap<IpAddr, Handler>,
    sent: Mutex<Vec<SentQuery>>,
    opened: Mutex<usize>,
}

impl MockNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn server<F>(mut self, ip: IpAddr, handler: F) -> Self
    where
        F: Fn(&Message) -> Reply + Send + Sync + 'static,
    {
        self.servers.insert(ip, Box::new(handler));
        self
    }

    pub fn sent(&self) -> Vec<SentQuery> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, ip: IpAddr) -> usize {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|q| q.server.ip() == ip)
            .count()
    }

    pub fn opened(&self) -> usize {
        *self.opened.lock().unwrap()
    }
}

pub struct MockTransport {
    network: Arc<MockNetwork>,
    pending: VecDeque<Vec<u8>>,
}

#[async_trait]
impl DnsTransport for MockTransport {
    async fn send(&mut self, server: SocketAddr, query: &[u8]) -> Result<(), TransportError> {
        let message = Message::decode(query).map_err(|e| TransportError::Io(e.to_string()))?;
        let question = message.questions[0].clone();
        self.network.sent.lock().unwrap().push(SentQuery {
            server,
            id: message.id(),
            name: question.name.clone(),
            qtype: question.qtype,
        });

        self.pending.clear();
        let reply = match self.network.servers.get(&server.ip()) {
            Some(handler) => handler(&message),
            None => Reply::Silence,
        };
        match reply {
            Reply::Message(response) => self.pending.push_back(response.encode().unwrap()),
            Reply::Datagrams(datagrams) => self.pending.extend(datagrams),
            Reply::Silence => {}
        }
        Ok(())
    }

    async fn receive(&mut self, _timeout: Duration) -> Result<Vec<u8>, TransportError> {
        self.pending.pop_front().ok_or(TransportError::Timeout)
    }
}

pub struct MockTransportFactory {
    network: Arc<MockNetwork>,
    fail_open: bool,
}

impl MockTransportFactory {
    pub fn new(network: Arc<MockNetwork>) -> Self {
        Self {
            network,
            fail_open: false,
        }
    }

    pub fn failing(network: Arc<MockNetwork>) -> Self {
        Self {
            network,
            fail_open: true,
        }
    }

    pub fn transport(network: &Arc<MockNetwork>) -> MockTransport {
        MockTransport {
            network: Arc::clone(network),
            pending: VecDeque::new(),
        }
    }
}

#[async_trait]
impl TransportFactory for MockTransportFactory {
    async fn open(&self) -> Result<Box<dyn DnsTransport>, TransportError> {
        if self.fail_open {
            return Err(TransportError::Io("socket unavailable".to_string()));
        }
        *self.network.opened.lock().unwrap() += 1;
        Ok(Box::new(Self::transport(&self.network)))
    }
}

// ---------------------------------------------------------------------------
// Response fabrication
// ---------------------------------------------------------------------------

pub fn ip(a: u8, b: u8, c: u8, d: u8) -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(a, b, c, d))
}

pub fn name(s: &str) -> DomainName {
    DomainName::parse(s).unwrap()
}

pub fn query_name(query: &Message) -> String {
    query.questions[0].name.to_string().to_ascii_lowercase()
}

pub fn query_type(query: &Message) -> RecordType {
    query.questions[0].qtype
}

pub fn answer_a(query: &Message, addresses: &[Ipv4Addr]) -> Reply {
    let owner = query.questions[0].name.clone();
    let mut builder = MessageBuilder::response_to(query).authoritative(true);
    for address in addresses {
        builder = builder.answer(ResourceRecord::a(owner.clone(), *address, 300));
    }
    Reply::Message(builder.build())
}

pub fn answer_cname(query: &Message, target: &str) -> Reply {
    let owner = query.questions[0].name.clone();
    Reply::Message(
        MessageBuilder::response_to(query)
            .authoritative(true)
            .answer(ResourceRecord::cname(owner, name(target), 300))
            .build(),
    )
}

pub fn answer_mx(query: &Message, exchanges: &[(u16, &str)]) -> Reply {
    let owner = query.questions[0].name.clone();
    let mut builder = MessageBuilder::response_to(query).authoritative(true);
    for (preference, exchange) in exchanges {
        builder = builder.answer(ResourceRecord::mx(
            owner.clone(),
            *preference,
            name(exchange),
            300,
        ));
    }
    Reply::Message(builder.build())
}

/// Referral to `zone` served by `nameservers`, each with optional IPv4 glue.
pub fn referral(query: &Message, zone: &str, nameservers: &[(&str, Option<Ipv4Addr>)]) -> Reply {
    let mut builder = MessageBuilder::response_to(query);
    for (host, _) in nameservers {
        builder = builder.authority(ResourceRecord::ns(name(zone), name(host), 172800));
    }
    for (host, glue) in nameservers {
        if let Some(address) = glue {
            builder = builder.additional(ResourceRecord::a(name(host), *address, 172800));
        }
    }
    Reply::Message(builder.build())
}

pub fn rcode(query: &Message, rcode: Rcode, authoritative: bool) -> Reply {
    Reply::Message(
        MessageBuilder::response_to(query)
            .authoritative(authoritative)
            .rcode(rcode)
            .build(),
    )
}

pub fn nodata(query: &Message) -> Reply {
    Reply::Message(MessageBuilder::response_to(query).authoritative(true).build())
}

/// A well-formed response carrying a different transaction id.
pub fn with_id(id: u16, reply: Reply) -> Vec<u8> {
    match reply {
        Reply::Message(mut message) => {
            message.header.id = id;
            message.encode().unwrap()
        }
        _ => panic!("with_id needs a message reply"),
    }
}

pub fn encoded(reply: Reply) -> Vec<u8> {
    match reply {
        Reply::Message(message) => message.encode().unwrap(),
        _ => panic!("encoded needs a message reply"),
    }
}

pub fn question_of(query: &Message) -> Question {
    query.questions[0].clone()
}
