use crate::{DomainName, ResourceRecord};
use std::fmt;
use std::net::IpAddr;

/// Records returned by the engine for one question, plus the name that
/// actually owns them once CNAMEs have been followed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSet {
    pub canonical_name: DomainName,
    pub records: Vec<ResourceRecord>,
}

impl AnswerSet {
    pub fn first_address(&self) -> Option<IpAddr> {
        self.records.iter().find_map(ResourceRecord::address)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Address(IpAddr),
    MailExchange {
        preference: u16,
        exchange: DomainName,
        /// Best-effort A lookup of the exchange.
        address: Option<IpAddr>,
    },
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Address(ip) => write!(f, "{}", ip),
            Answer::MailExchange {
                preference,
                exchange,
                address: Some(ip),
            } => write!(f, "MX {} {} ({})", preference, exchange, ip),
            Answer::MailExchange {
                preference,
                exchange,
                address: None,
            } => write!(f, "MX {} {}", preference, exchange),
        }
    }
}

/// Final outcome of a top-level lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub name: DomainName,
    pub answer: Answer,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.answer)
    }
}
