use super::RecordType;
use crate::DomainName;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

pub const CLASS_IN: u16 = 1;

/// Type-specific interpretation of a record's RDATA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RData {
    A(Ipv4Addr),
    AAAA(Ipv6Addr),
    NS(DomainName),
    CNAME(DomainName),
    MX { preference: u16, exchange: DomainName },
    Opaque(Vec<u8>),
}

impl RData {
    pub fn address(&self) -> Option<IpAddr> {
        match self {
            RData::A(v4) => Some(IpAddr::V4(*v4)),
            RData::AAAA(v6) => Some(IpAddr::V6(*v6)),
            _ => None,
        }
    }

    /// Target name carried by NS, CNAME and MX records.
    pub fn target(&self) -> Option<&DomainName> {
        match self {
            RData::NS(name) | RData::CNAME(name) => Some(name),
            RData::MX { exchange, .. } => Some(exchange),
            _ => None,
        }
    }
}

impl fmt::Display for RData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RData::A(v4) => write!(f, "{}", v4),
            RData::AAAA(v6) => write!(f, "{}", v6),
            RData::NS(name) | RData::CNAME(name) => write!(f, "{}", name),
            RData::MX {
                preference,
                exchange,
            } => write!(f, "{} {}", preference, exchange),
            RData::Opaque(bytes) => write!(f, "\\# {}", bytes.len()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: DomainName,

    pub rtype: RecordType,

    pub rclass: u16,

    pub ttl: i32,

    pub rdata: RData,
}

impl ResourceRecord {
    pub fn new(name: DomainName, rtype: RecordType, ttl: i32, rdata: RData) -> Self {
        Self {
            name,
            rtype,
            rclass: CLASS_IN,
            ttl,
            rdata,
        }
    }

    pub fn a(name: DomainName, address: Ipv4Addr, ttl: i32) -> Self {
        Self::new(name, RecordType::A, ttl, RData::A(address))
    }

    pub fn aaaa(name: DomainName, address: Ipv6Addr, ttl: i32) -> Self {
        Self::new(name, RecordType::AAAA, ttl, RData::AAAA(address))
    }

    pub fn ns(name: DomainName, nameserver: DomainName, ttl: i32) -> Self {
        Self::new(name, RecordType::NS, ttl, RData::NS(nameserver))
    }

    pub fn cname(name: DomainName, target: DomainName, ttl: i32) -> Self {
        Self::new(name, RecordType::CNAME, ttl, RData::CNAME(target))
    }

    pub fn mx(name: DomainName, preference: u16, exchange: DomainName, ttl: i32) -> Self {
        Self::new(
            name,
            RecordType::MX,
            ttl,
            RData::MX {
                preference,
                exchange,
            },
        )
    }

    pub fn address(&self) -> Option<IpAddr> {
        self.rdata.address()
    }
}

impl fmt::Display for ResourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.name, self.ttl, self.rtype, self.rdata
        )
    }
}
