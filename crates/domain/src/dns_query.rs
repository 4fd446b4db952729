use crate::{DomainName, ResolveError, RecordType};
use std::fmt;
use std::str::FromStr;

/// Record types a top-level lookup may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QueryType {
    #[default]
    A,
    AAAA,
    MX,
}

impl QueryType {
    pub fn record_type(&self) -> RecordType {
        match self {
            QueryType::A => RecordType::A,
            QueryType::AAAA => RecordType::AAAA,
            QueryType::MX => RecordType::MX,
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.record_type().as_str())
    }
}

impl FromStr for QueryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "A" => Ok(QueryType::A),
            "AAAA" => Ok(QueryType::AAAA),
            "MX" => Ok(QueryType::MX),
            other => Err(format!("unsupported query type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuery {
    pub name: DomainName,
    pub query_type: QueryType,
}

impl DnsQuery {
    pub fn new(name: DomainName, query_type: QueryType) -> Self {
        Self { name, query_type }
    }

    pub fn parse(hostname: &str, query_type: QueryType) -> Result<Self, ResolveError> {
        let name = DomainName::parse(hostname)?;
        Ok(Self::new(name, query_type))
    }
}

impl fmt::Display for DnsQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.query_type)
    }
}
