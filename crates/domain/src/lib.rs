//! Rootwalk Domain Layer
//!
//! Wire codecs, response classification and lookup state for an iterative
//! DNS resolver. No I/O happens here.
pub mod classification;
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod errors;
pub mod message;
pub mod name;
pub mod resolution;

pub use classification::{classify, classify_within, Classification, ResponseError};
pub use config::{CliOverrides, Config, ConfigError, ResolverConfig};
pub use dns_query::{DnsQuery, QueryType};
pub use dns_record::{RData, RecordType, ResourceRecord, CLASS_IN};
pub use errors::{DecodeError, ResolveError, TransportError};
pub use message::{Flags, Header, Message, MessageBuilder, Question, Rcode};
pub use name::DomainName;
pub use resolution::{Answer, AnswerSet, Resolution, ResolutionLimits, ResolutionState};
