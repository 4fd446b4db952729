//! Interprets a decoded response relative to the question that was asked.

use crate::message::{Message, Question, Rcode};
use crate::{DomainName, RData, RecordType, ResourceRecord};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseError {
    Rcode(Rcode),
    /// Neither an answer nor a usable delegation.
    Empty,
    /// Authoritative: the name exists but has no records of the queried type.
    NoData,
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseError::Rcode(rcode) => write!(f, "{}", rcode),
            ResponseError::Empty => f.write_str("EMPTY"),
            ResponseError::NoData => f.write_str("NODATA"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Records of the queried type owned by the end of the in-response
    /// CNAME chain; `links` counts the CNAMEs followed to get there.
    AuthoritativeAnswer {
        records: Vec<ResourceRecord>,
        links: u32,
    },
    Referral,
    /// The chain stopped at `target` without an answer for it, either
    /// because the response ends there or because `target` lies outside
    /// the responding zone.
    CName { target: DomainName, links: u32 },
    Error(ResponseError),
}

impl Classification {
    pub fn kind(&self) -> &'static str {
        match self {
            Classification::AuthoritativeAnswer { .. } => "answer",
            Classification::Referral => "referral",
            Classification::CName { .. } => "cname",
            Classification::Error(_) => "error",
        }
    }
}

enum Chain {
    Answer(Vec<ResourceRecord>, u32),
    Alias(DomainName, u32),
    Nothing,
}

/// Classifies a response from a server for the root zone.
pub fn classify(message: &Message, question: &Question) -> Classification {
    classify_within(message, question, &DomainName::root())
}

/// Classifies a response from a server authoritative for `zone`. CNAME
/// targets outside `zone` are not followed inside the response.
pub fn classify_within(
    message: &Message,
    question: &Question,
    zone: &DomainName,
) -> Classification {
    let rcode = message.rcode();
    if rcode != Rcode::NoError {
        return Classification::Error(ResponseError::Rcode(rcode));
    }

    let authoritative = message.is_authoritative();

    if !message.answers.is_empty() && (authoritative || message.authorities.is_empty()) {
        match follow_chain(&message.answers, &question.name, question.qtype, zone) {
            Chain::Answer(records, links) => {
                return Classification::AuthoritativeAnswer { records, links }
            }
            Chain::Alias(target, links) => return Classification::CName { target, links },
            Chain::Nothing if authoritative => {
                return Classification::Error(ResponseError::NoData)
            }
            Chain::Nothing => {}
        }
    }

    let delegates = message
        .authorities
        .iter()
        .any(|record| record.rtype == RecordType::NS);

    if !authoritative && delegates {
        return Classification::Referral;
    }

    if authoritative {
        return Classification::Error(ResponseError::NoData);
    }

    Classification::Error(ResponseError::Empty)
}

/// Walks CNAMEs inside one answer section. A direct answer for the current
/// name wins over a CNAME owned by the same name.
fn follow_chain(
    answers: &[ResourceRecord],
    qname: &DomainName,
    qtype: RecordType,
    zone: &DomainName,
) -> Chain {
    let mut current = qname;
    let mut links = 0u32;
    let mut seen: HashSet<&DomainName> = HashSet::new();
    seen.insert(current);

    loop {
        let matches: Vec<ResourceRecord> = answers
            .iter()
            .filter(|record| record.rtype == qtype && record.name == *current)
            .cloned()
            .collect();
        if !matches.is_empty() {
            return Chain::Answer(matches, links);
        }

        let next = answers.iter().find_map(|record| match &record.rdata {
            RData::CNAME(target) if record.name == *current => Some(target),
            _ => None,
        });

        match next {
            Some(target) if seen.insert(target) => {
                current = target;
                links += 1;
                // out-of-zone data is not trusted from this server
                if !target.is_subdomain_of(zone) {
                    break;
                }
            }
            _ => break,
        }
    }

    if links == 0 {
        Chain::Nothing
    } else {
        Chain::Alias(current.clone(), links)
    }
}
