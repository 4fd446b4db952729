//! DNS message codec (RFC 1035 §4.1).

mod builder;
mod header;
mod question;
mod reader;

pub use builder::MessageBuilder;
pub use header::{Flags, Header, Rcode, HEADER_LEN};
pub use question::Question;

use crate::{DecodeError, DomainName, RData, RecordType, ResourceRecord};
use reader::Reader;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Smallest possible question: root name + QTYPE + QCLASS.
const MIN_QUESTION_LEN: usize = 5;
/// Smallest possible record: root name + TYPE + CLASS + TTL + RDLENGTH.
const MIN_RECORD_LEN: usize = 11;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<ResourceRecord>,
    pub authorities: Vec<ResourceRecord>,
    pub additionals: Vec<ResourceRecord>,
}

impl Message {
    pub fn query(id: u16, question: Question) -> Self {
        Self {
            header: Header::query(id),
            questions: vec![question],
            answers: Vec::new(),
            authorities: Vec::new(),
            additionals: Vec::new(),
        }
    }

    /// Builds the wire form of an iterative (RD clear) single-question query.
    pub fn encode_query(id: u16, name: &DomainName, qtype: RecordType) -> Vec<u8> {
        let question = Question::new(name.clone(), qtype);
        let mut out = Vec::with_capacity(HEADER_LEN + name.wire_len() + 4);
        Header::query(id).encode_into(&mut out);
        question.encode_into(&mut out);
        out
    }

    /// Parses a complete message.
    ///
    /// Header counts are honoured exactly: too few bytes for the declared
    /// records is `Truncated`, bytes left over after them is `Malformed`.
    pub fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = Reader::new(buf);
        let header = Header::read(&mut reader)?;

        let mut questions = Vec::with_capacity(bounded_capacity(
            header.qdcount,
            reader.remaining(),
            MIN_QUESTION_LEN,
        ));
        for _ in 0..header.qdcount {
            questions.push(Question::read(&mut reader)?);
        }

        let answers = read_section(&mut reader, header.ancount)?;
        let authorities = read_section(&mut reader, header.nscount)?;
        let additionals = read_section(&mut reader, header.arcount)?;

        if reader.remaining() != 0 {
            return Err(DecodeError::Malformed);
        }

        Ok(Self {
            header,
            questions,
            answers,
            authorities,
            additionals,
        })
    }

    /// Serializes without name compression. Header counts are taken from
    /// the section lengths.
    pub fn encode(&self) -> Result<Vec<u8>, DecodeError> {
        let mut header = self.header;
        header.qdcount = section_len(self.questions.len())?;
        header.ancount = section_len(self.answers.len())?;
        header.nscount = section_len(self.authorities.len())?;
        header.arcount = section_len(self.additionals.len())?;

        let mut out = Vec::with_capacity(512);
        header.encode_into(&mut out);
        for question in &self.questions {
            question.encode_into(&mut out);
        }
        for record in self
            .answers
            .iter()
            .chain(&self.authorities)
            .chain(&self.additionals)
        {
            write_record(record, &mut out)?;
        }
        Ok(out)
    }

    pub fn id(&self) -> u16 {
        self.header.id
    }

    pub fn rcode(&self) -> Rcode {
        self.header.flags.rcode
    }

    pub fn is_response(&self) -> bool {
        self.header.flags.response
    }

    pub fn is_authoritative(&self) -> bool {
        self.header.flags.authoritative
    }

    pub fn question(&self) -> Option<&Question> {
        self.questions.first()
    }

    /// True if the question section is exactly `question`.
    pub fn echoes(&self, question: &Question) -> bool {
        self.questions.len() == 1 && self.questions[0] == *question
    }
}

fn bounded_capacity(count: u16, remaining: usize, min_len: usize) -> usize {
    usize::from(count).min(remaining / min_len)
}

fn section_len(len: usize) -> Result<u16, DecodeError> {
    u16::try_from(len).map_err(|_| DecodeError::Malformed)
}

fn read_section(
    reader: &mut Reader<'_>,
    count: u16,
) -> Result<Vec<ResourceRecord>, DecodeError> {
    let mut records =
        Vec::with_capacity(bounded_capacity(count, reader.remaining(), MIN_RECORD_LEN));
    for _ in 0..count {
        records.push(read_record(reader)?);
    }
    Ok(records)
}

fn read_record(reader: &mut Reader<'_>) -> Result<ResourceRecord, DecodeError> {
    let name = reader.name()?;
    let rtype = RecordType::from_u16(reader.u16()?);
    let rclass = reader.u16()?;
    let ttl = reader.u32()? as i32;
    let rdlength = usize::from(reader.u16()?);

    let rdata_end = reader
        .position()
        .checked_add(rdlength)
        .ok_or(DecodeError::Malformed)?;
    if rdata_end > reader.buffer().len() {
        return Err(DecodeError::Truncated);
    }

    let rdata = match rtype {
        RecordType::A => {
            let b = fixed_rdata::<4>(reader, rdlength)?;
            RData::A(Ipv4Addr::from(b))
        }
        RecordType::AAAA => {
            let b = fixed_rdata::<16>(reader, rdlength)?;
            RData::AAAA(Ipv6Addr::from(b))
        }
        RecordType::NS => RData::NS(name_rdata(reader, rdata_end)?),
        RecordType::CNAME => RData::CNAME(name_rdata(reader, rdata_end)?),
        RecordType::MX => {
            if rdlength < 3 {
                return Err(DecodeError::Malformed);
            }
            let preference = reader.u16()?;
            let exchange = name_rdata(reader, rdata_end)?;
            RData::MX {
                preference,
                exchange,
            }
        }
        _ => RData::Opaque(reader.bytes(rdlength)?.to_vec()),
    };

    Ok(ResourceRecord {
        name,
        rtype,
        rclass,
        ttl,
        rdata,
    })
}

fn fixed_rdata<const N: usize>(
    reader: &mut Reader<'_>,
    rdlength: usize,
) -> Result<[u8; N], DecodeError> {
    if rdlength != N {
        return Err(DecodeError::Malformed);
    }
    let mut out = [0u8; N];
    out.copy_from_slice(reader.bytes(N)?);
    Ok(out)
}

/// A name that must occupy the rest of the RDATA exactly.
fn name_rdata(reader: &mut Reader<'_>, rdata_end: usize) -> Result<DomainName, DecodeError> {
    let name = reader.name()?;
    if reader.position() != rdata_end {
        return Err(DecodeError::Malformed);
    }
    Ok(name)
}

fn write_record(record: &ResourceRecord, out: &mut Vec<u8>) -> Result<(), DecodeError> {
    record.name.encode_into(out);
    out.extend_from_slice(&record.rtype.to_u16().to_be_bytes());
    out.extend_from_slice(&record.rclass.to_be_bytes());
    out.extend_from_slice(&record.ttl.to_be_bytes());

    let mut rdata = Vec::new();
    match &record.rdata {
        RData::A(v4) => rdata.extend_from_slice(&v4.octets()),
        RData::AAAA(v6) => rdata.extend_from_slice(&v6.octets()),
        RData::NS(name) | RData::CNAME(name) => name.encode_into(&mut rdata),
        RData::MX {
            preference,
            exchange,
        } => {
            rdata.extend_from_slice(&preference.to_be_bytes());
            exchange.encode_into(&mut rdata);
        }
        RData::Opaque(bytes) => rdata.extend_from_slice(bytes),
    }

    let rdlength = u16::try_from(rdata.len()).map_err(|_| DecodeError::Malformed)?;
    out.extend_from_slice(&rdlength.to_be_bytes());
    out.extend_from_slice(&rdata);
    Ok(())
}
