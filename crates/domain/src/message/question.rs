use super::reader::Reader;
use crate::{DecodeError, DomainName, RecordType, CLASS_IN};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Question {
    pub name: DomainName,
    pub qtype: RecordType,
    pub qclass: u16,
}

impl Question {
    pub fn new(name: DomainName, qtype: RecordType) -> Self {
        Self {
            name,
            qtype,
            qclass: CLASS_IN,
        }
    }

    pub(crate) fn read(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let name = reader.name()?;
        let qtype = RecordType::from_u16(reader.u16()?);
        let qclass = reader.u16()?;
        Ok(Self {
            name,
            qtype,
            qclass,
        })
    }

    pub fn encode_into(&self, out: &mut Vec<u8>) {
        self.name.encode_into(out);
        out.extend_from_slice(&self.qtype.to_u16().to_be_bytes());
        out.extend_from_slice(&self.qclass.to_be_bytes());
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.qtype)
    }
}
