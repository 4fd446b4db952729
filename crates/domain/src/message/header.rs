use super::reader::Reader;
use crate::DecodeError;
use std::fmt;

pub const HEADER_LEN: usize = 12;

/// Response code (low nibble of the flags word).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rcode {
    NoError,
    FormErr,
    ServFail,
    NxDomain,
    NotImp,
    Refused,
    Other(u8),
}

impl Rcode {
    pub fn from_u8(code: u8) -> Self {
        match code & 0x0F {
            0 => Rcode::NoError,
            1 => Rcode::FormErr,
            2 => Rcode::ServFail,
            3 => Rcode::NxDomain,
            4 => Rcode::NotImp,
            5 => Rcode::Refused,
            other => Rcode::Other(other),
        }
    }

    pub fn to_u8(&self) -> u8 {
        match self {
            Rcode::NoError => 0,
            Rcode::FormErr => 1,
            Rcode::ServFail => 2,
            Rcode::NxDomain => 3,
            Rcode::NotImp => 4,
            Rcode::Refused => 5,
            Rcode::Other(code) => code & 0x0F,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rcode::NoError => "NOERROR",
            Rcode::FormErr => "FORMERR",
            Rcode::ServFail => "SERVFAIL",
            Rcode::NxDomain => "NXDOMAIN",
            Rcode::NotImp => "NOTIMP",
            Rcode::Refused => "REFUSED",
            Rcode::Other(_) => "UNKNOWN",
        }
    }
}

impl fmt::Display for Rcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rcode::Other(code) => write!(f, "RCODE{}", code),
            other => f.write_str(other.as_str()),
        }
    }
}

/// The 16-bit flags word: QR | Opcode | AA | TC | RD | RA | Z | RCODE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flags {
    pub response: bool,
    pub opcode: u8,
    pub authoritative: bool,
    pub truncated: bool,
    pub recursion_desired: bool,
    pub recursion_available: bool,
    pub rcode: Rcode,
}

impl Flags {
    /// All bits clear: a standard, non-recursive query.
    pub fn iterative_query() -> Self {
        Self::from_u16(0)
    }

    pub fn from_u16(bits: u16) -> Self {
        Self {
            response: bits & 0x8000 != 0,
            opcode: ((bits >> 11) & 0x0F) as u8,
            authoritative: bits & 0x0400 != 0,
            truncated: bits & 0x0200 != 0,
            recursion_desired: bits & 0x0100 != 0,
            recursion_available: bits & 0x0080 != 0,
            rcode: Rcode::from_u8((bits & 0x000F) as u8),
        }
    }

    pub fn to_u16(&self) -> u16 {
        let mut bits = u16::from(self.opcode & 0x0F) << 11;
        if self.response {
            bits |= 0x8000;
        }
        if self.authoritative {
            bits |= 0x0400;
        }
        if self.truncated {
            bits |= 0x0200;
        }
        if self.recursion_desired {
            bits |= 0x0100;
        }
        if self.recursion_available {
            bits |= 0x0080;
        }
        bits | u16::from(self.rcode.to_u8())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub id: u16,
    pub flags: Flags,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

impl Header {
    pub fn query(id: u16) -> Self {
        Self {
            id,
            flags: Flags::iterative_query(),
            qdcount: 1,
            ancount: 0,
            nscount: 0,
            arcount: 0,
        }
    }

    pub(crate) fn read(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            id: reader.u16()?,
            flags: Flags::from_u16(reader.u16()?),
            qdcount: reader.u16()?,
            ancount: reader.u16()?,
            nscount: reader.u16()?,
            arcount: reader.u16()?,
        })
    }

    pub fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.id.to_be_bytes());
        out.extend_from_slice(&self.flags.to_u16().to_be_bytes());
        out.extend_from_slice(&self.qdcount.to_be_bytes());
        out.extend_from_slice(&self.ancount.to_be_bytes());
        out.extend_from_slice(&self.nscount.to_be_bytes());
        out.extend_from_slice(&self.arcount.to_be_bytes());
    }
}
