#![allow(dead_code)]
use rootwalk_domain::{DomainName, Message, MessageBuilder, Question, RecordType};

pub fn name(s: &str) -> DomainName {
    DomainName::parse(s).unwrap()
}

pub fn question(s: &str, qtype: RecordType) -> Question {
    Question::new(name(s), qtype)
}

pub fn response_for(q: &Question) -> MessageBuilder {
    MessageBuilder::response(0x1234, q.clone())
}

/// Hand-assembles wire bytes so tests can express layouts the encoder
/// never produces (compression pointers, bad lengths, loops).
pub struct Wire {
    bytes: Vec<u8>,
}

impl Wire {
    pub fn header(id: u16, flags: u16, counts: [u16; 4]) -> Self {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&id.to_be_bytes());
        bytes.extend_from_slice(&flags.to_be_bytes());
        for count in counts {
            bytes.extend_from_slice(&count.to_be_bytes());
        }
        Self { bytes }
    }

    pub fn empty() -> Self {
        Self { bytes: Vec::new() }
    }

    pub fn offset(&self) -> usize {
        self.bytes.len()
    }

    pub fn raw(mut self, raw: &[u8]) -> Self {
        self.bytes.extend_from_slice(raw);
        self
    }

    pub fn name(self, s: &str) -> Self {
        let encoded = name(s).encode();
        self.raw(&encoded)
    }

    pub fn pointer(self, offset: u16) -> Self {
        self.u16(0xC000 | offset)
    }

    pub fn u16(self, value: u16) -> Self {
        self.raw(&value.to_be_bytes())
    }

    pub fn u32(self, value: u32) -> Self {
        self.raw(&value.to_be_bytes())
    }

    /// TYPE, CLASS IN, TTL and RDLENGTH following an owner name.
    pub fn rr_fixed(self, rtype: RecordType, ttl: u32, rdlength: u16) -> Self {
        self.u16(rtype.to_u16()).u16(1).u32(ttl).u16(rdlength)
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}

pub fn decode(bytes: &[u8]) -> Message {
    Message::decode(bytes).unwrap()
}
