use super::{Flags, Header, Message, Question, Rcode};
use crate::ResourceRecord;

/// Assembles response messages, mainly for tests and mock servers.
#[derive(Debug, Clone)]
pub struct MessageBuilder {
    message: Message,
}

impl MessageBuilder {
    /// A NOERROR, non-authoritative response echoing the query's id and question.
    pub fn response_to(query: &Message) -> Self {
        let flags = Flags {
            response: true,
            opcode: query.header.flags.opcode,
            recursion_desired: query.header.flags.recursion_desired,
            ..Flags::from_u16(0)
        };
        Self {
            message: Message {
                header: Header {
                    flags,
                    ..query.header
                },
                questions: query.questions.clone(),
                answers: Vec::new(),
                authorities: Vec::new(),
                additionals: Vec::new(),
            },
        }
    }

    /// A response with an arbitrary id and question, for spoofed or stray replies.
    pub fn response(id: u16, question: Question) -> Self {
        Self::response_to(&Message::query(id, question))
    }

    pub fn id(mut self, id: u16) -> Self {
        self.message.header.id = id;
        self
    }

    pub fn authoritative(mut self, authoritative: bool) -> Self {
        self.message.header.flags.authoritative = authoritative;
        self
    }

    pub fn rcode(mut self, rcode: Rcode) -> Self {
        self.message.header.flags.rcode = rcode;
        self
    }

    pub fn answer(mut self, record: ResourceRecord) -> Self {
        self.message.answers.push(record);
        self
    }

    pub fn authority(mut self, record: ResourceRecord) -> Self {
        self.message.authorities.push(record);
        self
    }

    pub fn additional(mut self, record: ResourceRecord) -> Self {
        self.message.additionals.push(record);
        self
    }

    pub fn build(self) -> Message {
        let mut message = self.message;
        message.header.qdcount = message.questions.len() as u16;
        message.header.ancount = message.answers.len() as u16;
        message.header.nscount = message.authorities.len() as u16;
        message.header.arcount = message.additionals.len() as u16;
        message
    }
}
