//! Domain names and their label-sequence wire encoding (RFC 1035 §3.1, §4.1.4).

use crate::DecodeError;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

pub const MAX_LABEL_LEN: usize = 63;
pub const MAX_NAME_LEN: usize = 255;

const POINTER_MASK: u8 = 0xC0;

/// A domain name as an ordered list of labels, root label implied.
///
/// Labels are kept as raw bytes. Comparison and hashing ignore ASCII case.
#[derive(Debug, Clone, Default)]
pub struct DomainName {
    labels: Vec<Vec<u8>>,
}

impl DomainName {
    pub fn root() -> Self {
        Self { labels: Vec::new() }
    }

    /// Parses a dotted name such as `www.example.com` (one trailing dot allowed).
    pub fn parse(name: &str) -> Result<Self, DecodeError> {
        let trimmed = name.strip_suffix('.').unwrap_or(name);
        if trimmed.is_empty() {
            return Err(DecodeError::EmptyLabel);
        }

        let mut labels = Vec::new();
        let mut wire_len = 1;
        for label in trimmed.split('.') {
            if label.is_empty() {
                return Err(DecodeError::EmptyLabel);
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(DecodeError::LabelTooLong);
            }
            wire_len += 1 + label.len();
            if wire_len > MAX_NAME_LEN {
                return Err(DecodeError::NameTooLong);
            }
            labels.push(label.as_bytes().to_vec());
        }

        Ok(Self { labels })
    }

    pub fn labels(&self) -> impl Iterator<Item = &[u8]> {
        self.labels.iter().map(Vec::as_slice)
    }

    pub fn is_root(&self) -> bool {
        self.labels.is_empty()
    }

    /// Length of the uncompressed wire form, terminating zero included.
    pub fn wire_len(&self) -> usize {
        self.labels.iter().map(|l| l.len() + 1).sum::<usize>() + 1
    }

    /// Appends the uncompressed wire form to `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        for label in &self.labels {
            out.push(label.len() as u8);
            out.extend_from_slice(label);
        }
        out.push(0);
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.wire_len());
        self.encode_into(&mut out);
        out
    }

    /// Decodes a possibly compressed name starting at `start`.
    ///
    /// Returns the name and the offset just past it in the caller's stream:
    /// past the terminating zero, or past the first compression pointer.
    pub fn decode(buf: &[u8], start: usize) -> Result<(Self, usize), DecodeError> {
        let mut labels = Vec::new();
        let mut pos = start;
        let mut resume_at: Option<usize> = None;
        let mut visited: HashSet<usize> = HashSet::new();
        let mut wire_len = 0usize;

        loop {
            let len = *buf.get(pos).ok_or(DecodeError::Truncated)?;

            match len & POINTER_MASK {
                0x00 if len == 0 => {
                    let end = resume_at.unwrap_or(pos + 1);
                    return Ok((Self { labels }, end));
                }
                0x00 => {
                    let len = usize::from(len);
                    wire_len += 1 + len;
                    // room for the terminating zero
                    if wire_len + 1 > MAX_NAME_LEN {
                        return Err(DecodeError::NameTooLong);
                    }

                    let label_start = pos + 1;
                    let label = buf
                        .get(label_start..label_start + len)
                        .ok_or(DecodeError::Truncated)?;
                    labels.push(label.to_vec());
                    pos = label_start + len;
                }
                POINTER_MASK => {
                    let low = *buf.get(pos + 1).ok_or(DecodeError::Truncated)?;
                    let target = (usize::from(len & !POINTER_MASK) << 8) | usize::from(low);

                    if resume_at.is_none() {
                        resume_at = Some(pos + 2);
                    }
                    if !visited.insert(target) {
                        return Err(DecodeError::CompressionLoop);
                    }
                    pos = target;
                }
                // 0b01 and 0b10 label types are reserved / obsolete
                _ => return Err(DecodeError::Malformed),
            }
        }
    }

    /// True if `self` equals `zone` or lies below it.
    pub fn is_subdomain_of(&self, zone: &DomainName) -> bool {
        if zone.labels.len() > self.labels.len() {
            return false;
        }
        let offset = self.labels.len() - zone.labels.len();
        self.labels[offset..]
            .iter()
            .zip(&zone.labels)
            .all(|(a, b)| a.eq_ignore_ascii_case(b))
    }
}

impl PartialEq for DomainName {
    fn eq(&self, other: &Self) -> bool {
        self.labels.len() == other.labels.len()
            && self
                .labels
                .iter()
                .zip(&other.labels)
                .all(|(a, b)| a.eq_ignore_ascii_case(b))
    }
}

impl Eq for DomainName {}

impl Hash for DomainName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.labels.len().hash(state);
        for label in &self.labels {
            label.len().hash(state);
            for b in label {
                b.to_ascii_lowercase().hash(state);
            }
        }
    }
}

impl FromStr for DomainName {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.labels.is_empty() {
            return f.write_str(".");
        }
        for (i, label) in self.labels.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            for &b in label {
                if b.is_ascii_graphic() && b != b'.' && b != b'\\' {
                    write!(f, "{}", b as char)?;
                } else {
                    write!(f, "\\{:03}", b)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_simple_name() {
        let name = DomainName::parse("www.example.com").unwrap();
        assert_eq!(name.encode(), b"\x03www\x07example\x03com\x00");
    }

    #[test]
    fn test_trailing_dot_is_fqdn_form() {
        let a = DomainName::parse("example.com.").unwrap();
        let b = DomainName::parse("example.com").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_case_insensitive_equality() {
        let a = DomainName::parse("WWW.Example.COM").unwrap();
        let b = DomainName::parse("www.example.com").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "WWW.Example.COM");
    }

    #[test]
    fn test_decode_stops_after_first_pointer() {
        // "com" at 0, then "example" + pointer to 0 at 5
        let buf = b"\x03com\x00\x07example\xc0\x00";
        let (name, end) = DomainName::decode(buf, 5).unwrap();
        assert_eq!(name.to_string(), "example.com");
        assert_eq!(end, buf.len());
    }

    #[test]
    fn test_reserved_label_type_rejected() {
        let buf = [0x40, 0x01, 0x00];
        assert_eq!(DomainName::decode(&buf, 0), Err(DecodeError::Malformed));
    }

    #[test]
    fn test_subdomain() {
        let zone = DomainName::parse("example.com").unwrap();
        let name = DomainName::parse("a.b.example.com").unwrap();
        assert!(name.is_subdomain_of(&zone));
        assert!(zone.is_subdomain_of(&DomainName::root()));
        assert!(!zone.is_subdomain_of(&name));
    }

    #[test]
    fn test_display_escapes_dots_inside_labels() {
        let buf = b"\x03a.b\x00";
        let (name, _) = DomainName::decode(buf, 0).unwrap();
        assert_eq!(name.to_string(), "a\\046b");
    }
}
