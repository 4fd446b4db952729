use thiserror::Error;

/// Failures while reading or writing DNS wire format.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Message truncated")]
    Truncated,

    #[error("Malformed message")]
    Malformed,

    #[error("Domain name exceeds 255 bytes")]
    NameTooLong,

    #[error("Label exceeds 63 bytes")]
    LabelTooLong,

    #[error("Compression pointer loop")]
    CompressionLoop,

    #[error("Empty label in domain name")]
    EmptyLabel,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Query timeout")]
    Timeout,

    #[error("I/O error: {0}")]
    Io(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("All candidate servers are unreachable")]
    AllServersUnreachable,

    #[error("Domain not found (NXDOMAIN)")]
    NotFound,

    #[error("Domain has no records of the requested type")]
    NoData,

    #[error("Too many CNAME redirects")]
    TooManyRedirects,

    #[error("Maximum referral depth exceeded")]
    MaxDepthExceeded,

    #[error("Referral loop detected")]
    ReferralLoop,

    #[error("Referral yielded no reachable nameserver")]
    NoCandidates,

    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("Invalid domain name: {0}")]
    InvalidName(#[from] DecodeError),
}

impl From<TransportError> for ResolveError {
    fn from(e: TransportError) -> Self {
        ResolveError::TransportError(e.to_string())
    }
}
