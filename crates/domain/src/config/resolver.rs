use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Per-attempt wait for a matching response.
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    /// Referral hops allowed for one lookup, shared across CNAME restarts.
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,

    #[serde(default = "default_max_cname_redirects")]
    pub max_cname_redirects: u32,

    #[serde(default = "default_server_port")]
    pub server_port: u16,

    /// Nameserver names resolved per glueless referral.
    #[serde(default = "default_max_glueless_nameservers")]
    pub max_glueless_nameservers: usize,

    #[serde(default = "default_max_datagram_size")]
    pub max_datagram_size: usize,
}

impl ResolverConfig {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            query_timeout_ms: default_query_timeout_ms(),
            max_depth: default_max_depth(),
            max_cname_redirects: default_max_cname_redirects(),
            server_port: default_server_port(),
            max_glueless_nameservers: default_max_glueless_nameservers(),
            max_datagram_size: default_max_datagram_size(),
        }
    }
}

fn default_query_timeout_ms() -> u64 {
    5000
}
fn default_max_depth() -> u32 {
    30
}
fn default_max_cname_redirects() -> u32 {
    8
}
fn default_server_port() -> u16 {
    53
}
fn default_max_glueless_nameservers() -> usize {
    3
}
fn default_max_datagram_size() -> usize {
    4096
}
