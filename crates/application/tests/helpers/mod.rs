#![allow(dead_code)]

pub mod mock_transport;

pub use mock_transport::*;

use rootwalk_domain::{Message, Rcode, RecordType};
use std::net::{IpAddr, Ipv4Addr};

pub const ROOT_A: Ipv4Addr = Ipv4Addr::new(198, 41, 0, 4);
pub const ROOT_B: Ipv4Addr = Ipv4Addr::new(199, 9, 14, 201);
pub const GTLD_A: Ipv4Addr = Ipv4Addr::new(192, 5, 6, 30);
pub const IANA_A: Ipv4Addr = Ipv4Addr::new(199, 43, 135, 53);
pub const IANA_B: Ipv4Addr = Ipv4Addr::new(199, 43, 133, 53);
pub const WWW_EXAMPLE: Ipv4Addr = Ipv4Addr::new(93, 184, 216, 34);
pub const MX1_EXAMPLE: Ipv4Addr = Ipv4Addr::new(192, 0, 2, 25);

pub fn v4(address: Ipv4Addr) -> IpAddr {
    IpAddr::V4(address)
}

pub fn root_hints() -> Vec<IpAddr> {
    vec![v4(ROOT_A)]
}

/// Root and `com` both delegate; a.iana-servers.net is authoritative for
/// example.com.
pub fn example_network() -> MockNetwork {
    MockNetwork::new()
        .server(v4(ROOT_A), |q| {
            referral(q, "com", &[("a.gtld-servers.net", Some(GTLD_A))])
        })
        .server(v4(GTLD_A), |q| {
            referral(q, "example.com", &[("a.iana-servers.net", Some(IANA_A))])
        })
        .server(v4(IANA_A), example_zone)
}

pub fn example_zone(q: &Message) -> Reply {
    match (query_name(q).as_str(), query_type(q)) {
        ("www.example.com", RecordType::A) => answer_a(q, &[WWW_EXAMPLE]),
        ("alias.example.com", _) => answer_cname(q, "www.example.com"),
        ("example.com", RecordType::MX) => {
            answer_mx(q, &[(20, "mx2.example.com"), (10, "mx1.example.com")])
        }
        ("mx1.example.com", RecordType::A) => answer_a(q, &[MX1_EXAMPLE]),
        ("www.example.com", _) | ("example.com", _) | ("mx1.example.com", _) => nodata(q),
        _ => rcode(q, Rcode::NxDomain, true),
    }
}
