use crate::ports::DnsTransport;
use crate::services::IterativeResolver;
use rootwalk_domain::{
    DomainName, Message, Question, RData, RecordType, ResolutionState, ResolveError,
};
use std::net::IpAddr;
use tracing::{debug, warn};

/// Nameservers named by a referral, with whatever addresses it carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delegation {
    /// Owner of the NS records.
    pub zone: DomainName,
    pub nameservers: Vec<DomainName>,
    /// IPv4 glue first, then IPv6, in nameserver order.
    pub glue: Vec<IpAddr>,
    /// Nameservers the additional section had no address for.
    pub glueless: Vec<DomainName>,
}

/// Turns a referral into the next set of servers to ask.
pub struct ServerSelector {
    max_glueless_nameservers: usize,
}

impl ServerSelector {
    pub fn new(max_glueless_nameservers: usize) -> Self {
        Self {
            max_glueless_nameservers,
        }
    }

    pub fn delegation(&self, referral: &Message) -> Delegation {
        let mut zone = None;
        let mut nameservers: Vec<DomainName> = Vec::new();
        for record in &referral.authorities {
            if let RData::NS(host) = &record.rdata {
                zone.get_or_insert_with(|| record.name.clone());
                if !nameservers.contains(host) {
                    nameservers.push(host.clone());
                }
            }
        }

        let mut v4 = Vec::new();
        let mut v6 = Vec::new();
        let mut glueless = Vec::new();
        for host in &nameservers {
            let mut glued = false;
            for record in referral
                .additionals
                .iter()
                .filter(|r| r.rtype.is_address() && r.name == *host)
            {
                glued = true;
                match record.address() {
                    Some(ip @ IpAddr::V4(_)) if !v4.contains(&ip) => v4.push(ip),
                    Some(ip @ IpAddr::V6(_)) if !v6.contains(&ip) => v6.push(ip),
                    _ => {}
                }
            }
            if !glued {
                glueless.push(host.clone());
            }
        }
        v4.extend(v6);

        Delegation {
            zone: zone.unwrap_or_else(DomainName::root),
            nameservers,
            glue: v4,
            glueless,
        }
    }

    /// Glueless nameservers worth resolving for `parent`, capped at the
    /// configured count. Names already being resolved further up are
    /// skipped.
    pub fn unresolved(&self, delegation: &Delegation, parent: &ResolutionState) -> Vec<DomainName> {
        delegation
            .glueless
            .iter()
            .filter(|host| {
                let busy = parent.is_resolving(host);
                if busy {
                    debug!(nameserver = %host, "Nameserver is already being resolved");
                }
                !busy
            })
            .take(self.max_glueless_nameservers)
            .cloned()
            .collect()
    }

    /// Resolves one glueless nameserver with a nested lookup.
    ///
    /// A failed lookup yields no addresses; only running out of depth for
    /// the nested lookup is an error.
    pub async fn addresses_of(
        &self,
        resolver: &IterativeResolver,
        transport: &mut dyn DnsTransport,
        host: &DomainName,
        parent: &ResolutionState,
        root_hints: &[IpAddr],
    ) -> Result<Vec<IpAddr>, ResolveError> {
        let question = Question::new(host.clone(), RecordType::A);
        let nested = parent.nested(question, root_hints)?;
        debug!(nameserver = %host, depth = nested.depth_remaining(), "Resolving glueless nameserver");

        match resolver.run(&mut *transport, nested, root_hints).await {
            Ok(answers) => Ok(answers.records.iter().filter_map(|r| r.address()).collect()),
            Err(e) => {
                warn!(nameserver = %host, error = %e, "Nameserver lookup failed");
                Ok(Vec::new())
            }
        }
    }
}
