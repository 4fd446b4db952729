use crate::ports::DnsTransport;
use crate::services::ServerSelector;
use futures::future::{BoxFuture, FutureExt};
use rootwalk_domain::{
    classify_within, AnswerSet, Classification, DecodeError, Message, Question, Rcode,
    ResolutionLimits, ResolutionState, ResolveError, ResolverConfig, ResponseError,
    TransportError,
};
use std::net::{IpAddr, SocketAddr};
use tokio::time::Instant;
use tracing::{debug, warn};

/// Why a single server attempt produced nothing usable.
#[derive(Debug, thiserror::Error)]
enum AttemptError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("undecodable response: {0}")]
    Decode(#[from] DecodeError),
}

/// Walks the delegation tree from the root hints down to an answer.
pub struct IterativeResolver {
    config: ResolverConfig,
    selector: ServerSelector,
}

impl IterativeResolver {
    pub fn new(config: ResolverConfig) -> Self {
        let selector = ServerSelector::new(config.max_glueless_nameservers);
        Self { config, selector }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub async fn resolve(
        &self,
        transport: &mut dyn DnsTransport,
        question: Question,
        root_hints: &[IpAddr],
    ) -> Result<AnswerSet, ResolveError> {
        if root_hints.is_empty() {
            return Err(ResolveError::NoCandidates);
        }
        let state = ResolutionState::new(
            question,
            root_hints,
            ResolutionLimits::from(&self.config),
        );
        self.run(transport, state, root_hints).await
    }

    /// Drives one lookup to a terminal outcome. Boxed because nameserver
    /// address lookups re-enter it.
    ///
    /// Each hop tries the known candidates in order; glueless nameservers of
    /// the current zone are resolved one at a time only after those fail.
    pub(crate) fn run<'a>(
        &'a self,
        transport: &'a mut dyn DnsTransport,
        mut state: ResolutionState,
        root_hints: &'a [IpAddr],
    ) -> BoxFuture<'a, Result<AnswerSet, ResolveError>> {
        async move {
            'hop: loop {
                let mut position = 0usize;
                let mut attempted = 0usize;
                let mut responsive = 0usize;
                let mut dead_referrals = 0usize;
                let mut revisits = 0usize;

                loop {
                    let Some(server) = state.candidates().get(position).copied() else {
                        let Some(host) = state.next_unresolved() else {
                            break;
                        };
                        let addresses = self
                            .selector
                            .addresses_of(self, &mut *transport, &host, &state, root_hints)
                            .await?;
                        if !addresses.is_empty() && state.extend_candidates(addresses) == 0 {
                            revisits += 1;
                        }
                        continue;
                    };
                    position += 1;
                    attempted += 1;
                    state.record_visit(server);

                    let response = match self.exchange(&mut *transport, &mut state, server).await {
                        Ok(response) => response,
                        Err(e) => {
                            warn!(server = %server, name = %state.question().name, position, error = %e, "Server attempt failed");
                            continue;
                        }
                    };
                    responsive += 1;

                    let classification = classify_within(&response, state.question(), state.zone());
                    debug!(
                        server = %server,
                        name = %state.question().name,
                        zone = %state.zone(),
                        outcome = classification.kind(),
                        depth = state.depth_remaining(),
                        "Classified response"
                    );

                    match classification {
                        Classification::AuthoritativeAnswer { records, links } => {
                            state.follow_aliases(links)?;
                            let canonical_name = records
                                .first()
                                .map(|record| record.name.clone())
                                .unwrap_or_else(|| state.question().name.clone());
                            return Ok(AnswerSet {
                                canonical_name,
                                records,
                            });
                        }
                        Classification::CName { target, links } => {
                            debug!(from = %state.question().name, to = %target, links, remaining = state.cname_remaining(), "Following CNAME");
                            state.redirect(target, links, root_hints)?;
                            continue 'hop;
                        }
                        Classification::Referral => {
                            if state.depth_remaining() == 0 {
                                return Err(ResolveError::MaxDepthExceeded);
                            }
                            let delegation = self.selector.delegation(&response);
                            let unresolved = self.selector.unresolved(&delegation, &state);
                            if delegation.glue.is_empty() && unresolved.is_empty() {
                                warn!(server = %server, name = %state.question().name, zone = %delegation.zone, "Referral has no usable nameserver");
                                dead_referrals += 1;
                                continue;
                            }
                            debug!(
                                zone = %delegation.zone,
                                glue = delegation.glue.len(),
                                glueless = unresolved.len(),
                                "Descending"
                            );
                            state.descend(delegation.zone, delegation.glue, unresolved)?;
                            continue 'hop;
                        }
                        Classification::Error(ResponseError::Rcode(Rcode::NxDomain)) => {
                            return Err(ResolveError::NotFound);
                        }
                        Classification::Error(ResponseError::NoData) => {
                            return Err(ResolveError::NoData);
                        }
                        Classification::Error(e) => {
                            warn!(server = %server, name = %state.question().name, error = %e, "Server returned an error");
                        }
                    }
                }

                if attempted == 0 {
                    if revisits > 0 {
                        return Err(ResolveError::ReferralLoop);
                    }
                    return Err(ResolveError::NoCandidates);
                }
                if dead_referrals == responsive && responsive > 0 {
                    return Err(ResolveError::NoCandidates);
                }
                return Err(ResolveError::AllServersUnreachable);
            }
        }
        .boxed()
    }

    /// Sends one query and waits for the datagram that answers it.
    ///
    /// Datagrams with the wrong id, without QR, or echoing a different
    /// question are dropped and the wait resumes until the deadline.
    async fn exchange(
        &self,
        transport: &mut dyn DnsTransport,
        state: &mut ResolutionState,
        server: IpAddr,
    ) -> Result<Message, AttemptError> {
        state.set_query_id(fastrand::u16(..));
        let id = state.query_id();
        let question = state.question().clone();

        let query = Message::encode_query(id, &question.name, question.qtype);
        let addr = SocketAddr::new(server, self.config.server_port);

        debug!(server = %addr, name = %question.name, qtype = %question.qtype, id, "Sending query");
        transport.send(addr, &query).await?;

        let deadline = Instant::now() + self.config.query_timeout();
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(TransportError::Timeout.into());
            }

            let datagram = transport.receive(remaining).await?;

            if datagram.len() >= 2 && u16::from_be_bytes([datagram[0], datagram[1]]) != id {
                warn!(server = %addr, expected = id, "Ignoring datagram with mismatched id");
                continue;
            }

            let message = Message::decode(&datagram)?;
            if !message.is_response() || !message.echoes(&question) {
                warn!(server = %addr, id, "Ignoring datagram that does not answer the query");
                continue;
            }
            return Ok(message);
        }
    }
}
