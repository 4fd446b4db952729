use crate::ports::TransportFactory;
use crate::services::IterativeResolver;
use rootwalk_domain::{
    Answer, AnswerSet, DnsQuery, DomainName, QueryType, Question, RData, RecordType, Resolution,
    ResolveError, ResolverConfig,
};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct ResolveHostnameUseCase {
    transports: Arc<dyn TransportFactory>,
    resolver: IterativeResolver,
}

impl ResolveHostnameUseCase {
    pub fn new(transports: Arc<dyn TransportFactory>, config: ResolverConfig) -> Self {
        Self {
            transports,
            resolver: IterativeResolver::new(config),
        }
    }

    /// Resolves `hostname` starting from `root_hints`.
    ///
    /// One transport is opened per call and dropped on return.
    pub async fn execute(
        &self,
        hostname: &str,
        query_type: QueryType,
        root_hints: &[IpAddr],
    ) -> Result<Resolution, ResolveError> {
        let query = DnsQuery::parse(hostname, query_type)?;
        if root_hints.is_empty() {
            return Err(ResolveError::NoCandidates);
        }

        let mut transport = self.transports.open().await?;
        let question = Question::new(query.name.clone(), query.query_type.record_type());
        let answers = self
            .resolver
            .resolve(transport.as_mut(), question, root_hints)
            .await?;
        debug!(query = %query, canonical = %answers.canonical_name, records = answers.records.len(), "Lookup answered");

        let answer = match query.query_type {
            QueryType::A | QueryType::AAAA => {
                Answer::Address(answers.first_address().ok_or(ResolveError::NoData)?)
            }
            QueryType::MX => {
                let (preference, exchange) =
                    preferred_exchange(&answers).ok_or(ResolveError::NoData)?;
                let question = Question::new(exchange.clone(), RecordType::A);
                let address = match self
                    .resolver
                    .resolve(transport.as_mut(), question, root_hints)
                    .await
                {
                    Ok(found) => found.first_address(),
                    Err(e) => {
                        warn!(exchange = %exchange, error = %e, "Mail exchange address lookup failed");
                        None
                    }
                };
                Answer::MailExchange {
                    preference,
                    exchange,
                    address,
                }
            }
        };

        Ok(Resolution {
            name: answers.canonical_name,
            answer,
        })
    }
}

/// Lowest preference wins; ties keep answer order.
fn preferred_exchange(answers: &AnswerSet) -> Option<(u16, DomainName)> {
    answers
        .records
        .iter()
        .filter_map(|record| match &record.rdata {
            RData::MX {
                preference,
                exchange,
            } => Some((*preference, exchange)),
            _ => None,
        })
        .min_by_key(|(preference, _)| *preference)
        .map(|(preference, exchange)| (preference, exchange.clone()))
}
