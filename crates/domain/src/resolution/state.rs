use crate::config::ResolverConfig;
use crate::message::Question;
use crate::{DomainName, ResolveError};
use std::collections::{HashSet, VecDeque};
use std::net::IpAddr;

/// Budgets a lookup starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionLimits {
    pub max_depth: u32,
    pub max_cname_redirects: u32,
}

impl Default for ResolutionLimits {
    fn default() -> Self {
        Self {
            max_depth: 30,
            max_cname_redirects: 8,
        }
    }
}

impl From<&ResolverConfig> for ResolutionLimits {
    fn from(config: &ResolverConfig) -> Self {
        Self {
            max_depth: config.max_depth,
            max_cname_redirects: config.max_cname_redirects,
        }
    }
}

/// Mutable progress of one lookup.
///
/// The visited set is scoped to the current question: a CNAME restart
/// clears it, a nested lookup starts with its own.
#[derive(Debug, Clone)]
pub struct ResolutionState {
    query_id: u16,
    question: Question,
    /// Zone the current candidates were delegated for.
    zone: DomainName,
    candidates: Vec<IpAddr>,
    /// Nameservers of the current zone that came without glue, resolved
    /// only once every known candidate has failed.
    unresolved: VecDeque<DomainName>,
    visited: HashSet<IpAddr>,
    cname_budget: u32,
    depth_budget: u32,
    limits: ResolutionLimits,
    /// Names of the enclosing lookups that spawned this one.
    lineage: Vec<DomainName>,
}

impl ResolutionState {
    pub fn new(question: Question, root_hints: &[IpAddr], limits: ResolutionLimits) -> Self {
        Self {
            query_id: 0,
            question,
            zone: DomainName::root(),
            candidates: root_hints.to_vec(),
            unresolved: VecDeque::new(),
            visited: HashSet::new(),
            cname_budget: limits.max_cname_redirects,
            depth_budget: limits.max_depth,
            limits,
            lineage: Vec::new(),
        }
    }

    /// State for resolving a nameserver address on behalf of this lookup.
    /// Gets one less level of depth and a fresh CNAME budget.
    pub fn nested(&self, question: Question, root_hints: &[IpAddr]) -> Result<Self, ResolveError> {
        let depth = self
            .depth_budget
            .checked_sub(1)
            .ok_or(ResolveError::MaxDepthExceeded)?;
        let mut nested = Self::new(question, root_hints, self.limits);
        nested.depth_budget = depth;
        nested.lineage = self.lineage.clone();
        nested.lineage.push(self.question.name.clone());
        Ok(nested)
    }

    /// True if `name` is the target of this lookup or of one enclosing it.
    pub fn is_resolving(&self, name: &DomainName) -> bool {
        self.question.name == *name || self.lineage.contains(name)
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn query_id(&self) -> u16 {
        self.query_id
    }

    pub fn set_query_id(&mut self, id: u16) {
        self.query_id = id;
    }

    pub fn zone(&self) -> &DomainName {
        &self.zone
    }

    pub fn candidates(&self) -> &[IpAddr] {
        &self.candidates
    }

    /// Next glueless nameserver of the current zone, if any remain.
    pub fn next_unresolved(&mut self) -> Option<DomainName> {
        self.unresolved.pop_front()
    }

    /// Appends addresses found for a glueless nameserver to the current
    /// candidates and returns how many were new.
    pub fn extend_candidates(&mut self, addresses: Vec<IpAddr>) -> usize {
        let before = self.candidates.len();
        for server in addresses {
            if !self.visited.contains(&server) && !self.candidates.contains(&server) {
                self.candidates.push(server);
            }
        }
        self.candidates.len() - before
    }

    pub fn depth_remaining(&self) -> u32 {
        self.depth_budget
    }

    pub fn cname_remaining(&self) -> u32 {
        self.cname_budget
    }

    pub fn has_visited(&self, server: &IpAddr) -> bool {
        self.visited.contains(server)
    }

    /// Returns false if the server was already queried for this question.
    pub fn record_visit(&mut self, server: IpAddr) -> bool {
        self.visited.insert(server)
    }

    /// Moves one level down the delegation tree into `zone`.
    ///
    /// `glue` becomes the candidate list, minus servers already queried for
    /// this question; `unresolved` names are kept for later. A referral
    /// whose glue was all visited and which names nothing else is a loop.
    pub fn descend(
        &mut self,
        zone: DomainName,
        glue: Vec<IpAddr>,
        unresolved: Vec<DomainName>,
    ) -> Result<(), ResolveError> {
        if self.depth_budget == 0 {
            return Err(ResolveError::MaxDepthExceeded);
        }
        if glue.is_empty() && unresolved.is_empty() {
            return Err(ResolveError::NoCandidates);
        }

        let mut fresh = Vec::with_capacity(glue.len());
        for server in glue {
            if !self.visited.contains(&server) && !fresh.contains(&server) {
                fresh.push(server);
            }
        }
        if fresh.is_empty() && unresolved.is_empty() {
            return Err(ResolveError::ReferralLoop);
        }

        self.depth_budget -= 1;
        self.zone = zone;
        self.candidates = fresh;
        self.unresolved = unresolved.into();
        Ok(())
    }

    /// Charges `links` CNAMEs against the redirect budget.
    pub fn follow_aliases(&mut self, links: u32) -> Result<(), ResolveError> {
        self.cname_budget = self
            .cname_budget
            .checked_sub(links)
            .ok_or(ResolveError::TooManyRedirects)?;
        Ok(())
    }

    /// Restarts from the root for `target`, reached through `links`
    /// CNAMEs, keeping the remaining depth.
    pub fn redirect(
        &mut self,
        target: DomainName,
        links: u32,
        root_hints: &[IpAddr],
    ) -> Result<(), ResolveError> {
        self.follow_aliases(links.max(1))?;
        self.question = Question {
            name: target,
            ..self.question.clone()
        };
        self.zone = DomainName::root();
        self.candidates = root_hints.to_vec();
        self.unresolved.clear();
        self.visited.clear();
        Ok(())
    }
}
