//! The five load-balancing policies (C2–C5) behind one tagged-variant
//! facade (C6's strategy half — the registry-owning half lives on
//! [`crate::Balancer`]).
//!
//! A closed `enum` rather than a trait object, per the design notes:
//! dispatch happens only in the connection loop, so the extra indirection
//! of `Box<dyn Trait>` buys nothing, and an exhaustive `match` means adding
//! a sixth policy is a compile error everywhere it needs handling.

mod first_or_random;
mod priority;
mod random;
mod round_robin;

use crate::config::PolicyKind;
use crate::registry::Registry;

/// Instruction to the caller about how long the new session should live.
/// `Fallback` means the selected endpoint is sub-optimal under the active
/// policy, so the caller should shorten its session deadline and
/// re-consult the balancer sooner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionSettings {
    pub use_fallback_session_lifetime: bool,
}

impl SessionSettings {
    fn optimal() -> SessionSettings {
        SessionSettings { use_fallback_session_lifetime: false }
    }

    fn fallback() -> SessionSettings {
        SessionSettings { use_fallback_session_lifetime: true }
    }
}

/// The result of a selection: enough information for the connection loop to
/// probe DNS, construct a session, and report the outcome back by id.
#[derive(Clone, Debug)]
pub struct EndpointInfo {
    pub id: usize,
    pub address: String,
    pub secure: bool,
    pub settings: SessionSettings,
}

impl EndpointInfo {
    fn new(id: usize, address: String, secure: bool, settings: SessionSettings) -> EndpointInfo {
        EndpointInfo { id, address, secure, settings }
    }

    fn from_registry(registry: &Registry, id: usize, settings: SessionSettings) -> EndpointInfo {
        let e = registry.get(id);
        EndpointInfo::new(id, e.address, e.secure, settings)
    }
}

/// One of the five selection strategies, holding whatever per-policy state
/// it needs (a round-robin cursor, a precomputed priority vector).
pub enum Policy {
    Random(random::Random),
    RoundRobin(round_robin::RoundRobin),
    FirstOrRandom(first_or_random::FirstOrRandom),
    Priority(priority::Priority),
}

impl Policy {
    /// Builds the policy named by `kind`. `local_hostname` is only consumed
    /// by the two hostname-distance priority strategies.
    pub fn new(kind: PolicyKind, registry: &Registry, local_hostname: &str) -> Policy {
        match kind {
            PolicyKind::Random => Policy::Random(random::Random::new()),
            PolicyKind::RoundRobin => Policy::RoundRobin(round_robin::RoundRobin::new()),
            PolicyKind::FirstOrRandom => {
                Policy::FirstOrRandom(first_or_random::FirstOrRandom::new())
            }
            PolicyKind::InOrder => {
                Policy::Priority(priority::Priority::in_order(registry))
            }
            PolicyKind::NearestHostname => {
                Policy::Priority(priority::Priority::nearest_hostname(registry, local_hostname))
            }
            PolicyKind::HostnameLevenshteinDistance => {
                Policy::Priority(priority::Priority::levenshtein(registry, local_hostname))
            }
        }
    }

    /// Picks an `ONLINE`-or-`UNDEF` endpoint. Callers must have already
    /// checked `registry.available_count() > 0` (see
    /// [`crate::Balancer::select_next`]); each policy implementation relies
    /// on this and does not itself reset-and-fail.
    pub fn select_next(&self, registry: &Registry) -> EndpointInfo {
        match *self {
            Policy::Random(ref p) => p.select_next(registry),
            Policy::RoundRobin(ref p) => p.select_next(registry),
            Policy::FirstOrRandom(ref p) => p.select_next(registry),
            Policy::Priority(ref p) => p.select_next(registry),
        }
    }

    pub fn has_better(&self, registry: &Registry, current_id: usize) -> bool {
        match *self {
            Policy::Random(ref p) => p.has_better(registry, current_id),
            Policy::RoundRobin(ref p) => p.has_better(registry, current_id),
            Policy::FirstOrRandom(ref p) => p.has_better(registry, current_id),
            Policy::Priority(ref p) => p.has_better(registry, current_id),
        }
    }

    pub fn worth_checking(&self, registry: &Registry, current_id: Option<usize>) -> Vec<EndpointInfo> {
        match *self {
            Policy::Random(ref p) => p.worth_checking(registry, current_id),
            Policy::RoundRobin(ref p) => p.worth_checking(registry, current_id),
            Policy::FirstOrRandom(ref p) => p.worth_checking(registry, current_id),
            Policy::Priority(ref p) => p.worth_checking(registry, current_id),
        }
    }
}
