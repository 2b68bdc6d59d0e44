//! Client-side connection balancer for a ZooKeeper-style coordination service.
//!
//! Given a static list of candidate endpoints and a load-balancing policy, the
//! balancer picks an endpoint to connect to, tracks each endpoint's liveness as
//! probing and usage proceeds, and drives a reconnection loop that prefers
//! higher-ranked endpoints whenever they are available.
//!
//! The wire protocol, DNS resolution and socket construction are treated as
//! external collaborators (see [`loop_`]) so this crate owns only the policy
//! logic: priority, failover, reset semantics and the "keep looking for a
//! better host" loop.

#[macro_use]
extern crate log;
extern crate hostname;
extern crate rand;
extern crate serde;
extern crate serde_json;
extern crate serde_yaml;

pub mod config;
pub mod distance;
pub mod error;
pub mod loop_;
pub mod policy;
pub mod registry;
pub mod table;

pub use config::{BalancerConfig, FallbackSessionLifetime, PolicyKind};
pub use error::{BalancerError, ConfigError};
pub use loop_::{create_client, ConnectRequest, DnsOutcome, DnsProbe, Session, SessionConstructor};
pub use policy::{EndpointInfo, Policy, SessionSettings};
pub use registry::{Endpoint, Registry, Status};
pub use table::BalancerTable;

use std::io;
use std::sync::Mutex;

/// The local hostname, used by the nearest-hostname and Levenshtein-distance
/// priority strategies (§6's `localHostname()`).
pub fn local_hostname() -> io::Result<String> {
    hostname::get()?
        .into_string()
        .map_err(|os| io::Error::new(io::ErrorKind::InvalidData, format!("non-utf8 hostname: {:?}", os)))
}

/// Uniform interface over the five load-balancing policies, used by the
/// connection loop. Construction is infallible once a [`BalancerConfig`] has
/// already been validated; see [`config::BalancerConfig::validate`].
pub struct Balancer {
    registry: Registry,
    policy: Policy,
}

impl Balancer {
    /// Builds a balancer from a validated configuration and, for the
    /// priority policies that need it, the local hostname.
    pub fn new(cfg: &BalancerConfig, local_hostname: &str) -> Result<Balancer, ConfigError> {
        if cfg.hosts.is_empty() {
            return Err(ConfigError::new("hosts must not be empty"));
        }
        let mut registry = Registry::new();
        for host in &cfg.hosts {
            let (address, secure) = config::parse_host(host);
            registry.add(address, secure);
        }
        let policy = Policy::new(cfg.policy, &registry, local_hostname);
        Ok(Balancer { registry, policy })
    }

    /// Selects the next endpoint to attempt, per the active policy.
    ///
    /// Resets every `OFFLINE` endpoint to `UNDEF` and fails with
    /// [`BalancerError::AllConnectionTriesFailed`] when no endpoint is
    /// currently `ONLINE` or `UNDEF`.
    pub fn select_next(&self) -> Result<EndpointInfo, BalancerError> {
        if self.registry.available_count() == 0 {
            info!("all {} endpoints exhausted, resetting offline statuses",
                  self.registry.size());
            self.registry.reset_offline();
            return Err(BalancerError::AllConnectionTriesFailed);
        }
        Ok(self.policy.select_next(&self.registry))
    }

    pub fn mark_online(&self, id: usize) {
        debug!("endpoint {} ({}): online", id, self.registry.get(id).address);
        self.registry.mark_online(id);
    }

    pub fn mark_offline(&self, id: usize) {
        debug!("endpoint {} ({}): offline", id, self.registry.get(id).address);
        self.registry.mark_offline(id);
    }

    pub fn reset_offline(&self) {
        self.registry.reset_offline();
    }

    pub fn total_count(&self) -> usize {
        self.registry.size()
    }

    pub fn available_count(&self) -> usize {
        self.registry.available_count()
    }

    /// Endpoints the caller might speculatively probe in the background.
    /// Empty for policies with no notion of "better than current".
    pub fn worth_checking(&self, current_id: Option<usize>) -> Vec<EndpointInfo> {
        self.policy.worth_checking(&self.registry, current_id)
    }

    /// True iff a strictly preferred endpoint is currently `ONLINE`.
    pub fn has_better(&self, current_id: usize) -> bool {
        self.policy.has_better(&self.registry, current_id)
    }
}

/// Wraps a [`Balancer`] behind a mutex: the facade is not internally
/// synchronized (selection and marking are meant to run serially within one
/// connection loop), so callers sharing an instance across threads must
/// serialize access themselves. See [`BalancerTable`] for the process-wide
/// registry that does this once per named cluster.
pub type SharedBalancer = Mutex<Balancer>;
