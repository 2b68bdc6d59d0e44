//! The connection-establishment loop (C7): wraps [`crate::Balancer`] with a
//! DNS pre-check, session construction, the sub-optimal session-lifetime
//! hint, and the "keep looking for a better host" heuristic.
//!
//! DNS resolution and the coordination-protocol session itself are external
//! collaborators (§1's "out of scope"); this module only depends on the two
//! narrow traits below, so the loop can be driven end to end against fakes
//! without a real ensemble. See `tests/connection_loop.rs` for the
//! end-to-end scenarios.

use crate::error::BalancerError;
use crate::policy::EndpointInfo;
use crate::Balancer;
use std::error::Error as StdError;

/// The outcome of probing whether `address` currently resolves, with the
/// two failure modes the loop treats differently (§6/§7).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DnsOutcome {
    Ok,
    HostNotFound,
    Transient,
}

/// Resolves `address` to confirm it is routable before a session is
/// constructed. Implementations are expected to purge any cached
/// resolution for `address` as a side effect, per §6.
pub trait DnsProbe {
    fn probe(&self, address: &str) -> DnsOutcome;
}

/// What the loop hands the session constructor for a selected endpoint.
#[derive(Clone, Debug)]
pub struct ConnectRequest {
    pub address: String,
    pub original_index: usize,
    pub secure: bool,
}

/// A live coordination session. Only the one operation the loop needs is
/// modeled here; the wire protocol itself is out of scope (§1).
pub trait Session {
    /// Shortens the session's deadline to a value the implementation
    /// samples from `[min_sec, max_sec]`, returning the value actually
    /// chosen.
    fn set_client_session_deadline(&mut self, min_sec: u64, max_sec: u64) -> u64;
}

/// Constructs a session for a selected endpoint, or fails. A `None` return
/// cannot happen — failures are `Err`, matching the "exception" case in
/// §4.7 step 3.
pub trait SessionConstructor {
    type Session: Session;
    fn construct(&self, req: &ConnectRequest) -> Result<Self::Session, Box<dyn StdError>>;
}

/// Drives one `createClient` attempt to completion: repeatedly selects an
/// endpoint, DNS-checks it, constructs a session, and either returns it or
/// keeps looking for a strictly better endpoint.
///
/// `fallback_session_lifetime` supplies the `[minSec, maxSec]` range passed
/// to `Session::set_client_session_deadline` when the selected endpoint is
/// sub-optimal.
pub fn create_client<D, C>(
    balancer: &Balancer,
    dns: &D,
    session_ctor: &C,
    fallback_session_lifetime: (u64, u64),
) -> Result<C::Session, BalancerError>
where
    D: DnsProbe,
    C: SessionConstructor,
{
    let mut dns_error_occurred = false;

    loop {
        let endpoint: EndpointInfo = match balancer.select_next() {
            Ok(e) => e,
            Err(BalancerError::AllConnectionTriesFailed) => {
                return Err(if dns_error_occurred {
                    BalancerError::ConnectionLossDns
                } else {
                    BalancerError::ConnectionLoss
                });
            }
            Err(e) => return Err(e),
        };

        match dns.probe(&endpoint.address) {
            DnsOutcome::HostNotFound => {
                debug!("{}: host not found", endpoint.address);
                balancer.mark_offline(endpoint.id);
                continue;
            }
            DnsOutcome::Transient => {
                warn!("{}: transient DNS error", endpoint.address);
                dns_error_occurred = true;
                balancer.mark_offline(endpoint.id);
                continue;
            }
            DnsOutcome::Ok => {}
        }

        let req = ConnectRequest {
            address: endpoint.address.clone(),
            original_index: endpoint.id,
            secure: endpoint.secure,
        };
        let mut session = match session_ctor.construct(&req) {
            Ok(session) => session,
            Err(e) => {
                debug!("{}: session construction failed: {}", endpoint.address, e);
                balancer.mark_offline(endpoint.id);
                continue;
            }
        };

        balancer.mark_online(endpoint.id);

        if endpoint.settings.use_fallback_session_lifetime {
            let (min_sec, max_sec) = fallback_session_lifetime;
            let actual = session.set_client_session_deadline(min_sec, max_sec);
            debug!("{}: sub-optimal endpoint, session deadline shortened to {}s",
                   endpoint.address, actual);
        }

        if balancer.has_better(endpoint.id) {
            debug!("{}: a better endpoint is available, discarding and retrying",
                   endpoint.address);
            drop(session);
            continue;
        }

        return Ok(session);
    }
}
