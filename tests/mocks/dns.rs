use std::collections::HashSet;
use zk_balance::{DnsOutcome, DnsProbe};

pub struct AlwaysOk;
impl DnsProbe for AlwaysOk {
    fn probe(&self, _address: &str) -> DnsOutcome {
        DnsOutcome::Ok
    }
}

pub struct AllTransient;
impl DnsProbe for AllTransient {
    fn probe(&self, _address: &str) -> DnsOutcome {
        DnsOutcome::Transient
    }
}

/// Resolves everything except the addresses in `not_found`, which come back
/// as `HostNotFound`.
pub struct FailSet(pub HashSet<String>);
impl DnsProbe for FailSet {
    fn probe(&self, address: &str) -> DnsOutcome {
        if self.0.contains(address) {
            DnsOutcome::HostNotFound
        } else {
            DnsOutcome::Ok
        }
    }
}

/// One address comes back `HostNotFound`, everything else `Transient` —
/// exercises the sticky `dnsErrorOccurred` flag against a mix of failure
/// kinds.
pub struct Mixed(pub HashSet<String>);
impl DnsProbe for Mixed {
    fn probe(&self, address: &str) -> DnsOutcome {
        if self.0.contains(address) {
            DnsOutcome::HostNotFound
        } else {
            DnsOutcome::Transient
        }
    }
}
