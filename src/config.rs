//! Configuration input to the balancer (§6): a host list, a policy
//! selection, and the fallback session lifetime range. Parsed from either
//! YAML or JSON the same way the original proxy configuration was: sniff
//! the leading byte and dispatch to the matching serde backend.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Parses `txt` as `BalancerConfig`, trying JSON when it starts with `{`
/// and YAML otherwise.
pub fn from_str(txt: &str) -> Result<BalancerConfig, ConfigError> {
    let trimmed = txt.trim_start();
    let config = if trimmed.starts_with('{') {
        serde_json::from_str(trimmed)?
    } else {
        serde_yaml::from_str(trimmed)?
    };
    Ok(config)
}

/// One named coordination cluster's balancer configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalancerConfig {
    /// Ordered sequence of `host:port` or `secure://host:port` strings.
    /// Order is semantically meaningful for `IN_ORDER` and
    /// `FIRST_OR_RANDOM`.
    pub hosts: Vec<String>,
    pub policy: PolicyKind,
    #[serde(default)]
    pub fallback_session_lifetime: FallbackSessionLifetime,
}

impl BalancerConfig {
    /// Fails with [`ConfigError`] ("ZBADARGUMENTS") when `hosts` is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hosts.is_empty() {
            return Err(ConfigError::new("hosts must not be empty"));
        }
        Ok(())
    }
}

/// The six wire values for `policy` (§6).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyKind {
    Random,
    NearestHostname,
    HostnameLevenshteinDistance,
    InOrder,
    FirstOrRandom,
    RoundRobin,
}

/// `{minSec, maxSec}` with `0 <= minSec <= maxSec`, sampled uniformly for a
/// sub-optimal endpoint's shortened session deadline.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackSessionLifetime {
    pub min_sec: u64,
    pub max_sec: u64,
}

impl Default for FallbackSessionLifetime {
    fn default() -> FallbackSessionLifetime {
        // Matches the common ZooKeeper client default of roughly a third to
        // two thirds of a session timeout measured in minutes; chosen here
        // only as a reasonable always-valid default (0 <= min <= max).
        FallbackSessionLifetime { min_sec: 5, max_sec: 10 }
    }
}

/// Strips a leading `secure://` token and returns `(address, secure)`, per
/// the §3 rule that `secure` is true iff the configuration string carried
/// that prefix.
pub fn parse_host(raw: &str) -> (String, bool) {
    match raw.strip_prefix("secure://") {
        Some(rest) => (rest.to_string(), true),
        None => (raw.to_string(), false),
    }
}
