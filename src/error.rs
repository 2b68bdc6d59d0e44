//! Error types, in the teacher's style: small newtypes with a hand-written
//! `Display`/`Error` impl rather than a derive-macro error crate.

use std::error::Error;
use std::fmt;

/// Errors surfaced by the connection loop (§6/§7 of the design).
///
/// `AllConnectionTriesFailed` is an internal sentinel raised by
/// [`crate::Balancer::select_next`]; [`crate::create_client`] translates it
/// into one of the other two variants depending on whether a DNS error was
/// observed during the attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalancerError {
    /// Raised by selection when no endpoint is `ONLINE` or `UNDEF`. Not
    /// meant to escape the crate; see `create_client`.
    AllConnectionTriesFailed,
    /// `ZCONNECTIONLOSS`: "Cannot resolve any of provided ZooKeeper hosts
    /// due to DNS error". Surfaced when `dnsErrorOccurred` was set during
    /// the attempt.
    ConnectionLossDns,
    /// `ZCONNECTIONLOSS`: "Cannot use any of provided ZooKeeper nodes".
    ConnectionLoss,
    /// `ZBADARGUMENTS`: the configured host list was empty.
    BadArguments,
}

impl fmt::Display for BalancerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            BalancerError::AllConnectionTriesFailed => {
                write!(f, "all connection tries failed")
            }
            BalancerError::ConnectionLossDns => {
                write!(f, "Cannot resolve any of provided ZooKeeper hosts due to DNS error")
            }
            BalancerError::ConnectionLoss => {
                write!(f, "Cannot use any of provided ZooKeeper nodes")
            }
            BalancerError::BadArguments => write!(f, "hosts must not be empty"),
        }
    }
}

impl Error for BalancerError {
    fn description(&self) -> &str {
        match *self {
            BalancerError::AllConnectionTriesFailed => "all connection tries failed",
            BalancerError::ConnectionLossDns => {
                "Cannot resolve any of provided ZooKeeper hosts due to DNS error"
            }
            BalancerError::ConnectionLoss => "Cannot use any of provided ZooKeeper nodes",
            BalancerError::BadArguments => "hosts must not be empty",
        }
    }
}

/// Construction-time configuration failure: empty host list, or a
/// YAML/JSON parse error while loading a [`crate::config::BalancerConfig`].
#[derive(Debug, Clone)]
pub struct ConfigError(String);

impl ConfigError {
    pub fn new<S: Into<String>>(msg: S) -> ConfigError {
        ConfigError(msg.into())
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Error for ConfigError {
    fn description(&self) -> &str {
        &self.0
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(e: serde_yaml::Error) -> ConfigError {
        ConfigError(format!("invalid yaml configuration: {}", e))
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> ConfigError {
        ConfigError(format!("invalid json configuration: {}", e))
    }
}

impl<'a> From<&'a str> for ConfigError {
    fn from(s: &'a str) -> ConfigError {
        ConfigError(s.to_string())
    }
}
