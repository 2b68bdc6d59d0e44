//! Demo CLI: loads a map of cluster name -> balancer configuration and
//! drives `create_client` against an in-process fake DNS/session pair, so
//! an operator can watch policy behavior without a real ZooKeeper
//! ensemble. Mirrors the teacher's `main.rs` shape: parse args, load
//! config, build components, drive, log the outcome.

extern crate clap;
extern crate env_logger;
extern crate rand;
extern crate zk_balance;
#[macro_use]
extern crate log;

use clap::{App, Arg};
use rand::Rng;
use std::collections::HashMap;
use std::error::Error as StdError;
use std::fmt;
use std::fs;
use zk_balance::{
    Balancer, BalancerConfig, ConnectRequest, DnsOutcome, DnsProbe, Session, SessionConstructor,
};

fn main() {
    env_logger::init();

    let opts = App::new("zk-balance-probe")
        .version("0.1.0")
        .about("Drives the connection balancer against fake collaborators")
        .arg(Arg::with_name("CONFIG").required(true).index(1).help("Cluster config path (YAML or JSON)"))
        .arg(
            Arg::with_name("dns-failure-rate")
                .long("dns-failure-rate")
                .takes_value(true)
                .default_value("0.0"),
        )
        .arg(
            Arg::with_name("session-failure-rate")
                .long("session-failure-rate")
                .takes_value(true)
                .default_value("0.0"),
        )
        .get_matches();

    let config_path = opts.value_of("CONFIG").unwrap();
    let dns_failure_rate: f64 = opts.value_of("dns-failure-rate").unwrap().parse().expect("invalid rate");
    let session_failure_rate: f64 =
        opts.value_of("session-failure-rate").unwrap().parse().expect("invalid rate");

    let text = fs::read_to_string(config_path).expect("could not read config file");
    let clusters = parse_clusters(&text).expect("configuration error");

    let local_hostname = zk_balance::local_hostname().unwrap_or_else(|_| "localhost".to_string());
    let dns = FlakyDns { failure_rate: dns_failure_rate };
    let session_ctor = FlakySessionConstructor { failure_rate: session_failure_rate };

    for (name, config) in clusters {
        info!("cluster '{}': {} hosts, policy {:?}", name, config.hosts.len(), config.policy);
        let balancer = match Balancer::new(&config, &local_hostname) {
            Ok(b) => b,
            Err(e) => {
                error!("cluster '{}': {}", name, e);
                continue;
            }
        };
        let lifetime = (config.fallback_session_lifetime.min_sec, config.fallback_session_lifetime.max_sec);
        match zk_balance::create_client(&balancer, &dns, &session_ctor, lifetime) {
            Ok(_) => info!("cluster '{}': connected", name),
            Err(e) => error!("cluster '{}': {}", name, e),
        }
    }
}

fn parse_clusters(text: &str) -> Result<HashMap<String, BalancerConfig>, zk_balance::ConfigError> {
    let trimmed = text.trim_start();
    if trimmed.starts_with('{') {
        Ok(serde_json::from_str(trimmed)?)
    } else {
        Ok(serde_yaml::from_str(trimmed)?)
    }
}

struct FlakyDns {
    failure_rate: f64,
}

impl DnsProbe for FlakyDns {
    fn probe(&self, address: &str) -> DnsOutcome {
        if rand::thread_rng().gen_bool(self.failure_rate.clamp(0.0, 1.0)) {
            debug!("{}: simulated DNS failure", address);
            DnsOutcome::Transient
        } else {
            DnsOutcome::Ok
        }
    }
}

#[derive(Debug)]
struct SimulatedFailure;
impl fmt::Display for SimulatedFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "simulated session construction failure")
    }
}
impl StdError for SimulatedFailure {}

struct FakeSession;
impl Session for FakeSession {
    fn set_client_session_deadline(&mut self, min_sec: u64, max_sec: u64) -> u64 {
        rand::thread_rng().gen_range(min_sec..=max_sec)
    }
}

struct FlakySessionConstructor {
    failure_rate: f64,
}

impl SessionConstructor for FlakySessionConstructor {
    type Session = FakeSession;

    fn construct(&self, req: &ConnectRequest) -> Result<FakeSession, Box<dyn StdError>> {
        if rand::thread_rng().gen_bool(self.failure_rate.clamp(0.0, 1.0)) {
            Err(Box::new(SimulatedFailure))
        } else {
            debug!("{}: connected (secure={})", req.address, req.secure);
            Ok(FakeSession)
        }
    }
}
