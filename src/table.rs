//! Process-wide registry of balancers keyed by cluster configuration name
//! (C11). Built eagerly from a known set of configurations so there is no
//! first-use construction race, per the design notes' "avoid first-use
//! initialization races by constructing eagerly".

use crate::config::BalancerConfig;
use crate::error::ConfigError;
use crate::{Balancer, SharedBalancer};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub struct BalancerTable {
    balancers: Mutex<HashMap<String, Arc<SharedBalancer>>>,
}

impl BalancerTable {
    /// Constructs every named balancer up front; a single bad configuration
    /// fails the whole table rather than lazily surfacing later. Each
    /// balancer is wrapped in its own mutex (§5): the facade itself has no
    /// internal synchronization, so this is the "single mutex" that lets
    /// threads safely share one balancer instance per cluster.
    pub fn new(
        configs: Vec<(String, BalancerConfig)>,
        local_hostname: &str,
    ) -> Result<BalancerTable, ConfigError> {
        let mut balancers = HashMap::with_capacity(configs.len());
        for (name, config) in configs {
            config.validate()?;
            let balancer = Balancer::new(&config, local_hostname)?;
            info!("balancer table: constructed '{}' with {} hosts", name, balancer.total_count());
            balancers.insert(name, Arc::new(Mutex::new(balancer)));
        }
        Ok(BalancerTable { balancers: Mutex::new(balancers) })
    }

    /// Looks up the balancer for `name`. The only read path into the table.
    pub fn get(&self, name: &str) -> Option<Arc<SharedBalancer>> {
        self.balancers.lock().expect("balancer table mutex poisoned").get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.balancers.lock().expect("balancer table mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FallbackSessionLifetime, PolicyKind};

    fn config(hosts: &[&str]) -> BalancerConfig {
        BalancerConfig {
            hosts: hosts.iter().map(|s| s.to_string()).collect(),
            policy: PolicyKind::RoundRobin,
            fallback_session_lifetime: FallbackSessionLifetime::default(),
        }
    }

    #[test]
    fn constructs_every_named_balancer_eagerly() {
        let configs = vec![
            ("prod".to_string(), config(&["a:2181", "b:2181"])),
            ("staging".to_string(), config(&["c:2181"])),
        ];
        let table = BalancerTable::new(configs, "local").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("prod").unwrap().lock().unwrap().total_count(), 2);
        assert!(table.get("missing").is_none());
    }

    #[test]
    fn rejects_any_bad_configuration() {
        let configs = vec![("empty".to_string(), config(&[]))];
        assert!(BalancerTable::new(configs, "local").is_err());
    }
}
