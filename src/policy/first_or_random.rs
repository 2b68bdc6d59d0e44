//! First-or-random policy (C4): strongly prefers endpoint 0, falling back
//! to a uniform random pick among the rest when 0 is unavailable.

use super::{EndpointInfo, SessionSettings};
use crate::registry::{Registry, Status};
use rand::seq::SliceRandom;

const PRIMARY: usize = 0;

pub struct FirstOrRandom;

impl FirstOrRandom {
    pub fn new() -> FirstOrRandom {
        FirstOrRandom
    }

    pub fn select_next(&self, registry: &Registry) -> EndpointInfo {
        let primary_status = registry.get(PRIMARY).status();

        if primary_status == Status::Online {
            return EndpointInfo::from_registry(registry, PRIMARY, SessionSettings::optimal());
        }

        let online = registry.ids_with_status(Status::Online);
        if !online.is_empty() {
            let id = *online.choose(&mut rand::thread_rng()).unwrap();
            return EndpointInfo::from_registry(registry, id, SessionSettings::fallback());
        }

        if primary_status == Status::Undef {
            return EndpointInfo::from_registry(registry, PRIMARY, SessionSettings::optimal());
        }

        let undef = registry.ids_with_status(Status::Undef);
        let id = *undef
            .choose(&mut rand::thread_rng())
            .expect("caller must ensure available_count() > 0");
        EndpointInfo::from_registry(registry, id, SessionSettings::fallback())
    }

    pub fn has_better(&self, registry: &Registry, current_id: usize) -> bool {
        registry.get(PRIMARY).status() == Status::Online && current_id != PRIMARY
    }

    pub fn worth_checking(&self, registry: &Registry, current_id: Option<usize>) -> Vec<EndpointInfo> {
        if current_id == Some(PRIMARY) {
            return Vec::new();
        }
        vec![EndpointInfo::from_registry(registry, PRIMARY, SessionSettings::optimal())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// §8 property 4: if status(0) is ONLINE or UNDEF, selectNext always
    /// returns id 0.
    #[test]
    fn always_prefers_primary_when_available() {
        let mut r = Registry::new();
        for i in 0..3 {
            r.add(format!("h{}", i), false);
        }
        let p = FirstOrRandom::new();
        assert_eq!(p.select_next(&r).id, 0); // UNDEF
        r.mark_online(0);
        assert_eq!(p.select_next(&r).id, 0); // ONLINE
    }

    #[test]
    fn falls_back_with_fallback_lifetime_when_primary_down() {
        let mut r = Registry::new();
        for i in 0..3 {
            r.add(format!("h{}", i), false);
        }
        r.mark_offline(0);
        r.mark_online(1);
        let p = FirstOrRandom::new();
        let picked = p.select_next(&r);
        assert_eq!(picked.id, 1);
        assert!(picked.settings.use_fallback_session_lifetime);
    }

    #[test]
    fn has_better_true_only_when_primary_online_and_not_current() {
        let mut r = Registry::new();
        r.add("a".into(), false);
        r.add("b".into(), false);
        r.mark_online(0);
        let p = FirstOrRandom::new();
        assert!(p.has_better(&r, 1));
        assert!(!p.has_better(&r, 0));
    }

    #[test]
    fn worth_checking_excludes_primary_when_current() {
        let mut r = Registry::new();
        r.add("a".into(), false);
        r.add("b".into(), false);
        let p = FirstOrRandom::new();
        assert!(p.worth_checking(&r, Some(0)).is_empty());
        assert_eq!(p.worth_checking(&r, Some(1)).len(), 1);
        assert_eq!(p.worth_checking(&r, None).len(), 1);
    }
}
