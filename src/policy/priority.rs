//! Priority-ordered policy (C5): assigns a non-negative integer priority to
//! each endpoint once, at construction, via one of three pluggable
//! functions (in-order, nearest-hostname prefix distance, Levenshtein
//! distance). Lower priorities rank higher; ties break on the lowest id.

use super::{EndpointInfo, SessionSettings};
use crate::distance;
use crate::registry::{Registry, Status};

pub struct Priority {
    /// Indexed by endpoint id.
    priorities: Vec<usize>,
    /// Precomputed once at construction (design notes §9), rather than
    /// rescanned on every selection.
    min_priority: usize,
}

impl Priority {
    fn from_priorities(priorities: Vec<usize>) -> Priority {
        let min_priority = priorities.iter().copied().min().unwrap_or(0);
        Priority { priorities, min_priority }
    }

    pub fn in_order(registry: &Registry) -> Priority {
        let priorities = (0..registry.size()).collect();
        Priority::from_priorities(priorities)
    }

    pub fn nearest_hostname(registry: &Registry, local_hostname: &str) -> Priority {
        let priorities = registry
            .snapshot()
            .iter()
            .map(|e| distance::prefix_distance(local_hostname, &e.address))
            .collect();
        Priority::from_priorities(priorities)
    }

    pub fn levenshtein(registry: &Registry, local_hostname: &str) -> Priority {
        let priorities = registry
            .snapshot()
            .iter()
            .map(|e| distance::levenshtein(local_hostname, &e.address))
            .collect();
        Priority::from_priorities(priorities)
    }

    /// Lowest-priority id among `ids`, breaking ties on the lowest id.
    /// `ids` must already be in ascending id order (as returned by
    /// `Registry::ids_with_status`), so the first minimum found wins ties.
    fn best_of(&self, ids: &[usize]) -> Option<usize> {
        ids.iter()
            .copied()
            .min_by_key(|&id| self.priorities[id])
    }

    pub fn select_next(&self, registry: &Registry) -> EndpointInfo {
        let online = registry.ids_with_status(Status::Online);
        let picked = self
            .best_of(&online)
            .or_else(|| self.best_of(&registry.ids_with_status(Status::Undef)))
            .expect("caller must ensure available_count() > 0");

        let settings = if self.priorities[picked] == self.min_priority {
            SessionSettings::optimal()
        } else {
            SessionSettings::fallback()
        };
        EndpointInfo::from_registry(registry, picked, settings)
    }

    /// True iff the best `ONLINE` endpoint is not `current_id`.
    pub fn has_better(&self, registry: &Registry, current_id: usize) -> bool {
        let online = registry.ids_with_status(Status::Online);
        match self.best_of(&online) {
            Some(best) => best != current_id,
            None => false,
        }
    }

    /// All `UNDEF`/`OFFLINE` endpoints, restricted to those that strictly
    /// outrank `current_id` when one is given; unrestricted when it is not.
    ///
    /// The source's `current_id_set || priorities[endpoint] < priorities[current]`
    /// is adopted here as `&&`: see design notes §9.
    pub fn worth_checking(&self, registry: &Registry, current_id: Option<usize>) -> Vec<EndpointInfo> {
        let mut candidates = registry.ids_with_status(Status::Undef);
        candidates.extend(registry.ids_with_status(Status::Offline));
        candidates.sort_unstable();

        candidates
            .into_iter()
            .filter(|&id| match current_id {
                None => true,
                Some(current) => self.priorities[id] < self.priorities[current],
            })
            .map(|id| EndpointInfo::from_registry(registry, id, SessionSettings::fallback()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with_priorities(priorities: &[usize]) -> (Registry, Priority) {
        let mut r = Registry::new();
        for i in 0..priorities.len() {
            r.add(format!("h{}:2181", i), false);
        }
        (r, Priority::from_priorities(priorities.to_vec()))
    }

    /// §8 property 3: a lower-priority ONLINE endpoint is never passed over
    /// in favor of a higher-priority ONLINE endpoint.
    #[test]
    fn prefers_lower_priority_among_online() {
        let (r, p) = registry_with_priorities(&[1, 0]);
        r.mark_online(0);
        r.mark_online(1);
        assert_eq!(p.select_next(&r).id, 1);
    }

    #[test]
    fn falls_back_to_undef_when_nothing_online() {
        let (r, p) = registry_with_priorities(&[1, 0]);
        // both UNDEF
        let picked = p.select_next(&r);
        assert_eq!(picked.id, 1);
        assert!(!picked.settings.use_fallback_session_lifetime);
    }

    #[test]
    fn fallback_lifetime_when_not_globally_optimal() {
        let (r, p) = registry_with_priorities(&[1, 0]);
        r.mark_online(0);
        // endpoint 1 (priority 0, global optimum) is UNDEF, not online, so
        // selecting endpoint 0 (priority 1) must use the fallback lifetime.
        let picked = p.select_next(&r);
        assert_eq!(picked.id, 0);
        assert!(picked.settings.use_fallback_session_lifetime);
    }

    /// S4 of §8: endpoint 1 is preferred but UNDEF, so has_better(0) is
    /// false until endpoint 1 actually comes online.
    #[test]
    fn has_better_requires_preferred_endpoint_to_be_online() {
        let (r, p) = registry_with_priorities(&[1, 0]);
        r.mark_online(0);
        assert!(!p.has_better(&r, 0));
        r.mark_online(1);
        assert!(p.has_better(&r, 0));
    }

    #[test]
    fn worth_checking_without_current_includes_all_undef_and_offline() {
        let (r, p) = registry_with_priorities(&[2, 1, 0]);
        r.mark_offline(0);
        let ids: Vec<usize> = p.worth_checking(&r, None).into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn worth_checking_with_current_restricts_to_strictly_better() {
        let (r, p) = registry_with_priorities(&[2, 1, 0]);
        // current is endpoint 1 (priority 1): only endpoint 2 (priority 0)
        // strictly outranks it; endpoint 0 (priority 2) does not.
        let ids: Vec<usize> = p.worth_checking(&r, Some(1)).into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn in_order_priority_is_registration_index() {
        let mut r = Registry::new();
        for i in 0..3 {
            r.add(format!("h{}", i), false);
        }
        let p = Priority::in_order(&r);
        assert_eq!(p.select_next(&r).id, 0);
    }
}
