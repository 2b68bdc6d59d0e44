//! Random policy (C2): uniform selection, no notion of a "better" host.

use super::{EndpointInfo, SessionSettings};
use crate::registry::{Registry, Status};
use rand::seq::SliceRandom;

pub struct Random;

impl Random {
    pub fn new() -> Random {
        Random
    }

    pub fn select_next(&self, registry: &Registry) -> EndpointInfo {
        let online = registry.ids_with_status(Status::Online);
        let pick = if !online.is_empty() {
            *online.choose(&mut rand::thread_rng()).unwrap()
        } else {
            let undef = registry.ids_with_status(Status::Undef);
            *undef
                .choose(&mut rand::thread_rng())
                .expect("caller must ensure available_count() > 0")
        };
        EndpointInfo::from_registry(registry, pick, SessionSettings::optimal())
    }

    pub fn has_better(&self, _registry: &Registry, _current_id: usize) -> bool {
        false
    }

    pub fn worth_checking(&self, _registry: &Registry, _current_id: Option<usize>) -> Vec<EndpointInfo> {
        Vec::new()
    }
}
