//! Round-robin policy (C3): rotates through endpoints, preferring the
//! current cursor position if it is already healthy.
//!
//! The cursor only advances when the selected endpoint differs from the
//! cursor position (or the cursor position is itself `ONLINE`). Advancing
//! on an `UNDEF` cursor pick would cause the policy to skip endpoints that
//! have never been tried, per the design notes.

use super::{EndpointInfo, SessionSettings};
use crate::registry::{Registry, Status};
use std::cell::Cell;

pub struct RoundRobin {
    cursor: Cell<usize>,
}

impl RoundRobin {
    pub fn new() -> RoundRobin {
        RoundRobin { cursor: Cell::new(0) }
    }

    pub fn select_next(&self, registry: &Registry) -> EndpointInfo {
        let n = registry.size();
        let r = self.cursor.get();

        if registry.get(r).status() == Status::Online {
            self.cursor.set((r + 1) % n);
            return EndpointInfo::from_registry(registry, r, SessionSettings::optimal());
        }

        let online = registry.ids_with_status(Status::Online);
        if let Some(&id) = online.first() {
            self.cursor.set((id + 1) % n);
            return EndpointInfo::from_registry(registry, id, SessionSettings::optimal());
        }

        if registry.get(r).status() == Status::Undef {
            return EndpointInfo::from_registry(registry, r, SessionSettings::optimal());
        }

        let undef = registry.ids_with_status(Status::Undef);
        if let Some(&id) = undef.first() {
            self.cursor.set((id + 1) % n);
            return EndpointInfo::from_registry(registry, id, SessionSettings::optimal());
        }

        unreachable!("caller must ensure available_count() > 0")
    }

    pub fn has_better(&self, _registry: &Registry, _current_id: usize) -> bool {
        false
    }

    pub fn worth_checking(&self, _registry: &Registry, _current_id: Option<usize>) -> Vec<EndpointInfo> {
        Vec::new()
    }
}
