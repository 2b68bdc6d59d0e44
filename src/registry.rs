//! The endpoint registry (C1): the shared substrate every policy reads and
//! writes. Agnostic to policy — it only tracks the immutable `(address,
//! secure)` pair per endpoint and its mutable liveness status.

use std::cell::RefCell;

/// Liveness of a single endpoint, as observed by the connection loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// Never attempted, or reset after a failure.
    Undef,
    /// The most recent connection attempt succeeded.
    Online,
    /// The most recent connection attempt failed (DNS or session
    /// construction).
    Offline,
}

/// One configured coordination node.
///
/// `id` is dense and assigned at registration time from `0..N-1`; it never
/// changes and always equals the endpoint's index in the registry.
#[derive(Clone, Debug)]
pub struct Endpoint {
    pub id: usize,
    pub address: String,
    pub secure: bool,
    status: Status,
}

impl Endpoint {
    pub fn status(&self) -> Status {
        self.status
    }
}

/// Stores the endpoint list and their liveness. Endpoints are added only at
/// construction and never removed; the registry itself performs no I/O.
pub struct Registry {
    endpoints: RefCell<Vec<Endpoint>>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry { endpoints: RefCell::new(Vec::new()) }
    }

    /// Appends a new endpoint with status `Undef` and returns its id.
    pub fn add(&mut self, address: String, secure: bool) -> usize {
        let mut endpoints = self.endpoints.borrow_mut();
        let id = endpoints.len();
        endpoints.push(Endpoint { id, address, secure, status: Status::Undef });
        id
    }

    /// Constant-time lookup. Panics if `id` is out of range, which would
    /// indicate a caller holding an id from a different registry.
    pub fn get(&self, id: usize) -> Endpoint {
        self.endpoints.borrow()[id].clone()
    }

    pub fn size(&self) -> usize {
        self.endpoints.borrow().len()
    }

    /// All ids whose status equals `s`, in ascending id order.
    pub fn ids_with_status(&self, s: Status) -> Vec<usize> {
        self.endpoints
            .borrow()
            .iter()
            .filter(|e| e.status == s)
            .map(|e| e.id)
            .collect()
    }

    pub fn mark_online(&self, id: usize) {
        self.endpoints.borrow_mut()[id].status = Status::Online;
    }

    pub fn mark_offline(&self, id: usize) {
        self.endpoints.borrow_mut()[id].status = Status::Offline;
    }

    /// Any endpoint currently `Offline` becomes `Undef`; `Online`/`Undef`
    /// endpoints are left untouched.
    pub fn reset_offline(&self) {
        for e in self.endpoints.borrow_mut().iter_mut() {
            if e.status == Status::Offline {
                e.status = Status::Undef;
            }
        }
    }

    /// `|ONLINE| + |UNDEF|`.
    pub fn available_count(&self) -> usize {
        self.endpoints
            .borrow()
            .iter()
            .filter(|e| e.status != Status::Offline)
            .count()
    }

    /// Snapshot of every endpoint's current status, in id order. Used by
    /// policies that need to compare several endpoints at once (priority).
    pub fn snapshot(&self) -> Vec<Endpoint> {
        self.endpoints.borrow().clone()
    }
}

impl Default for Registry {
    fn default() -> Registry {
        Registry::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_assigns_dense_ids() {
        let mut r = Registry::new();
        assert_eq!(r.add("a:1".into(), false), 0);
        assert_eq!(r.add("b:2".into(), true), 1);
        assert_eq!(r.size(), 2);
        assert_eq!(r.get(0).status(), Status::Undef);
        assert!(r.get(1).secure);
        assert!(!r.get(0).secure);
    }

    #[test]
    fn reset_offline_promotes_only_offline() {
        let mut r = Registry::new();
        r.add("a".into(), false);
        r.add("b".into(), false);
        r.mark_online(0);
        r.mark_offline(1);
        r.reset_offline();
        assert_eq!(r.get(0).status(), Status::Online);
        assert_eq!(r.get(1).status(), Status::Undef);
    }

    #[test]
    fn available_count_excludes_offline() {
        let mut r = Registry::new();
        r.add("a".into(), false);
        r.add("b".into(), false);
        r.add("c".into(), false);
        r.mark_online(0);
        r.mark_offline(1);
        assert_eq!(r.available_count(), 2);
    }

    #[test]
    fn ids_with_status_is_ascending() {
        let mut r = Registry::new();
        for i in 0..5 {
            r.add(format!("h{}", i), false);
        }
        r.mark_online(3);
        r.mark_online(1);
        assert_eq!(r.ids_with_status(Status::Online), vec![1, 3]);
    }
}
