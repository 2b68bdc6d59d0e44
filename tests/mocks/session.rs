use std::cell::RefCell;
use std::collections::HashSet;
use std::error::Error as StdError;
use std::fmt;
use zk_balance::{ConnectRequest, Session, SessionConstructor};

#[derive(Debug)]
pub struct Boom;
impl fmt::Display for Boom {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "boom")
    }
}
impl StdError for Boom {}

#[derive(Debug)]
pub struct FakeSession {
    pub deadline: Option<(u64, u64)>,
}

impl Session for FakeSession {
    fn set_client_session_deadline(&mut self, min_sec: u64, max_sec: u64) -> u64 {
        self.deadline = Some((min_sec, max_sec));
        min_sec
    }
}

pub struct AlwaysConstructs;
impl SessionConstructor for AlwaysConstructs {
    type Session = FakeSession;
    fn construct(&self, _req: &ConnectRequest) -> Result<FakeSession, Box<dyn StdError>> {
        Ok(FakeSession { deadline: None })
    }
}

/// Fails construction for any endpoint whose original index is in the given
/// set, regardless of how many times it is retried.
pub struct FailFor(pub RefCell<HashSet<usize>>);
impl SessionConstructor for FailFor {
    type Session = FakeSession;
    fn construct(&self, req: &ConnectRequest) -> Result<FakeSession, Box<dyn StdError>> {
        if self.0.borrow().contains(&req.original_index) {
            Err(Box::new(Boom))
        } else {
            Ok(FakeSession { deadline: None })
        }
    }
}
