pub mod dns;
pub mod session;

pub use dns::{AllTransient, AlwaysOk, FailSet, Mixed};
pub use session::{AlwaysConstructs, FailFor, FakeSession};
