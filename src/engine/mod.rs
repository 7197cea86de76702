//! Document status and permission engine: pure decisions, no I/O.

pub mod policy;
pub mod scope;
pub mod transition;

pub use policy::{PolicyTable, Subject, Verb};
pub use scope::Scope;
pub use transition::{StatusChange, WithdrawRule};
