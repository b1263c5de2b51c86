//! Domain layer: pure business logic with no I/O.

pub mod catalog;
pub mod entitlement;
pub mod foundation;
pub mod launch;
pub mod payment;
