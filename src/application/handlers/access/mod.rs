//! Entitlement handlers.

mod check_access;

pub use check_access::{AccessError, AccessVerdict, CheckAccessHandler, CheckAccessQuery};
