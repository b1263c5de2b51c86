//! Application handlers, one per use case.
//!
//! Handlers orchestrate domain logic over the persistence ports and carry
//! no protocol knowledge of their own; the HTTP adapters translate them to
//! and from the wire.

pub mod access;
pub mod auth;
pub mod payments;
