//! Entitlement resolver.
//!
//! A pure, side-effect-free decision over User/Podcast/Transaction state.
//! Free-slot allocation is an explicit write performed by the caller before
//! consulting the resolver, never inside it.

mod resolver;

pub use resolver::has_full_access;
