//! Application layer: use-case handlers.

pub mod handlers;
