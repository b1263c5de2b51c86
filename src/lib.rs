//! Podcast Paywall - Telegram Mini App backend
//!
//! Sells podcast episodes and a flat subscription through a hosted payment
//! page: signed payment links out, HMAC-verified webhooks in, and an
//! entitlement resolver deciding who hears what.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
