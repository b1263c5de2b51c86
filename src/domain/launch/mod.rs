//! Launch-data authentication protocol.
//!
//! Independent of the payment protocol: runs once at session start to
//! establish the identity every other operation binds to.

mod authenticator;
mod identity;

pub use authenticator::{LaunchAuthenticator, LaunchError};
pub use identity::{LaunchData, TelegramUser};
