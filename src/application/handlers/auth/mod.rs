//! Launch authentication handlers.

mod authenticate_launch;

pub use authenticate_launch::{
    AuthenticateLaunchCommand, AuthenticateLaunchHandler, AuthenticatedLaunch, AuthError,
};
