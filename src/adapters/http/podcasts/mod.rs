//! Podcast HTTP module.

mod dto;
mod handlers;
mod routes;

pub use dto::AccessResponse;
pub use handlers::check_access;
pub use routes::routes;
