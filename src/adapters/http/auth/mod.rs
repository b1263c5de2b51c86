//! Launch authentication HTTP module.

mod dto;
mod handlers;
mod routes;

pub use dto::{AuthenticateRequest, AuthenticateResponse};
pub use handlers::authenticate;
pub use routes::routes;
