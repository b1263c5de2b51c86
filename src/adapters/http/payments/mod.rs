//! Payment HTTP module.

mod dto;
mod handlers;
mod routes;

pub use dto::{CreateLinkRequest, CreateLinkResponse, TariffDto, WebhookAck};
pub use handlers::{create_link, handle_webhook};
pub use routes::routes;
