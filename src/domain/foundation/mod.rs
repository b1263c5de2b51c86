//! Foundation value objects shared by every domain module.

mod errors;
mod ids;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{PodcastId, TelegramId, TransactionId, UserId};
