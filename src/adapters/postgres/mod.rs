//! PostgreSQL persistence adapters.

mod podcast_reader;
mod pricing_reader;
mod transaction_repository;
mod user_repository;

pub use podcast_reader::PostgresPodcastReader;
pub use pricing_reader::PostgresPricingReader;
pub use transaction_repository::PostgresTransactionRepository;
pub use user_repository::PostgresUserRepository;
