//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `UserRepository` - user lookup/creation, subscription grant, free slot
//! - `PodcastReader` - read-only episode catalogue access
//! - `TransactionRepository` - ledger writes with CAS settlement
//! - `PricingReader` - price configuration lookup

mod podcast_reader;
mod pricing_reader;
mod transaction_repository;
mod user_repository;

pub use podcast_reader::PodcastReader;
pub use pricing_reader::PricingReader;
pub use transaction_repository::{SettleOutcome, TransactionRepository};
pub use user_repository::UserRepository;
