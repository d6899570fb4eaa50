// src/infrastructure/repositories/mod.rs
mod error;
mod memory_listing;
mod postgres_listing;

pub(crate) use error::map_sqlx;
pub use memory_listing::InMemoryListingRepository;
pub use postgres_listing::PostgresListingRepository;
