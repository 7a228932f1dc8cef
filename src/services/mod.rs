// Service exports
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;
use crate::models::{Listing, NewListing};

pub use memory::InMemoryListingStore;
pub use postgres::PostgresListingStore;

/// Errors that can occur when reading or writing listings
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Corrupt row: {0}")]
    CorruptRow(String),
}

/// Persistence collaborator for listings.
///
/// Every lookup returns listings with their owner relation loaded.
#[async_trait]
pub trait ListingStore: Send + Sync {
    /// All listings with `active = true`
    async fn find_active(&self) -> Result<Vec<Listing>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Listing>, StoreError>;

    /// Persist a new listing. Stored listings always start out active.
    async fn insert(&self, listing: NewListing) -> Result<Listing, StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError>;
}
