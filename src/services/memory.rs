use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;
use crate::models::{Listing, NewListing};
use crate::services::{ListingStore, StoreError};

/// Process-local listing store
///
/// Keeps listings in insertion order. Used for local runs without a database
/// and as the store behind the handler tests.
#[derive(Default)]
pub struct InMemoryListingStore {
    listings: RwLock<Vec<Listing>>,
}

impl InMemoryListingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the visibility flag of a stored listing.
    ///
    /// Returns false when no listing has that id.
    pub async fn set_active(&self, id: Uuid, active: bool) -> bool {
        let mut listings = self.listings.write().await;
        match listings.iter_mut().find(|l| l.id == id) {
            Some(listing) => {
                listing.active = active;
                true
            }
            None => false,
        }
    }

    pub async fn len(&self) -> usize {
        self.listings.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.listings.read().await.is_empty()
    }
}

#[async_trait]
impl ListingStore for InMemoryListingStore {
    async fn find_active(&self) -> Result<Vec<Listing>, StoreError> {
        let listings = self.listings.read().await;
        Ok(listings.iter().filter(|l| l.active).cloned().collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Listing>, StoreError> {
        let listings = self.listings.read().await;
        Ok(listings.iter().find(|l| l.id == id).cloned())
    }

    async fn insert(&self, listing: NewListing) -> Result<Listing, StoreError> {
        let created = Listing {
            id: Uuid::new_v4(),
            owner: listing.owner,
            active: true,
            volume: listing.volume,
            min_volume: listing.min_volume,
            partial_ok: listing.partial_ok,
            details: listing.details,
            created_at: Utc::now(),
        };

        self.listings.write().await.push(created.clone());

        Ok(created)
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use serde_json::Map;

    fn new_listing(owner: Uuid) -> NewListing {
        NewListing {
            owner: User { id: owner },
            volume: 3.0,
            min_volume: 3.0,
            partial_ok: false,
            details: Map::new(),
        }
    }

    #[tokio::test]
    async fn test_insert_is_active_and_findable() {
        let store = InMemoryListingStore::new();
        let owner = Uuid::new_v4();

        let created = store.insert(new_listing(owner)).await.unwrap();

        assert!(created.active);
        assert_eq!(created.owner.id, owner);
        assert_eq!(store.find_by_id(created.id).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn test_find_active_skips_inactive() {
        let store = InMemoryListingStore::new();
        let owner = Uuid::new_v4();

        let first = store.insert(new_listing(owner)).await.unwrap();
        let second = store.insert(new_listing(owner)).await.unwrap();
        assert!(store.set_active(first.id, false).await);

        let active = store.find_active().await.unwrap();

        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, second.id);
        assert_eq!(store.len().await, 2);
    }

    #[test]
    fn test_set_active_unknown_id() {
        let store = InMemoryListingStore::new();
        assert!(!tokio_test::block_on(store.set_active(Uuid::new_v4(), false)));
    }
}
