use std::sync::Arc;
use uuid::Uuid;
use crate::core::error::ListingError;
use crate::models::{strip_reserved, CreateListingRequest, ListingResponse, NewListing, User};
use crate::services::ListingStore;

/// The authenticated requester
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
}

impl Principal {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }

    fn as_owner(&self) -> User {
        User { id: self.user_id }
    }
}

/// Listing resource operations
///
/// Each operation takes the requesting principal explicitly and returns the
/// projected [`ListingResponse`], never the stored entity.
#[derive(Clone)]
pub struct ListingHandler {
    store: Arc<dyn ListingStore>,
}

impl ListingHandler {
    pub fn new(store: Arc<dyn ListingStore>) -> Self {
        Self { store }
    }

    /// All active listings, in storage order
    pub async fn list_active(
        &self,
        principal: &Principal,
    ) -> Result<Vec<ListingResponse>, ListingError> {
        let listings = self.store.find_active().await?;

        tracing::debug!(
            "User {} listed {} active listings",
            principal.user_id,
            listings.len()
        );

        Ok(listings.into_iter().map(ListingResponse::from).collect())
    }

    /// One listing by id.
    ///
    /// Inactive listings are reported as missing to everyone but their owner.
    /// An id that is not a UUID cannot match anything and is reported the
    /// same way.
    pub async fn get_one(
        &self,
        principal: &Principal,
        listing_id: &str,
    ) -> Result<ListingResponse, ListingError> {
        let id = Uuid::parse_str(listing_id).map_err(|_| ListingError::NotFound)?;

        let listing = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(ListingError::NotFound)?;

        if !listing.is_visible_to(principal.user_id) {
            tracing::debug!(
                "Hiding inactive listing {} from non-owner {}",
                listing.id,
                principal.user_id
            );
            return Err(ListingError::NotFound);
        }

        Ok(listing.into())
    }

    /// Create a listing owned by `principal`.
    ///
    /// Nothing is persisted when the minimum volume rule fails. Any `active`
    /// or owner value in the request is ignored.
    pub async fn create(
        &self,
        principal: &Principal,
        request: CreateListingRequest,
    ) -> Result<ListingResponse, ListingError> {
        if !request.satisfies_min_volume() {
            tracing::info!(
                "Rejected listing from {}: volume {} != minVolume {} without partial fills",
                principal.user_id,
                request.volume,
                request.min_volume
            );
            return Err(ListingError::MinVolume);
        }

        let new_listing = NewListing {
            owner: principal.as_owner(),
            volume: request.volume,
            min_volume: request.min_volume,
            partial_ok: request.partial_fills_allowed(),
            details: strip_reserved(request.details),
        };

        let created = self.store.insert(new_listing).await?;

        tracing::info!("Created listing {} for {}", created.id, principal.user_id);

        Ok(created.into())
    }

    pub async fn is_healthy(&self) -> bool {
        match self.store.health_check().await {
            Ok(healthy) => healthy,
            Err(e) => {
                tracing::warn!("Store health check failed: {}", e);
                false
            }
        }
    }
}
