//! Listing Service - REST resource for volume listings
//!
//! Exposes list, fetch and create operations for listings. Inactive
//! listings are only visible to their owner, and a listing's volume must
//! equal its minimum volume unless partial fills are allowed.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{ListingError, ListingHandler, Principal};
pub use crate::models::{CreateListingRequest, Listing, ListingResponse, NewListing, User};
pub use crate::routes::{AppState, JwtVerifier};
pub use crate::services::{InMemoryListingStore, ListingStore, PostgresListingStore, StoreError};
