// Listing operation exports
pub mod error;
pub mod listings;

pub use error::ListingError;
pub use listings::{ListingHandler, Principal};
