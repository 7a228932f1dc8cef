// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Listing, NewListing, User, strip_reserved};
pub use requests::CreateListingRequest;
pub use responses::{ListingResponse, HealthResponse, ErrorResponse};
