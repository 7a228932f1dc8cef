// Route exports
pub mod auth;
pub mod health;
pub mod listings;

use actix_web::{error, web, HttpRequest};
use std::sync::Arc;
use crate::core::{ListingError, ListingHandler};
use crate::services::ListingStore;

pub use auth::JwtVerifier;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub listings: ListingHandler,
    pub verifier: Arc<JwtVerifier>,
}

impl AppState {
    pub fn new(store: Arc<dyn ListingStore>, verifier: JwtVerifier) -> Self {
        Self {
            listings: ListingHandler::new(store),
            verifier: Arc::new(verifier),
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure)
        .configure(listings::configure);
}

/// JSON body config that reports malformed bodies as validation failures
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(handle_json_payload_error)
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    ListingError::Validation(format!("Invalid JSON: {}", err)).into()
}
