use actix_web::{web, HttpResponse};
use validator::Validate;
use crate::core::{ListingError, Principal};
use crate::models::CreateListingRequest;
use crate::routes::AppState;

/// Configure the listing resource under `/listing`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/listing")
            .service(
                web::resource(["", "/"])
                    .route(web::get().to(get_active_listings))
                    .route(web::post().to(create_listing)),
            )
            .service(web::resource("/{listing_id}").route(web::get().to(get_one_listing))),
    );
}

/// List active listings
///
/// GET /listing/
async fn get_active_listings(
    state: web::Data<AppState>,
    principal: Principal,
) -> Result<HttpResponse, ListingError> {
    let listings = state.listings.list_active(&principal).await?;
    Ok(HttpResponse::Ok().json(listings))
}

/// Fetch one listing
///
/// GET /listing/{listingId}
async fn get_one_listing(
    state: web::Data<AppState>,
    principal: Principal,
    listing_id: web::Path<String>,
) -> Result<HttpResponse, ListingError> {
    let listing = state.listings.get_one(&principal, &listing_id).await?;
    Ok(HttpResponse::Ok().json(listing))
}

/// Create a listing owned by the caller
///
/// POST /listing/
///
/// Request body:
/// ```json
/// {
///   "volume": 10,
///   "minVolume": 10,
///   "partialOk": false,
///   "title": "any descriptive field"
/// }
/// ```
async fn create_listing(
    state: web::Data<AppState>,
    principal: Principal,
    body: web::Json<CreateListingRequest>,
) -> Result<HttpResponse, ListingError> {
    let request = body.into_inner();

    if let Err(errors) = request.validate() {
        tracing::info!("Validation failed for create_listing request: {:?}", errors);
        return Err(ListingError::Validation(errors.to_string()));
    }

    let created = state.listings.create(&principal, request).await?;
    Ok(HttpResponse::Ok().json(created))
}
