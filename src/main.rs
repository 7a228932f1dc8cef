use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use listing_service::config::{Settings, StorageBackend};
use listing_service::routes::{self, AppState, JwtVerifier};
use listing_service::services::{InMemoryListingStore, ListingStore, PostgresListingStore};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    // Initialize logging; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting listing service...");

    let store: Arc<dyn ListingStore> = match settings.storage.backend {
        StorageBackend::Postgres => {
            let postgres = PostgresListingStore::from_settings(&settings.database)
                .await
                .unwrap_or_else(|e| {
                    error!("Failed to connect to PostgreSQL: {}", e);
                    panic!("PostgreSQL connection error: {}", e);
                });
            info!("PostgreSQL listing store initialized");
            Arc::new(postgres)
        }
        StorageBackend::Memory => {
            warn!("Using in-memory listing store; listings are lost on restart");
            Arc::new(InMemoryListingStore::new())
        }
    };

    let verifier = JwtVerifier::new(&settings.auth.jwt_secret, settings.auth.token_ttl_secs);
    let app_state = AppState::new(store, verifier);

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(routes::json_config())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
