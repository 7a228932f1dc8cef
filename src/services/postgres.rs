use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use std::time::Duration;
use uuid::Uuid;
use crate::config::DatabaseSettings;
use crate::models::{Listing, NewListing, User};
use crate::services::{ListingStore, StoreError};

const LISTING_COLUMNS: &str = r#"
    l.id, l.owner_id, l.active, l.volume, l.min_volume,
    l.partial_ok, l.details, l.created_at
"#;

/// PostgreSQL-backed listing store
///
/// Listings reference their owner through `listings.owner_id -> users.id`.
/// Reads join the owner so the relation is always populated.
pub struct PostgresListingStore {
    pool: PgPool,
}

impl PostgresListingStore {
    /// Create a new store from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new store from settings
    pub async fn from_settings(settings: &DatabaseSettings) -> Result<Self, StoreError> {
        tracing::info!(
            "Connecting to PostgreSQL (max: {} connections)",
            settings.max_connections.unwrap_or(10)
        );

        Self::new(
            &settings.url,
            settings.max_connections.unwrap_or(10),
            settings.min_connections.unwrap_or(1),
            Duration::from_secs(settings.acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(settings.idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }
}

fn listing_from_row(row: &PgRow) -> Result<Listing, StoreError> {
    let details: Json<Value> = row.try_get("details")?;
    let details = match details.0 {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            return Err(StoreError::CorruptRow(format!(
                "listing details must be an object, found {}",
                other
            )))
        }
    };

    Ok(Listing {
        id: row.try_get("id")?,
        owner: User { id: row.try_get("owner_id")? },
        active: row.try_get("active")?,
        volume: row.try_get("volume")?,
        min_volume: row.try_get("min_volume")?,
        partial_ok: row.try_get("partial_ok")?,
        details,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl ListingStore for PostgresListingStore {
    async fn find_active(&self) -> Result<Vec<Listing>, StoreError> {
        let query = format!(
            r#"
            SELECT {LISTING_COLUMNS}
            FROM listings l
            JOIN users u ON u.id = l.owner_id
            WHERE l.active = TRUE
            ORDER BY l.created_at
            "#
        );

        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        let listings = rows
            .iter()
            .map(listing_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Loaded {} active listings", listings.len());

        Ok(listings)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Listing>, StoreError> {
        let query = format!(
            r#"
            SELECT {LISTING_COLUMNS}
            FROM listings l
            JOIN users u ON u.id = l.owner_id
            WHERE l.id = $1
            "#
        );

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(listing_from_row).transpose()
    }

    /// Uses INSERT ... ON CONFLICT DO NOTHING for the owner so that the
    /// foreign key holds without touching any other user column.
    async fn insert(&self, listing: NewListing) -> Result<Listing, StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO users (id) VALUES ($1) ON CONFLICT (id) DO NOTHING")
            .bind(listing.owner.id)
            .execute(&mut *tx)
            .await?;

        let query = r#"
            INSERT INTO listings (id, owner_id, active, volume, min_volume, partial_ok, details)
            VALUES ($1, $2, TRUE, $3, $4, $5, $6)
            RETURNING id, owner_id, active, volume, min_volume, partial_ok, details, created_at
        "#;

        let row = sqlx::query(query)
            .bind(Uuid::new_v4())
            .bind(listing.owner.id)
            .bind(listing.volume)
            .bind(listing.min_volume)
            .bind(listing.partial_ok)
            .bind(Json(Value::Object(listing.details)))
            .fetch_one(&mut *tx)
            .await?;

        let created = listing_from_row(&row)?;
        tx.commit().await?;

        tracing::debug!("Inserted listing {} for owner {}", created.id, created.owner.id);

        Ok(created)
    }

    /// Health check for the database connection
    async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
