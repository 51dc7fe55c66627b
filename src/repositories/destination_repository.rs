use crate::error::Result;
use crate::models::{Destination, NewDestination};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait DestinationRepository: Send + Sync {
    async fn insert(&self, destination: NewDestination) -> Result<Destination>;
    async fn get_by_id(&self, id: i64) -> Result<Option<Destination>>;
    async fn find_by_place_id(&self, place_id: &str) -> Result<Option<Destination>>;
    /// Case-insensitive substring match on the destination name.
    async fn search_by_name(&self, query: &str, limit: i64) -> Result<Vec<Destination>>;
    async fn ids_exist(&self, ids: &[i64]) -> Result<Vec<i64>>;
}

pub struct SqliteDestinationRepository {
    pool: SqlitePool,
}

impl SqliteDestinationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const DESTINATION_COLUMNS: &str = "id, name, description, place_id, formatted_address, latitude, \
     longitude, country, city, rating, user_ratings_total, price_level, photos, activities, \
     created_at, updated_at";

#[async_trait]
impl DestinationRepository for SqliteDestinationRepository {
    async fn insert(&self, destination: NewDestination) -> Result<Destination> {
        let result = sqlx::query(
            "INSERT INTO destinations (name, description, place_id, formatted_address, latitude, \
             longitude, country, city, rating, user_ratings_total, price_level, photos, \
             activities, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&destination.name)
        .bind(&destination.description)
        .bind(&destination.place_id)
        .bind(&destination.formatted_address)
        .bind(destination.latitude)
        .bind(destination.longitude)
        .bind(&destination.country)
        .bind(&destination.city)
        .bind(destination.rating)
        .bind(destination.user_ratings_total)
        .bind(destination.price_level)
        .bind(&destination.photos)
        .bind(&destination.activities)
        .bind(Utc::now().naive_utc())
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        let created = sqlx::query_as::<_, Destination>(&format!(
            "SELECT {DESTINATION_COLUMNS} FROM destinations WHERE id = ?"
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Destination>> {
        let destination = sqlx::query_as::<_, Destination>(&format!(
            "SELECT {DESTINATION_COLUMNS} FROM destinations WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(destination)
    }

    async fn find_by_place_id(&self, place_id: &str) -> Result<Option<Destination>> {
        let destination = sqlx::query_as::<_, Destination>(&format!(
            "SELECT {DESTINATION_COLUMNS} FROM destinations WHERE place_id = ?"
        ))
        .bind(place_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(destination)
    }

    async fn search_by_name(&self, query: &str, limit: i64) -> Result<Vec<Destination>> {
        // Escape LIKE wildcards so a literal % or _ in the query matches
        // itself rather than everything.
        let escaped = query.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");
        let pattern = format!("%{escaped}%");

        // LIKE is case-insensitive for ASCII in SQLite.
        let destinations = sqlx::query_as::<_, Destination>(&format!(
            "SELECT {DESTINATION_COLUMNS} FROM destinations \
             WHERE name LIKE ? ESCAPE '\\' \
             ORDER BY name LIMIT ?"
        ))
        .bind(pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(destinations)
    }

    async fn ids_exist(&self, ids: &[i64]) -> Result<Vec<i64>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!("SELECT id FROM destinations WHERE id IN ({placeholders})");

        let mut query = sqlx::query_scalar::<_, i64>(&sql);
        for id in ids {
            query = query.bind(*id);
        }

        let found = query.fetch_all(&self.pool).await?;
        Ok(found)
    }
}
