use crate::error::Result;
use crate::models::{CreateTripRequest, Trip, TripDestination, TripDestinationInput, TripListFilter};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction};

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait TripRepository: Send + Sync {
    /// Inserts the trip and its attachments in one transaction.
    async fn create_with_destinations(
        &self,
        user_id: i64,
        request: CreateTripRequest,
    ) -> Result<Trip>;
    async fn list_by_user(&self, user_id: i64, filter: TripListFilter) -> Result<Vec<Trip>>;
    /// Ownership is folded into the lookup: a trip owned by someone else is
    /// indistinguishable from a missing one.
    async fn get_by_id_and_user(&self, id: i64, user_id: i64) -> Result<Option<Trip>>;
    async fn list_destinations(&self, trip_id: i64) -> Result<Vec<TripDestination>>;
    async fn update(&self, trip: Trip) -> Result<bool>;
    async fn delete(&self, id: i64, user_id: i64) -> Result<bool>;
    /// Full replace: deletes every existing attachment, then inserts the
    /// supplied list verbatim, all in one transaction.
    async fn replace_destinations(
        &self,
        trip_id: i64,
        destinations: Vec<TripDestinationInput>,
    ) -> Result<Vec<TripDestination>>;
}

pub struct SqliteTripRepository {
    pool: SqlitePool,
}

impl SqliteTripRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn insert_attachment(
        tx: &mut Transaction<'_, Sqlite>,
        trip_id: i64,
        input: &TripDestinationInput,
    ) -> std::result::Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO trip_destinations \
             (trip_id, destination_id, day_number, sort_order, notes, start_time, duration_minutes) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(trip_id)
        .bind(input.destination_id)
        .bind(input.day_number)
        .bind(input.sort_order)
        .bind(&input.notes)
        .bind(&input.start_time)
        .bind(input.duration_minutes)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}

const TRIP_COLUMNS: &str =
    "id, user_id, title, description, start_date, end_date, is_public, created_at, updated_at";

const TRIP_DESTINATION_COLUMNS: &str =
    "id, trip_id, destination_id, day_number, sort_order, notes, start_time, duration_minutes";

#[async_trait]
impl TripRepository for SqliteTripRepository {
    async fn create_with_destinations(
        &self,
        user_id: i64,
        request: CreateTripRequest,
    ) -> Result<Trip> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "INSERT INTO trips (user_id, title, description, start_date, end_date, is_public) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(&request.title)
        .bind(&request.description)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(request.is_public)
        .execute(&mut *tx)
        .await?;

        let trip_id = result.last_insert_rowid();

        for input in &request.destinations {
            Self::insert_attachment(&mut tx, trip_id, input).await?;
        }

        let trip = sqlx::query_as::<_, Trip>(&format!(
            "SELECT {TRIP_COLUMNS} FROM trips WHERE id = ?"
        ))
        .bind(trip_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(trip)
    }

    async fn list_by_user(&self, user_id: i64, filter: TripListFilter) -> Result<Vec<Trip>> {
        let mut sql = format!("SELECT {TRIP_COLUMNS} FROM trips WHERE user_id = ?");
        if filter.start_date.is_some() {
            sql.push_str(" AND start_date >= ?");
        }
        if filter.end_date.is_some() {
            sql.push_str(" AND end_date <= ?");
        }
        sql.push_str(" ORDER BY start_date DESC");

        let mut query = sqlx::query_as::<_, Trip>(&sql).bind(user_id);
        if let Some(start) = filter.start_date {
            query = query.bind(start);
        }
        if let Some(end) = filter.end_date {
            query = query.bind(end);
        }

        let trips = query.fetch_all(&self.pool).await?;
        Ok(trips)
    }

    async fn get_by_id_and_user(&self, id: i64, user_id: i64) -> Result<Option<Trip>> {
        let trip = sqlx::query_as::<_, Trip>(&format!(
            "SELECT {TRIP_COLUMNS} FROM trips WHERE id = ? AND user_id = ?"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(trip)
    }

    async fn list_destinations(&self, trip_id: i64) -> Result<Vec<TripDestination>> {
        // id as the final key gives equal (day, order) pairs a stable
        // insertion-order tie-break.
        let destinations = sqlx::query_as::<_, TripDestination>(&format!(
            "SELECT {TRIP_DESTINATION_COLUMNS} FROM trip_destinations \
             WHERE trip_id = ? ORDER BY day_number, sort_order, id"
        ))
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(destinations)
    }

    async fn update(&self, trip: Trip) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE trips SET title = ?, description = ?, start_date = ?, end_date = ?, \
             is_public = ?, updated_at = ? WHERE id = ? AND user_id = ?",
        )
        .bind(&trip.title)
        .bind(&trip.description)
        .bind(trip.start_date)
        .bind(trip.end_date)
        .bind(trip.is_public)
        .bind(Utc::now().naive_utc())
        .bind(trip.id)
        .bind(trip.user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64, user_id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "DELETE FROM trip_destinations WHERE trip_id IN \
             (SELECT id FROM trips WHERE id = ? AND user_id = ?)",
        )
        .bind(id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM trips WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }

    async fn replace_destinations(
        &self,
        trip_id: i64,
        destinations: Vec<TripDestinationInput>,
    ) -> Result<Vec<TripDestination>> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM trip_destinations WHERE trip_id = ?")
            .bind(trip_id)
            .execute(&mut *tx)
            .await?;

        for input in &destinations {
            Self::insert_attachment(&mut tx, trip_id, input).await?;
        }

        tx.commit().await?;

        self.list_destinations(trip_id).await
    }
}
