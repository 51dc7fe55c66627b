use crate::error::Result;
use crate::models::Review;
use async_trait::async_trait;
use sqlx::SqlitePool;

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait ReviewRepository: Send + Sync {
    /// No destination-existence pre-check; a bad foreign key surfaces as a
    /// storage error.
    async fn insert(
        &self,
        user_id: i64,
        destination_id: i64,
        rating: i64,
        comment: Option<String>,
    ) -> Result<Review>;
    async fn list_by_destination(&self, destination_id: i64) -> Result<Vec<Review>>;
}

pub struct SqliteReviewRepository {
    pool: SqlitePool,
}

impl SqliteReviewRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const REVIEW_COLUMNS: &str = "id, user_id, destination_id, rating, comment, created_at";

#[async_trait]
impl ReviewRepository for SqliteReviewRepository {
    async fn insert(
        &self,
        user_id: i64,
        destination_id: i64,
        rating: i64,
        comment: Option<String>,
    ) -> Result<Review> {
        let result = sqlx::query(
            "INSERT INTO reviews (user_id, destination_id, rating, comment) VALUES (?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(destination_id)
        .bind(rating)
        .bind(&comment)
        .execute(&self.pool)
        .await?;

        let review = sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = ?"
        ))
        .bind(result.last_insert_rowid())
        .fetch_one(&self.pool)
        .await?;

        Ok(review)
    }

    async fn list_by_destination(&self, destination_id: i64) -> Result<Vec<Review>> {
        let reviews = sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE destination_id = ? ORDER BY created_at DESC"
        ))
        .bind(destination_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }
}
