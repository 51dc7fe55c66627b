use crate::models::User;
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use sqlx::SqlitePool;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("User not found")]
    NotFound,
    #[error("User already exists")]
    AlreadyExists,
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<RepositoryError> for crate::error::ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Database(e) => crate::error::ApiError::Database(e),
            RepositoryError::NotFound => {
                crate::error::ApiError::NotFound("User not found".to_string())
            }
            RepositoryError::AlreadyExists => {
                crate::error::ApiError::Conflict("User already exists".to_string())
            }
        }
    }
}

/// Insert payload for a freshly registered (inactive) user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub verification_token: String,
}

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, new_user: NewUser) -> RepositoryResult<User>;
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<User>>;
    async fn find_by_verification_token(
        &self,
        email: &str,
        token: &str,
    ) -> RepositoryResult<Option<User>>;
    async fn find_by_reset_token(
        &self,
        email: &str,
        token: &str,
    ) -> RepositoryResult<Option<User>>;
    async fn mark_email_verified(&self, id: i64) -> RepositoryResult<()>;
    async fn set_reset_token(
        &self,
        id: i64,
        token: &str,
        expires: NaiveDateTime,
    ) -> RepositoryResult<()>;
    /// Replaces the hash and clears any outstanding reset token.
    async fn reset_password(&self, id: i64, password_hash: &str) -> RepositoryResult<()>;
    async fn update_password(&self, id: i64, password_hash: &str) -> RepositoryResult<()>;
    async fn record_login(&self, id: i64) -> RepositoryResult<()>;
}

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str = "id, email, username, password_hash, full_name, is_active, \
     is_superuser, verification_token, email_verified_at, reset_token, reset_token_expires, \
     last_login, password_changed_at, created_at, updated_at";

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create_user(&self, new_user: NewUser) -> RepositoryResult<User> {
        let result = sqlx::query(
            "INSERT INTO users (email, username, password_hash, full_name, verification_token, is_active) \
             VALUES (?, ?, ?, ?, ?, FALSE)",
        )
        .bind(&new_user.email)
        .bind(&new_user.username)
        .bind(&new_user.password_hash)
        .bind(&new_user.full_name)
        .bind(&new_user.verification_token)
        .execute(&self.pool)
        .await;

        match result {
            Ok(res) => {
                let id = res.last_insert_rowid();
                self.find_by_id(id).await?.ok_or(RepositoryError::NotFound)
            }
            Err(e) => {
                if e.to_string().contains("UNIQUE") {
                    Err(RepositoryError::AlreadyExists)
                } else {
                    Err(RepositoryError::Database(e))
                }
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_verification_token(
        &self,
        email: &str,
        token: &str,
    ) -> RepositoryResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ? AND verification_token = ?"
        ))
        .bind(email)
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_reset_token(
        &self,
        email: &str,
        token: &str,
    ) -> RepositoryResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ? AND reset_token = ?"
        ))
        .bind(email)
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn mark_email_verified(&self, id: i64) -> RepositoryResult<()> {
        let now = Utc::now().naive_utc();
        let result = sqlx::query(
            "UPDATE users SET is_active = TRUE, verification_token = NULL, \
             email_verified_at = ?, updated_at = ? WHERE id = ?",
        )
        .bind(now)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn set_reset_token(
        &self,
        id: i64,
        token: &str,
        expires: NaiveDateTime,
    ) -> RepositoryResult<()> {
        let result = sqlx::query(
            "UPDATE users SET reset_token = ?, reset_token_expires = ?, updated_at = ? WHERE id = ?",
        )
        .bind(token)
        .bind(expires)
        .bind(Utc::now().naive_utc())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn reset_password(&self, id: i64, password_hash: &str) -> RepositoryResult<()> {
        let now = Utc::now().naive_utc();
        let result = sqlx::query(
            "UPDATE users SET password_hash = ?, reset_token = NULL, reset_token_expires = NULL, \
             password_changed_at = ?, updated_at = ? WHERE id = ?",
        )
        .bind(password_hash)
        .bind(now)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> RepositoryResult<()> {
        let now = Utc::now().naive_utc();
        let result = sqlx::query(
            "UPDATE users SET password_hash = ?, password_changed_at = ?, updated_at = ? \
             WHERE id = ?",
        )
        .bind(password_hash)
        .bind(now)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn record_login(&self, id: i64) -> RepositoryResult<()> {
        let result = sqlx::query("UPDATE users SET last_login = ? WHERE id = ?")
            .bind(Utc::now().naive_utc())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
