pub mod test_helpers {
    use crate::auth::TokenManager;
    use crate::repositories::{
        SqliteDestinationRepository, SqliteReviewRepository, SqliteTripRepository,
        SqliteUserRepository,
    };
    use crate::services::{
        AuthService, DestinationService, LogEmailService, PlacesClient, ReviewService,
        TripService, UserService,
    };
    use crate::AppState;
    use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
    use std::sync::Arc;
    use tempfile::NamedTempFile;

    /// Create a new in-memory SQLite database for testing
    pub async fn create_test_db() -> Result<SqlitePool, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await?;

        // Run migrations
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(pool)
    }

    /// Create a temporary file-based SQLite database for testing
    /// Useful when you need to test features that don't work with in-memory databases
    pub async fn create_test_db_file() -> Result<(SqlitePool, NamedTempFile), sqlx::Error> {
        let temp_file = NamedTempFile::new().map_err(sqlx::Error::Io)?;
        let db_path = temp_file
            .path()
            .to_str()
            .ok_or_else(|| sqlx::Error::Configuration("Invalid database path".into()))?;
        let database_url = format!("sqlite://{}", db_path);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(&database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok((pool, temp_file))
    }

    /// Build a full application state over the given pool. The places client
    /// points at `places_base_url` so tests can substitute a wiremock server.
    pub fn build_test_state(pool: SqlitePool, places_base_url: &str) -> AppState {
        let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
        let destination_repository = Arc::new(SqliteDestinationRepository::new(pool.clone()));
        let trip_repository = Arc::new(SqliteTripRepository::new(pool.clone()));
        let review_repository = Arc::new(SqliteReviewRepository::new(pool.clone()));

        let email_service = Arc::new(LogEmailService::new("http://localhost:8080"));
        let token_manager = TokenManager::new("test-secret-key", 60);
        let places = PlacesClient::new(Some("test-api-key".to_string()), places_base_url);

        AppState {
            user_service: Arc::new(UserService::new(
                user_repository.clone(),
                email_service.clone(),
            )),
            auth_service: Arc::new(AuthService::new(user_repository, token_manager)),
            destination_service: Arc::new(DestinationService::new(
                destination_repository.clone(),
                places,
            )),
            trip_service: Arc::new(TripService::new(trip_repository, destination_repository)),
            review_service: Arc::new(ReviewService::new(review_repository)),
            email_service,
            pool,
        }
    }

    /// Insert a test user with hashed password
    pub async fn insert_test_user(
        pool: &SqlitePool,
        email: &str,
        username: &str,
        password: &str,
        active: bool,
    ) -> Result<i64, sqlx::Error> {
        let password_hash = crate::services::user_service::hash_password(password)
            .map_err(|e| sqlx::Error::Configuration(format!("hashing failed: {e}").into()))?;

        let result = sqlx::query(
            "INSERT INTO users (email, username, password_hash, is_active, verification_token) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(email)
        .bind(username)
        .bind(password_hash)
        .bind(active)
        .bind(format!("token-for-{username}"))
        .execute(pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Promote a user to superuser
    pub async fn make_superuser(pool: &SqlitePool, user_id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET is_superuser = TRUE WHERE id = ?")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Insert a minimal destination row for attaching to trips and reviews
    pub async fn insert_test_destination(
        pool: &SqlitePool,
        name: &str,
        place_id: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO destinations (name, description, place_id, country, city) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(name)
        .bind(format!("{name} description"))
        .bind(place_id)
        .bind("Indonesia")
        .bind("Denpasar")
        .execute(pool)
        .await?;

        Ok(result.last_insert_rowid())
    }
}
