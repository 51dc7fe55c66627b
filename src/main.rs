use wayfarer::{
    auth::TokenManager,
    build_router,
    config::AppConfig,
    db,
    repositories::{
        SqliteDestinationRepository, SqliteReviewRepository, SqliteTripRepository,
        SqliteUserRepository,
    },
    services::{
        create_email_service, AuthService, DestinationService, PlacesClient, ReviewService,
        TripService, UserService,
    },
    AppState,
};

use axum::http::{header, HeaderValue, Method};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wayfarer=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Configuration is read once here and passed into components explicitly.
    let config = AppConfig::from_env()?;

    // Database connection
    let pool = db::create_pool(&config.database_url).await?;

    // Run migrations
    sqlx::migrate!("./migrations").run(&pool).await?;

    // Initialize repositories
    let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
    let destination_repository = Arc::new(SqliteDestinationRepository::new(pool.clone()));
    let trip_repository = Arc::new(SqliteTripRepository::new(pool.clone()));
    let review_repository = Arc::new(SqliteReviewRepository::new(pool.clone()));

    // Initialize services
    let token_manager = TokenManager::new(
        config.secret_key.clone(),
        config.access_token_expire_minutes,
    );
    let email_service = create_email_service(&config);
    let places = PlacesClient::new(
        config.places_api_key.clone(),
        config.places_base_url.clone(),
    );

    let user_service = Arc::new(UserService::new(
        user_repository.clone(),
        email_service.clone(),
    ));
    let auth_service = Arc::new(AuthService::new(user_repository.clone(), token_manager));
    let destination_service = Arc::new(DestinationService::new(
        destination_repository.clone(),
        places,
    ));
    let trip_service = Arc::new(TripService::new(
        trip_repository,
        destination_repository.clone(),
    ));
    let review_service = Arc::new(ReviewService::new(review_repository));

    // Create app state
    let app_state = AppState {
        user_service,
        auth_service,
        destination_service,
        trip_service,
        review_service,
        email_service,
        pool: pool.clone(),
    };

    let cors_layer = build_cors_layer(&config)?;

    let app = build_router(app_state)
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from((config.host.parse::<std::net::IpAddr>()?, config.port));

    tracing::info!("Server running on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_cors_layer(config: &AppConfig) -> Result<CorsLayer, Box<dyn std::error::Error>> {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]);

    if config.allow_any_origin() {
        return Ok(layer.allow_origin(Any));
    }

    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(layer.allow_origin(origins))
}
