pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod services;

// Make test_utils available for both unit tests and integration tests
pub mod test_utils;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<services::UserService>,
    pub auth_service: Arc<services::AuthService>,
    pub destination_service: Arc<services::DestinationService>,
    pub trip_service: Arc<services::TripService>,
    pub review_service: Arc<services::ReviewService>,
    pub email_service: Arc<dyn services::EmailService>,
    pub pool: sqlx::SqlitePool,
}

/// Assembles the versioned API router. CORS and trace layers are applied by
/// the caller.
pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/auth/register", post(handlers::register))
        .route("/auth/login", post(handlers::login))
        .route("/auth/verify-email", post(handlers::verify_email))
        .route("/auth/forgot-password", post(handlers::forgot_password))
        .route("/auth/reset-password", post(handlers::reset_password))
        .route("/destinations/search", get(handlers::search_destinations))
        .route(
            "/destinations/place/{place_id}",
            get(handlers::get_or_create_from_place),
        )
        .route("/destinations/{id}", get(handlers::get_destination))
        .route("/places/search", get(handlers::search_places))
        .route("/places/{place_id}", get(handlers::place_details))
        .route(
            "/reviews/destination/{destination_id}",
            get(handlers::list_destination_reviews),
        )
        .route("/contact", post(handlers::submit_contact_form))
        .route("/i18n/locales", get(handlers::list_locales))
        .route("/i18n/translations", get(handlers::all_translations))
        .route(
            "/i18n/translations/{locale}",
            get(handlers::translations_for_locale),
        );

    let protected_routes = Router::new()
        .route("/auth/me", get(handlers::me))
        .route("/auth/change-password", post(handlers::change_password))
        .route("/destinations", post(handlers::create_destination))
        .route(
            "/trips",
            get(handlers::list_trips).post(handlers::create_trip),
        )
        .route(
            "/trips/{id}",
            get(handlers::get_trip)
                .put(handlers::update_trip)
                .delete(handlers::delete_trip),
        )
        .route("/trips/{id}/reorder", put(handlers::reorder_trip))
        .route("/reviews", post(handlers::create_review))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    Router::new()
        .route("/healthz", get(handlers::healthz))
        .nest("/api/v1", public_routes.merge(protected_routes))
        .with_state(state)
}
