pub mod auth_handlers;
pub mod contact_handlers;
pub mod destination_handlers;
pub mod i18n_handlers;
pub mod review_handlers;
pub mod trip_handlers;

pub use auth_handlers::{
    change_password, forgot_password, login, me, register, reset_password, verify_email,
};
pub use contact_handlers::submit_contact_form;
pub use destination_handlers::{
    create_destination, get_destination, get_or_create_from_place, place_details, search_destinations,
    search_places,
};
pub use i18n_handlers::{all_translations, list_locales, translations_for_locale};
pub use review_handlers::{create_review, list_destination_reviews};
pub use trip_handlers::{create_trip, delete_trip, get_trip, list_trips, reorder_trip, update_trip};

use axum::response::Json;
use serde_json::{json, Value};

/// Liveness probe, fixed payload.
pub async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
