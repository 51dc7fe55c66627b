use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Trip {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_public: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

/// A destination attached to a trip, positioned by `(day_number, order)`.
/// Positions are stored verbatim; gaps and duplicates are the caller's
/// responsibility.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TripDestination {
    pub id: i64,
    pub trip_id: i64,
    pub destination_id: i64,
    pub day_number: i64,
    #[serde(rename = "order")]
    pub sort_order: i64,
    pub notes: Option<String>,
    pub start_time: Option<String>,
    pub duration_minutes: Option<i64>,
}

/// Caller-supplied attachment, used by both trip creation and reorder.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TripDestinationInput {
    pub destination_id: i64,
    pub day_number: i64,
    #[serde(rename = "order")]
    pub sort_order: i64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTripRequest {
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub destinations: Vec<TripDestinationInput>,
}

/// Partial update: only supplied fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTripRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_public: Option<bool>,
}

/// Query-string filters for trip listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TripListFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// A trip with its attachments in presentation order.
#[derive(Debug, Clone, Serialize)]
pub struct TripResponse {
    #[serde(flatten)]
    pub trip: Trip,
    pub destinations: Vec<TripDestination>,
}
