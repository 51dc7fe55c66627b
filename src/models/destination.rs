use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored destination. Rows created by an administrator carry only the
/// fields they chose to fill in; rows materialized from the places provider
/// additionally carry the provider id, rating metadata, photos and
/// activities (both stored as JSON text).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Destination {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub place_id: Option<String>,
    pub formatted_address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<i64>,
    pub price_level: Option<i64>,
    pub photos: Option<String>,
    pub activities: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

impl Destination {
    pub fn photo_urls(&self) -> Vec<String> {
        Self::parse_json_list(self.photos.as_deref())
    }

    pub fn activity_list(&self) -> Vec<String> {
        Self::parse_json_list(self.activities.as_deref())
    }

    fn parse_json_list(raw: Option<&str>) -> Vec<String> {
        raw.and_then(|s| serde_json::from_str(s).ok())
            .unwrap_or_default()
    }
}

/// API view of a destination with the JSON columns decoded.
#[derive(Debug, Clone, Serialize)]
pub struct DestinationResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub place_id: Option<String>,
    pub formatted_address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<i64>,
    pub price_level: Option<i64>,
    pub photos: Vec<String>,
    pub activities: Vec<String>,
}

impl From<Destination> for DestinationResponse {
    fn from(d: Destination) -> Self {
        let photos = d.photo_urls();
        let activities = d.activity_list();
        DestinationResponse {
            id: d.id,
            name: d.name,
            description: d.description,
            place_id: d.place_id,
            formatted_address: d.formatted_address,
            latitude: d.latitude,
            longitude: d.longitude,
            country: d.country,
            city: d.city,
            rating: d.rating,
            user_ratings_total: d.user_ratings_total,
            price_level: d.price_level,
            photos,
            activities,
        }
    }
}

/// Admin-supplied destination payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDestinationRequest {
    pub name: String,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub country: Option<String>,
    pub city: Option<String>,
}

/// Insert-ready destination row, either admin-supplied or materialized from
/// a provider place record.
#[derive(Debug, Clone, Default)]
pub struct NewDestination {
    pub name: String,
    pub description: Option<String>,
    pub place_id: Option<String>,
    pub formatted_address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<i64>,
    pub price_level: Option<i64>,
    pub photos: Option<String>,
    pub activities: Option<String>,
}

impl From<CreateDestinationRequest> for NewDestination {
    fn from(req: CreateDestinationRequest) -> Self {
        NewDestination {
            name: req.name.trim().to_string(),
            description: req.description,
            latitude: req.latitude,
            longitude: req.longitude,
            country: req.country,
            city: req.city,
            ..Default::default()
        }
    }
}
