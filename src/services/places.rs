//! Typed client for the external places provider.
//!
//! Wraps the provider's autocomplete, nearby-search, place-details and photo
//! endpoints behind a small API. There is no caching, retrying or fallback
//! here: a provider failure surfaces to the caller as an upstream error, and
//! destination materialization built on top of this client persists results
//! itself.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Photos returned on a details lookup are capped at this many URLs.
const MAX_PHOTOS: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum PlacesError {
    #[error("Places API key not configured")]
    NotConfigured,

    #[error("Error connecting to location service: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Places API error: {0}")]
    Provider(String),

    #[error("Location not found")]
    NotFound,
}

impl From<PlacesError> for ApiError {
    fn from(err: PlacesError) -> Self {
        match err {
            PlacesError::NotFound => ApiError::NotFound("Location not found".to_string()),
            other => ApiError::Upstream(other.to_string()),
        }
    }
}

/// One place in a search result list.
#[derive(Debug, Clone, Serialize)]
pub struct PlaceSummary {
    pub place_id: String,
    pub name: String,
    pub formatted_address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub types: Vec<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<i64>,
}

/// Full detail record for a single place.
#[derive(Debug, Clone, Serialize)]
pub struct PlaceDetails {
    pub place_id: String,
    pub name: String,
    pub formatted_address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub types: Vec<String>,
    pub photos: Vec<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<i64>,
    pub price_level: Option<i64>,
    pub website: Option<String>,
    pub formatted_phone_number: Option<String>,
    pub opening_hours: Vec<String>,
}

// Provider wire formats.

#[derive(Debug, Deserialize)]
struct AutocompleteResponse {
    status: String,
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    place_id: String,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    status: String,
    result: Option<PlaceResult>,
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
    name: String,
    formatted_address: Option<String>,
    geometry: Geometry,
    #[serde(default)]
    types: Vec<String>,
    #[serde(default)]
    photos: Vec<PhotoRef>,
    rating: Option<f64>,
    user_ratings_total: Option<i64>,
    price_level: Option<i64>,
    website: Option<String>,
    formatted_phone_number: Option<String>,
    opening_hours: Option<OpeningHours>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct PhotoRef {
    photo_reference: String,
}

#[derive(Debug, Deserialize)]
struct OpeningHours {
    #[serde(default)]
    weekday_text: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct NearbyResponse {
    status: String,
    #[serde(default)]
    results: Vec<NearbyResult>,
}

#[derive(Debug, Deserialize)]
struct NearbyResult {
    place_id: String,
    name: String,
    geometry: Geometry,
    #[serde(default)]
    types: Vec<String>,
    rating: Option<f64>,
    user_ratings_total: Option<i64>,
    vicinity: Option<String>,
}

/// # Thread Safety
///
/// PlacesClient is safe to share across threads as the underlying
/// reqwest::Client uses connection pooling and is designed for concurrent
/// use.
#[derive(Clone)]
pub struct PlacesClient {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl PlacesClient {
    pub fn new(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            api_key,
            base_url: base_url.into(),
        }
    }

    fn api_key(&self) -> Result<&str, PlacesError> {
        self.api_key.as_deref().ok_or(PlacesError::NotConfigured)
    }

    /// Autocomplete search, one details fetch per prediction, up to `limit`
    /// results.
    pub async fn search(
        &self,
        query: &str,
        language: &str,
        limit: usize,
    ) -> Result<Vec<PlaceSummary>, PlacesError> {
        let key = self.api_key()?;

        let response = self
            .client
            .get(format!(
                "{}/maps/api/place/autocomplete/json",
                self.base_url
            ))
            .query(&[
                ("input", query),
                ("key", key),
                ("language", language),
                ("types", "(cities)"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let data: AutocompleteResponse = response.json().await?;

        match data.status.as_str() {
            "OK" => {}
            "ZERO_RESULTS" => return Ok(Vec::new()),
            status => return Err(PlacesError::Provider(status.to_string())),
        }

        let mut results = Vec::new();
        for prediction in data.predictions.into_iter().take(limit) {
            let place = self.fetch_details(&prediction.place_id, language).await?;
            results.push(PlaceSummary {
                place_id: prediction.place_id,
                name: place.name,
                formatted_address: place.formatted_address,
                latitude: place.geometry.location.lat,
                longitude: place.geometry.location.lng,
                types: place.types,
                rating: place.rating,
                user_ratings_total: place.user_ratings_total,
            });
        }

        Ok(results)
    }

    /// Search around a point instead of by text prediction.
    pub async fn search_nearby(
        &self,
        latitude: f64,
        longitude: f64,
        radius_meters: u32,
        limit: usize,
    ) -> Result<Vec<PlaceSummary>, PlacesError> {
        let key = self.api_key()?;
        let location = format!("{latitude},{longitude}");
        let radius = radius_meters.to_string();

        let response = self
            .client
            .get(format!(
                "{}/maps/api/place/nearbysearch/json",
                self.base_url
            ))
            .query(&[
                ("key", key),
                ("location", location.as_str()),
                ("radius", radius.as_str()),
                ("type", "tourist_attraction"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let data: NearbyResponse = response.json().await?;

        match data.status.as_str() {
            "OK" => {}
            "ZERO_RESULTS" => return Ok(Vec::new()),
            status => return Err(PlacesError::Provider(status.to_string())),
        }

        Ok(data
            .results
            .into_iter()
            .take(limit)
            .map(|r| PlaceSummary {
                place_id: r.place_id,
                name: r.name,
                formatted_address: r.vicinity,
                latitude: r.geometry.location.lat,
                longitude: r.geometry.location.lng,
                types: r.types,
                rating: r.rating,
                user_ratings_total: r.user_ratings_total,
            })
            .collect())
    }

    /// Full place details including up to five photo URLs.
    pub async fn details(
        &self,
        place_id: &str,
        language: &str,
    ) -> Result<PlaceDetails, PlacesError> {
        let place = self.fetch_details(place_id, language).await?;
        let key = self.api_key()?;

        let photos = place
            .photos
            .iter()
            .take(MAX_PHOTOS)
            .map(|p| self.photo_url(&p.photo_reference, key))
            .collect();

        Ok(PlaceDetails {
            place_id: place_id.to_string(),
            name: place.name,
            formatted_address: place.formatted_address,
            latitude: place.geometry.location.lat,
            longitude: place.geometry.location.lng,
            types: place.types,
            photos,
            rating: place.rating,
            user_ratings_total: place.user_ratings_total,
            price_level: place.price_level,
            website: place.website,
            formatted_phone_number: place.formatted_phone_number,
            opening_hours: place
                .opening_hours
                .map(|h| h.weekday_text)
                .unwrap_or_default(),
        })
    }

    async fn fetch_details(
        &self,
        place_id: &str,
        language: &str,
    ) -> Result<PlaceResult, PlacesError> {
        let key = self.api_key()?;

        let response = self
            .client
            .get(format!("{}/maps/api/place/details/json", self.base_url))
            .query(&[
                ("place_id", place_id),
                ("key", key),
                ("language", language),
                (
                    "fields",
                    "name,formatted_address,geometry,type,photos,rating,user_ratings_total,\
                     website,formatted_phone_number,opening_hours,price_level",
                ),
            ])
            .send()
            .await?
            .error_for_status()?;

        let data: DetailsResponse = response.json().await?;

        match data.status.as_str() {
            "OK" => data
                .result
                .ok_or_else(|| PlacesError::Provider("missing result".to_string())),
            "ZERO_RESULTS" | "NOT_FOUND" => Err(PlacesError::NotFound),
            status => Err(PlacesError::Provider(status.to_string())),
        }
    }

    fn photo_url(&self, photo_reference: &str, key: &str) -> String {
        format!(
            "{}/maps/api/place/photo?maxwidth=800&photo_reference={photo_reference}&key={key}",
            self.base_url
        )
    }
}
