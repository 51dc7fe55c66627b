use crate::error::{ApiError, Result};
use crate::models::{CreateDestinationRequest, Destination, NewDestination, User};
use crate::repositories::DestinationRepository;
use crate::services::places::{PlaceDetails, PlaceSummary, PlacesClient};
use std::sync::Arc;

const DEFAULT_SEARCH_LIMIT: i64 = 10;
const MAX_SEARCH_LIMIT: i64 = 100;

#[derive(Debug, Clone, Default)]
pub struct PlaceSearchParams {
    pub query: String,
    pub language: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius: Option<u32>,
    pub limit: Option<usize>,
}

/// Local destination records plus their materialization from the external
/// places provider.
pub struct DestinationService {
    repository: Arc<dyn DestinationRepository>,
    places: PlacesClient,
}

impl DestinationService {
    pub fn new(repository: Arc<dyn DestinationRepository>, places: PlacesClient) -> Self {
        Self { repository, places }
    }

    /// Name-substring search against stored destinations only; never touches
    /// the provider.
    pub async fn search_local(&self, query: &str, limit: Option<i64>) -> Result<Vec<Destination>> {
        if query.trim().is_empty() {
            return Err(ApiError::validation("Search query is required"));
        }

        let limit = limit
            .unwrap_or(DEFAULT_SEARCH_LIMIT)
            .clamp(1, MAX_SEARCH_LIMIT);

        self.repository.search_by_name(query.trim(), limit).await
    }

    pub async fn get(&self, id: i64) -> Result<Destination> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Destination not found"))
    }

    pub async fn create(&self, user: &User, request: CreateDestinationRequest) -> Result<Destination> {
        if !user.is_superuser {
            return Err(ApiError::Forbidden("Not enough permissions".to_string()));
        }
        if request.name.trim().is_empty() {
            return Err(ApiError::validation("Name is required"));
        }

        self.repository.insert(request.into()).await
    }

    /// Local lookup by provider place id; on a miss the place is fetched,
    /// persisted and served from local storage forever after. There is no
    /// freshness policy and no duplicate-race handling beyond the unique
    /// index on place_id.
    pub async fn get_or_create_by_place(
        &self,
        place_id: &str,
        language: Option<&str>,
    ) -> Result<Destination> {
        if let Some(existing) = self.repository.find_by_place_id(place_id).await? {
            return Ok(existing);
        }

        let language = validate_language(language)?;
        let details = self.places.details(place_id, language).await?;

        tracing::info!("Materializing destination from place {place_id}");

        let new_destination = NewDestination {
            name: details.name.clone(),
            description: None,
            place_id: Some(details.place_id.clone()),
            formatted_address: details.formatted_address.clone(),
            latitude: Some(details.latitude),
            longitude: Some(details.longitude),
            country: None,
            city: None,
            rating: details.rating,
            user_ratings_total: details.user_ratings_total,
            price_level: details.price_level,
            photos: encode_json_list(&details.photos),
            activities: encode_json_list(&details.types),
        };

        self.repository.insert(new_destination).await
    }

    /// Provider search: nearby when a full location+radius is supplied,
    /// autocomplete otherwise.
    pub async fn search_places(&self, params: PlaceSearchParams) -> Result<Vec<PlaceSummary>> {
        let limit = params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT as usize);

        if let (Some(lat), Some(lng), Some(radius)) =
            (params.latitude, params.longitude, params.radius)
        {
            return Ok(self.places.search_nearby(lat, lng, radius, limit).await?);
        }

        if params.query.trim().len() < 2 {
            return Err(ApiError::validation(
                "Search query must be at least 2 characters",
            ));
        }

        let language = validate_language(params.language.as_deref())?;
        Ok(self.places.search(&params.query, language, limit).await?)
    }

    pub async fn place_details(
        &self,
        place_id: &str,
        language: Option<&str>,
    ) -> Result<PlaceDetails> {
        let language = validate_language(language)?;
        Ok(self.places.details(place_id, language).await?)
    }
}

fn validate_language(language: Option<&str>) -> Result<&str> {
    match language {
        None => Ok("en"),
        Some(lang @ ("en" | "id")) => Ok(lang),
        Some(_) => Err(ApiError::validation("Unsupported language")),
    }
}

fn encode_json_list(values: &[String]) -> Option<String> {
    if values.is_empty() {
        return None;
    }
    serde_json::to_string(values).ok()
}
