use crate::error::Result;
use crate::models::{CreateDestinationRequest, DestinationResponse, User};
use crate::services::{PlaceDetails, PlaceSearchParams, PlaceSummary};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    response::Json,
    Extension,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LocalSearchQuery {
    pub query: String,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct PlaceSearchQuery {
    #[serde(default)]
    pub query: String,
    pub language: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub radius: Option<u32>,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct LanguageQuery {
    pub language: Option<String>,
}

/// Substring search over stored destinations only.
pub async fn search_destinations(
    State(state): State<AppState>,
    Query(query): Query<LocalSearchQuery>,
) -> Result<Json<Vec<DestinationResponse>>> {
    let destinations = state
        .destination_service
        .search_local(&query.query, query.limit)
        .await?;

    Ok(Json(destinations.into_iter().map(Into::into).collect()))
}

pub async fn get_destination(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DestinationResponse>> {
    let destination = state.destination_service.get(id).await?;
    Ok(Json(destination.into()))
}

pub async fn create_destination(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(request): Json<CreateDestinationRequest>,
) -> Result<Json<DestinationResponse>> {
    let destination = state.destination_service.create(&user, request).await?;
    Ok(Json(destination.into()))
}

/// Local cache by external place id, materialized on first miss.
pub async fn get_or_create_from_place(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
    Query(query): Query<LanguageQuery>,
) -> Result<Json<DestinationResponse>> {
    let destination = state
        .destination_service
        .get_or_create_by_place(&place_id, query.language.as_deref())
        .await?;

    Ok(Json(destination.into()))
}

pub async fn search_places(
    State(state): State<AppState>,
    Query(query): Query<PlaceSearchQuery>,
) -> Result<Json<Vec<PlaceSummary>>> {
    let params = PlaceSearchParams {
        query: query.query,
        language: query.language,
        latitude: query.lat,
        longitude: query.lng,
        radius: query.radius,
        limit: query.limit,
    };

    let results = state.destination_service.search_places(params).await?;
    Ok(Json(results))
}

pub async fn place_details(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
    Query(query): Query<LanguageQuery>,
) -> Result<Json<PlaceDetails>> {
    let details = state
        .destination_service
        .place_details(&place_id, query.language.as_deref())
        .await?;

    Ok(Json(details))
}
