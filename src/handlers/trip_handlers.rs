use crate::error::Result;
use crate::models::{
    CreateTripRequest, TripDestinationInput, TripListFilter, TripResponse, UpdateTripRequest, User,
};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    response::Json,
    Extension,
};
use serde_json::{json, Value};

pub async fn list_trips(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Query(filter): Query<TripListFilter>,
) -> Result<Json<Vec<TripResponse>>> {
    let trips = state.trip_service.list(user.id, filter).await?;
    Ok(Json(trips))
}

pub async fn create_trip(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(request): Json<CreateTripRequest>,
) -> Result<Json<TripResponse>> {
    let trip = state.trip_service.create(user.id, request).await?;
    Ok(Json(trip))
}

pub async fn get_trip(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
) -> Result<Json<TripResponse>> {
    let trip = state.trip_service.get(user.id, id).await?;
    Ok(Json(trip))
}

pub async fn update_trip(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateTripRequest>,
) -> Result<Json<TripResponse>> {
    let trip = state.trip_service.update(user.id, id, request).await?;
    Ok(Json(trip))
}

pub async fn delete_trip(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
) -> Result<Json<Value>> {
    state.trip_service.delete(user.id, id).await?;
    Ok(Json(json!({ "message": "Trip deleted" })))
}

/// Destructive full replace of the trip's destination set.
pub async fn reorder_trip(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
    Json(destinations): Json<Vec<TripDestinationInput>>,
) -> Result<Json<TripResponse>> {
    let trip = state.trip_service.reorder(user.id, id, destinations).await?;
    Ok(Json(trip))
}
