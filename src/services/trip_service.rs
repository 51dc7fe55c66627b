use crate::error::{ApiError, Result};
use crate::models::{
    CreateTripRequest, Trip, TripDestinationInput, TripListFilter, TripResponse, UpdateTripRequest,
};
use crate::repositories::{DestinationRepository, TripRepository};
use std::collections::HashSet;
use std::sync::Arc;

/// Trip lifecycle and the ordered destination attachments. The attachment
/// positions `(day_number, order)` are stored verbatim: no compaction, no
/// uniqueness enforcement. Presentation sorts by day, then order, then
/// insertion.
pub struct TripService {
    repository: Arc<dyn TripRepository>,
    destination_repository: Arc<dyn DestinationRepository>,
}

impl TripService {
    pub fn new(
        repository: Arc<dyn TripRepository>,
        destination_repository: Arc<dyn DestinationRepository>,
    ) -> Self {
        Self {
            repository,
            destination_repository,
        }
    }

    pub async fn create(&self, user_id: i64, request: CreateTripRequest) -> Result<TripResponse> {
        if request.title.trim().is_empty() {
            return Err(ApiError::validation("Title is required"));
        }
        if request.end_date < request.start_date {
            return Err(ApiError::validation(
                "End date cannot be before start date",
            ));
        }

        self.ensure_destinations_exist(&request.destinations)
            .await?;

        let trip = self
            .repository
            .create_with_destinations(user_id, request)
            .await?;

        self.with_destinations(trip).await
    }

    pub async fn list(&self, user_id: i64, filter: TripListFilter) -> Result<Vec<TripResponse>> {
        let trips = self.repository.list_by_user(user_id, filter).await?;

        let mut responses = Vec::with_capacity(trips.len());
        for trip in trips {
            responses.push(self.with_destinations(trip).await?);
        }

        Ok(responses)
    }

    pub async fn get(&self, user_id: i64, trip_id: i64) -> Result<TripResponse> {
        let trip = self
            .repository
            .get_by_id_and_user(trip_id, user_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Trip not found"))?;

        self.with_destinations(trip).await
    }

    pub async fn update(
        &self,
        user_id: i64,
        trip_id: i64,
        request: UpdateTripRequest,
    ) -> Result<TripResponse> {
        // Only when both dates arrive together is the ordering re-validated.
        if let (Some(start), Some(end)) = (request.start_date, request.end_date) {
            if end < start {
                return Err(ApiError::validation(
                    "End date cannot be before start date",
                ));
            }
        }

        let mut trip = self
            .repository
            .get_by_id_and_user(trip_id, user_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Trip not found"))?;

        if let Some(title) = request.title {
            if title.trim().is_empty() {
                return Err(ApiError::validation("Title is required"));
            }
            trip.title = title;
        }
        if let Some(description) = request.description {
            trip.description = Some(description);
        }
        if let Some(start_date) = request.start_date {
            trip.start_date = start_date;
        }
        if let Some(end_date) = request.end_date {
            trip.end_date = end_date;
        }
        if let Some(is_public) = request.is_public {
            trip.is_public = is_public;
        }

        let updated = self.repository.update(trip.clone()).await?;
        if !updated {
            return Err(ApiError::not_found("Trip not found"));
        }

        self.with_destinations(trip).await
    }

    pub async fn delete(&self, user_id: i64, trip_id: i64) -> Result<()> {
        let deleted = self.repository.delete(trip_id, user_id).await?;
        if !deleted {
            return Err(ApiError::not_found("Trip not found"));
        }
        Ok(())
    }

    /// Full replace of the attachment set. The supplied list is stored
    /// verbatim; attachments absent from it are gone. Destination ids are
    /// not re-validated on this path.
    pub async fn reorder(
        &self,
        user_id: i64,
        trip_id: i64,
        destinations: Vec<TripDestinationInput>,
    ) -> Result<TripResponse> {
        let trip = self
            .repository
            .get_by_id_and_user(trip_id, user_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Trip not found"))?;

        let attachments = self
            .repository
            .replace_destinations(trip.id, destinations)
            .await?;

        Ok(TripResponse {
            trip,
            destinations: attachments,
        })
    }

    async fn ensure_destinations_exist(&self, inputs: &[TripDestinationInput]) -> Result<()> {
        if inputs.is_empty() {
            return Ok(());
        }

        let ids: Vec<i64> = inputs
            .iter()
            .map(|d| d.destination_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let found: HashSet<i64> = self
            .destination_repository
            .ids_exist(&ids)
            .await?
            .into_iter()
            .collect();

        for input in inputs {
            if !found.contains(&input.destination_id) {
                return Err(ApiError::NotFound(format!(
                    "Destination {} not found",
                    input.destination_id
                )));
            }
        }

        Ok(())
    }

    async fn with_destinations(&self, trip: Trip) -> Result<TripResponse> {
        let destinations = self.repository.list_destinations(trip.id).await?;
        Ok(TripResponse { trip, destinations })
    }
}
