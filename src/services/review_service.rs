use crate::error::{ApiError, Result};
use crate::models::{CreateReviewRequest, Review};
use crate::repositories::ReviewRepository;
use std::sync::Arc;

pub struct ReviewService {
    repository: Arc<dyn ReviewRepository>,
}

impl ReviewService {
    pub fn new(repository: Arc<dyn ReviewRepository>) -> Self {
        Self { repository }
    }

    /// Rating must be in [1,5]. The destination is not checked for
    /// existence; a dangling foreign key surfaces as a storage error.
    pub async fn create(&self, user_id: i64, request: CreateReviewRequest) -> Result<Review> {
        if !(1..=5).contains(&request.rating) {
            return Err(ApiError::validation("Rating must be between 1 and 5"));
        }

        self.repository
            .insert(
                user_id,
                request.destination_id,
                request.rating,
                request.comment,
            )
            .await
    }

    pub async fn list_by_destination(&self, destination_id: i64) -> Result<Vec<Review>> {
        self.repository.list_by_destination(destination_id).await
    }
}
