use crate::error::Result;
use crate::models::{CreateReviewRequest, Review, User};
use crate::AppState;
use axum::{
    extract::{Path, State},
    response::Json,
    Extension,
};

pub async fn list_destination_reviews(
    State(state): State<AppState>,
    Path(destination_id): Path<i64>,
) -> Result<Json<Vec<Review>>> {
    let reviews = state
        .review_service
        .list_by_destination(destination_id)
        .await?;
    Ok(Json(reviews))
}

pub async fn create_review(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(request): Json<CreateReviewRequest>,
) -> Result<Json<Review>> {
    let review = state.review_service.create(user.id, request).await?;
    Ok(Json(review))
}
