use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::validation::validate_dealer_id;
use super::{ApiError, ApiResponse, AppState, ReviewPostedDto};
use crate::clients::http::HttpOutcome;
use crate::models::review::{DealerReview, NewReview};

/// `GET /api/dealers/{id}/reviews`
pub async fn list_reviews(
    State(state): State<Arc<AppState>>,
    Path(dealer_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<DealerReview>>>, ApiError> {
    let dealer_id = validate_dealer_id(dealer_id)?;
    let reviews = state.reviews().list_reviews_for_dealer(dealer_id).await?;
    Ok(Json(ApiResponse::success(reviews)))
}

/// `POST /api/dealers/{id}/reviews`
///
/// Relays the cloud function's answer. A non-2xx answer becomes a 502 that
/// names the upstream status.
pub async fn post_review(
    State(state): State<Arc<AppState>>,
    Path(dealer_id): Path<i64>,
    Json(payload): Json<NewReview>,
) -> Result<Json<ApiResponse<ReviewPostedDto>>, ApiError> {
    let dealer_id = validate_dealer_id(dealer_id)?;

    match state.reviews().post_review(dealer_id, payload).await? {
        HttpOutcome::Success(raw) if raw.is_success() => {
            let body = serde_json::from_str(&raw.body)
                .unwrap_or(serde_json::Value::String(raw.body));
            Ok(Json(ApiResponse::success(ReviewPostedDto {
                status: raw.status,
                body,
            })))
        }
        HttpOutcome::Success(raw) => Err(ApiError::review_service_error(format!(
            "upstream rejected review with status {}",
            raw.status
        ))),
        HttpOutcome::Failure(status) => Err(ApiError::review_service_error(format!(
            "review submission failed with status {status}"
        ))),
    }
}
