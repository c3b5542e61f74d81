use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::{validate_dealer_id, validate_state};
use super::{ApiError, ApiResponse, AppState};
use crate::models::dealer::CarDealer;

#[derive(Debug, Deserialize)]
pub struct DealerListQuery {
    pub state: Option<String>,
}

/// `GET /api/dealers[?state=XX]`
pub async fn list_dealers(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DealerListQuery>,
) -> Result<Json<ApiResponse<Vec<CarDealer>>>, ApiError> {
    let dealers = match query.state.as_deref() {
        Some(st) => {
            let st = validate_state(st)?;
            state.dealers().list_dealers_by_state(st).await?
        }
        None => state.dealers().list_dealers().await?,
    };

    Ok(Json(ApiResponse::success(dealers)))
}

/// `GET /api/dealers/{id}`
pub async fn get_dealer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<CarDealer>>, ApiError> {
    let id = validate_dealer_id(id)?;

    state
        .dealers()
        .get_dealer_by_id(id)
        .await?
        .map(|dealer| Json(ApiResponse::success(dealer)))
        .ok_or_else(|| ApiError::not_found("Dealer", id))
}
