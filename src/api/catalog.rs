//! Catalog endpoints: car makes, car models and their fixed vocabularies.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::validate_catalog_id;
use super::{ApiError, ApiResponse, AppState, BodyTypeDto, CarMakeDetailDto, YearChoicesDto};
use crate::models::catalog::{
    BodyType, CarMake, CarMakeInput, CarModel, CarModelInput, current_year, year_choices,
};

#[derive(Debug, Deserialize)]
pub struct ModelListQuery {
    pub make_id: Option<i32>,
    pub dealer_id: Option<i32>,
}

pub async fn list_makes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<CarMake>>>, ApiError> {
    let makes = state.catalog().list_makes().await?;
    Ok(Json(ApiResponse::success(makes)))
}

pub async fn get_make(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<CarMakeDetailDto>>, ApiError> {
    let id = validate_catalog_id(id)?;
    let make = state.catalog().get_make(id).await?;
    let model_count = state.store().count_car_models_for_make(id).await?;

    Ok(Json(ApiResponse::success(CarMakeDetailDto {
        id: make.id,
        name: make.name,
        description: make.description,
        model_count,
    })))
}

pub async fn create_make(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CarMakeInput>,
) -> Result<Json<ApiResponse<CarMake>>, ApiError> {
    let make = state.catalog().create_make(payload).await?;
    Ok(Json(ApiResponse::success(make)))
}

pub async fn update_make(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<CarMakeInput>,
) -> Result<Json<ApiResponse<CarMake>>, ApiError> {
    let id = validate_catalog_id(id)?;
    let make = state.catalog().update_make(id, payload).await?;
    Ok(Json(ApiResponse::success(make)))
}

pub async fn delete_make(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<bool>>, ApiError> {
    let id = validate_catalog_id(id)?;
    state.catalog().delete_make(id).await?;
    Ok(Json(ApiResponse::success(true)))
}

pub async fn list_models(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ModelListQuery>,
) -> Result<Json<ApiResponse<Vec<CarModel>>>, ApiError> {
    let models = state
        .catalog()
        .list_models(query.make_id, query.dealer_id)
        .await?;
    Ok(Json(ApiResponse::success(models)))
}

pub async fn get_model(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<CarModel>>, ApiError> {
    let id = validate_catalog_id(id)?;
    let model = state.catalog().get_model(id).await?;
    Ok(Json(ApiResponse::success(model)))
}

pub async fn create_model(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CarModelInput>,
) -> Result<Json<ApiResponse<CarModel>>, ApiError> {
    let model = state.catalog().create_model(payload).await?;
    Ok(Json(ApiResponse::success(model)))
}

pub async fn update_model(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<CarModelInput>,
) -> Result<Json<ApiResponse<CarModel>>, ApiError> {
    let id = validate_catalog_id(id)?;
    let model = state.catalog().update_model(id, payload).await?;
    Ok(Json(ApiResponse::success(model)))
}

pub async fn delete_model(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<bool>>, ApiError> {
    let id = validate_catalog_id(id)?;
    state.catalog().delete_model(id).await?;
    Ok(Json(ApiResponse::success(true)))
}

/// `GET /api/catalog/years`
pub async fn list_years() -> Json<ApiResponse<YearChoicesDto>> {
    let years = year_choices();
    Json(ApiResponse::success(YearChoicesDto {
        first: *years.start(),
        last: *years.end(),
        default: current_year(),
        years: years.collect(),
    }))
}

/// `GET /api/catalog/body-types`
pub async fn list_body_types() -> Json<ApiResponse<Vec<BodyTypeDto>>> {
    let types = BodyType::ALL.into_iter().map(BodyTypeDto::from).collect();
    Json(ApiResponse::success(types))
}
