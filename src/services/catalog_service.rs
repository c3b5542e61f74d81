//! Domain service for the car catalog.
//!
//! Owns validation of makes and models before they reach the database:
//! name lengths, the closed body-type vocabulary and the model-year range.

use crate::models::catalog::{CarMake, CarMakeInput, CarModel, CarModelInput};
use thiserror::Error;

/// Errors specific to catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: i32 },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for CatalogError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for CatalogError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl CatalogError {
    #[must_use]
    pub const fn make_not_found(id: i32) -> Self {
        Self::NotFound {
            resource: "Car make",
            id,
        }
    }

    #[must_use]
    pub const fn model_not_found(id: i32) -> Self {
        Self::NotFound {
            resource: "Car model",
            id,
        }
    }
}

/// Domain service trait for the car catalog.
#[async_trait::async_trait]
pub trait CatalogService: Send + Sync {
    /// Lists all makes ordered by name.
    async fn list_makes(&self) -> Result<Vec<CarMake>, CatalogError>;

    async fn get_make(&self, id: i32) -> Result<CarMake, CatalogError>;

    async fn create_make(&self, input: CarMakeInput) -> Result<CarMake, CatalogError>;

    async fn update_make(&self, id: i32, input: CarMakeInput) -> Result<CarMake, CatalogError>;

    /// Deletes a make and every model that references it.
    async fn delete_make(&self, id: i32) -> Result<(), CatalogError>;

    /// Lists models, optionally narrowed to one make and/or one dealer.
    async fn list_models(
        &self,
        car_make_id: Option<i32>,
        dealer_id: Option<i32>,
    ) -> Result<Vec<CarModel>, CatalogError>;

    async fn get_model(&self, id: i32) -> Result<CarModel, CatalogError>;

    /// Creates a model; missing `model_type`/`year` take their defaults.
    async fn create_model(&self, input: CarModelInput) -> Result<CarModel, CatalogError>;

    async fn update_model(&self, id: i32, input: CarModelInput)
    -> Result<CarModel, CatalogError>;

    async fn delete_model(&self, id: i32) -> Result<(), CatalogError>;
}
