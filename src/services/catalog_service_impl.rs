//! `SeaORM` implementation of the `CatalogService` trait.

use crate::db::{CarModelRow, Store};
use crate::models::catalog::{
    CarMake, CarMakeInput, CarModel, CarModelInput, FIRST_MODEL_YEAR, current_year, is_valid_year,
};
use crate::services::catalog_service::{CatalogError, CatalogService};
use async_trait::async_trait;

const MAX_NAME_LEN: usize = 50;
const MAX_DESCRIPTION_LEN: usize = 500;

pub struct SeaOrmCatalogService {
    store: Store,
}

impl SeaOrmCatalogService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    fn validate_name(field: &str, value: &str) -> Result<String, CatalogError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(CatalogError::Validation(format!("{field} cannot be empty")));
        }
        if trimmed.chars().count() > MAX_NAME_LEN {
            return Err(CatalogError::Validation(format!(
                "{field} must be {MAX_NAME_LEN} characters or less"
            )));
        }
        Ok(trimmed.to_string())
    }

    fn validate_make(input: &CarMakeInput) -> Result<(String, Option<String>), CatalogError> {
        let name = Self::validate_name("Make name", &input.name)?;

        let description = input
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty());

        if let Some(d) = description
            && d.chars().count() > MAX_DESCRIPTION_LEN
        {
            return Err(CatalogError::Validation(format!(
                "Description must be {MAX_DESCRIPTION_LEN} characters or less"
            )));
        }

        Ok((name, description.map(ToString::to_string)))
    }

    async fn validate_model(&self, input: CarModelInput) -> Result<CarModelRow, CatalogError> {
        let name = Self::validate_name("Model name", &input.name)?;

        let year = input.year.unwrap_or_else(current_year);
        if !is_valid_year(year) {
            return Err(CatalogError::Validation(format!(
                "Invalid year: {year}. Year must be between {FIRST_MODEL_YEAR} and {}",
                current_year()
            )));
        }

        if let Some(make_id) = input.car_make_id
            && self.store.get_car_make(make_id).await?.is_none()
        {
            return Err(CatalogError::Validation(format!(
                "Car make {make_id} does not exist"
            )));
        }

        Ok(CarModelRow {
            car_make_id: input.car_make_id,
            name,
            dealer_id: input.dealer_id,
            model_type: input.model_type.unwrap_or_default(),
            year,
        })
    }
}

#[async_trait]
impl CatalogService for SeaOrmCatalogService {
    async fn list_makes(&self) -> Result<Vec<CarMake>, CatalogError> {
        Ok(self.store.list_car_makes().await?)
    }

    async fn get_make(&self, id: i32) -> Result<CarMake, CatalogError> {
        self.store
            .get_car_make(id)
            .await?
            .ok_or_else(|| CatalogError::make_not_found(id))
    }

    async fn create_make(&self, input: CarMakeInput) -> Result<CarMake, CatalogError> {
        let (name, description) = Self::validate_make(&input)?;
        Ok(self
            .store
            .add_car_make(&name, description.as_deref())
            .await?)
    }

    async fn update_make(&self, id: i32, input: CarMakeInput) -> Result<CarMake, CatalogError> {
        let (name, description) = Self::validate_make(&input)?;
        self.store
            .update_car_make(id, &name, description.as_deref())
            .await?
            .ok_or_else(|| CatalogError::make_not_found(id))
    }

    async fn delete_make(&self, id: i32) -> Result<(), CatalogError> {
        if self.store.remove_car_make(id).await? {
            Ok(())
        } else {
            Err(CatalogError::make_not_found(id))
        }
    }

    async fn list_models(
        &self,
        car_make_id: Option<i32>,
        dealer_id: Option<i32>,
    ) -> Result<Vec<CarModel>, CatalogError> {
        Ok(self.store.list_car_models(car_make_id, dealer_id).await?)
    }

    async fn get_model(&self, id: i32) -> Result<CarModel, CatalogError> {
        self.store
            .get_car_model(id)
            .await?
            .ok_or_else(|| CatalogError::model_not_found(id))
    }

    async fn create_model(&self, input: CarModelInput) -> Result<CarModel, CatalogError> {
        let row = self.validate_model(input).await?;
        Ok(self.store.add_car_model(&row).await?)
    }

    async fn update_model(
        &self,
        id: i32,
        input: CarModelInput,
    ) -> Result<CarModel, CatalogError> {
        let row = self.validate_model(input).await?;
        self.store
            .update_car_model(id, &row)
            .await?
            .ok_or_else(|| CatalogError::model_not_found(id))
    }

    async fn delete_model(&self, id: i32) -> Result<(), CatalogError> {
        if self.store.remove_car_model(id).await? {
            Ok(())
        } else {
            Err(CatalogError::model_not_found(id))
        }
    }
}
